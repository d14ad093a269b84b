use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use tally_engine::GuideSource;
use tally_types::{GuideWindowPayload, SourceError};

/// One stored guide window on disk.
#[derive(Debug, Clone)]
pub struct SnapshotEntry {
    /// File stem, used as the snapshot's name everywhere.
    pub name: String,
    pub path: PathBuf,
    pub modified: SystemTime,
    pub bytes: u64,
}

/// Directory of stored guide payloads under `<data-dir>/snapshots`.
///
/// Each snapshot is one JSON file holding a complete `GuideWindowPayload`.
/// Offline commands load the newest one unless a name is given explicitly.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("snapshots"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All stored snapshots, newest first. A missing directory is an empty
    /// store, not an error.
    pub fn entries(&self) -> Result<Vec<SnapshotEntry>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let metadata = entry.metadata()?;
            entries.push(SnapshotEntry {
                name: stem.to_string(),
                path: path.to_path_buf(),
                modified: metadata.modified()?,
                bytes: metadata.len(),
            });
        }
        entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
        Ok(entries)
    }

    pub fn latest(&self) -> Result<Option<SnapshotEntry>> {
        Ok(self.entries()?.into_iter().next())
    }

    /// Entry for `<name>.json`, which must exist.
    pub fn named(&self, name: &str) -> Result<SnapshotEntry> {
        let path = self.dir.join(format!("{}.json", name));
        if !path.is_file() {
            return Err(Error::MissingSnapshot(path));
        }
        let metadata = fs::metadata(&path)?;
        Ok(SnapshotEntry {
            name: name.to_string(),
            path,
            modified: metadata.modified()?,
            bytes: metadata.len(),
        })
    }

    /// Serialize `payload` to `<name>.json`, replacing any previous version.
    pub fn write(&self, name: &str, payload: &GuideWindowPayload) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.json", name));
        let json = serde_json::to_string_pretty(payload)?;
        fs::write(&path, json)?;
        Ok(path)
    }
}

/// Content fingerprint of a snapshot file. The watch loop reloads only when
/// the fingerprint actually changed, not on every filesystem event.
pub fn fingerprint(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Guide source backed by one snapshot file, re-read on every fetch.
///
/// The stored payload is served as-is regardless of the requested range;
/// out-of-window episodes are the engine's to drop.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<GuideWindowPayload> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl GuideSource for SnapshotSource {
    fn fetch_guide_window(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
        _country: &str,
    ) -> std::result::Result<GuideWindowPayload, SourceError> {
        self.load().map_err(Into::into)
    }
}
