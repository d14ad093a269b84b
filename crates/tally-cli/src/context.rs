use crate::args::WindowArgs;
use crate::config::Config;
use crate::output::Diagnostics;
use crate::presentation::views::tui::BASE_ROW_POINTS;
use crate::types::{LogLevel, OutputFormat};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tally_engine::{GuideOptions, GuideSource};
use tally_feed::{SampleSource, SnapshotSource, SnapshotStore};

/// The guide source a command ended up with, plus enough about it to tell
/// the user and to watch the backing file.
pub struct ResolvedSource {
    pub source: Box<dyn GuideSource>,
    pub label: String,
    pub path: Option<PathBuf>,
}

impl std::fmt::Debug for ResolvedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSource")
            .field("label", &self.label)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

pub struct ExecutionContext {
    data_dir: PathBuf,
    config: OnceCell<Config>,
    pub format: OutputFormat,
    pub diag: Diagnostics,
}

impl ExecutionContext {
    pub fn new(data_dir: PathBuf, format: OutputFormat, log_level: LogLevel) -> Self {
        Self {
            data_dir,
            config: OnceCell::new(),
            format,
            diag: Diagnostics::new(log_level),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn config(&self) -> Result<&Config> {
        self.config
            .get_or_try_init(|| Config::load_from(&self.config_path()))
    }

    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.data_dir)
    }

    /// Pick the guide source for this invocation: `--sample` beats
    /// `--snapshot <name>` beats the configured default snapshot beats the
    /// newest stored one. With nothing stored the sample dataset serves.
    pub fn resolve_source(&self, args: &WindowArgs) -> Result<ResolvedSource> {
        if args.sample {
            return Ok(ResolvedSource {
                source: Box::new(SampleSource::new()),
                label: "sample dataset".to_string(),
                path: None,
            });
        }

        let store = self.store();
        let named = match &args.snapshot {
            Some(name) => Some(name.clone()),
            None => self.config()?.default_snapshot.clone(),
        };

        if let Some(name) = named {
            let entry = store.named(&name)?;
            return Ok(ResolvedSource {
                source: Box::new(SnapshotSource::new(&entry.path)),
                label: format!("snapshot '{}'", entry.name),
                path: Some(entry.path),
            });
        }

        if let Some(entry) = store.latest()? {
            return Ok(ResolvedSource {
                source: Box::new(SnapshotSource::new(&entry.path)),
                label: format!("snapshot '{}'", entry.name),
                path: Some(entry.path),
            });
        }

        self.diag
            .info("no snapshots stored; serving the sample dataset (run 'tally init')");
        Ok(ResolvedSource {
            source: Box::new(SampleSource::new()),
            label: "sample dataset".to_string(),
            path: None,
        })
    }

    /// Merge per-command flags over config.toml into engine options.
    pub fn window_options(&self, args: &WindowArgs) -> Result<GuideOptions> {
        let config = self.config()?;
        Ok(GuideOptions {
            back_days: args.back.unwrap_or(config.back_days),
            forward_days: args.forward.unwrap_or(config.forward_days),
            country: args.country.clone().unwrap_or_else(|| config.country.clone()),
            default_row_points: BASE_ROW_POINTS,
        })
    }

    pub fn anchor(&self, args: &WindowArgs) -> NaiveDate {
        args.anchor.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LogLevel, OutputFormat};
    use std::fs;
    use tempfile::TempDir;

    fn context(temp_dir: &TempDir) -> ExecutionContext {
        ExecutionContext::new(
            temp_dir.path().to_path_buf(),
            OutputFormat::Plain,
            LogLevel::Error,
        )
    }

    fn plain_args() -> WindowArgs {
        WindowArgs {
            anchor: None,
            back: None,
            forward: None,
            country: None,
            snapshot: None,
            sample: false,
        }
    }

    fn store_snapshot(temp_dir: &TempDir, name: &str) {
        let snapshots = temp_dir.path().join("snapshots");
        fs::create_dir_all(&snapshots).unwrap();
        fs::write(
            snapshots.join(format!("{}.json", name)),
            "{\"providers\":[]}",
        )
        .unwrap();
    }

    #[test]
    fn config_loads_lazily_and_only_once() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);

        assert!(ctx.config.get().is_none());
        ctx.config().unwrap();
        assert!(ctx.config.get().is_some());
    }

    #[test]
    fn sample_flag_wins_over_everything() {
        let temp_dir = TempDir::new().unwrap();
        store_snapshot(&temp_dir, "stored");
        let ctx = context(&temp_dir);

        let mut args = plain_args();
        args.sample = true;
        args.snapshot = Some("stored".to_string());

        let resolved = ctx.resolve_source(&args).unwrap();
        assert_eq!(resolved.label, "sample dataset");
        assert!(resolved.path.is_none());
    }

    #[test]
    fn named_snapshot_resolves_to_its_file() {
        let temp_dir = TempDir::new().unwrap();
        store_snapshot(&temp_dir, "january");
        let ctx = context(&temp_dir);

        let mut args = plain_args();
        args.snapshot = Some("january".to_string());

        let resolved = ctx.resolve_source(&args).unwrap();
        assert_eq!(resolved.label, "snapshot 'january'");
        assert_eq!(
            resolved.path.as_deref(),
            Some(temp_dir.path().join("snapshots").join("january.json").as_path())
        );
    }

    #[test]
    fn missing_named_snapshot_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);

        let mut args = plain_args();
        args.snapshot = Some("ghost".to_string());

        let err = ctx.resolve_source(&args).unwrap_err();
        assert!(err.to_string().contains("Snapshot not found"));
    }

    #[test]
    fn empty_store_falls_back_to_the_sample_dataset() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);

        let resolved = ctx.resolve_source(&plain_args()).unwrap();
        assert_eq!(resolved.label, "sample dataset");
    }

    #[test]
    fn window_flags_override_config_values() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.toml"),
            "country = \"GB\"\nback_days = 3\n",
        )
        .unwrap();
        let ctx = context(&temp_dir);

        let mut args = plain_args();
        args.back = Some(5);

        let options = ctx.window_options(&args).unwrap();
        assert_eq!(options.back_days, 5, "Flag beats config");
        assert_eq!(options.forward_days, 14, "Config default fills the gap");
        assert_eq!(options.country, "GB");
    }
}
