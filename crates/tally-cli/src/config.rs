use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. TALLY_DATA_DIR environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.tally (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("TALLY_DATA_DIR") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("tally"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".tally"));
    }

    Err(anyhow!(
        "Could not determine data directory: no HOME directory or XDG data directory found"
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Main configuration for tally, stored at `<data-dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Country code sent with every feed request
    #[serde(default = "default_country")]
    pub country: String,
    /// Days before the anchor in a default window
    #[serde(default = "default_back_days")]
    pub back_days: u32,
    /// Days after the anchor in a default window
    #[serde(default = "default_forward_days")]
    pub forward_days: u32,
    /// Snapshot served when no --snapshot/--sample is given (default: newest)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_snapshot: Option<String>,
}

fn default_country() -> String {
    "US".to_string()
}

fn default_back_days() -> u32 {
    7
}

fn default_forward_days() -> u32 {
    14
}

impl Default for Config {
    fn default() -> Self {
        Self {
            country: default_country(),
            back_days: default_back_days(),
            forward_days: default_forward_days(),
            default_snapshot: None,
        }
    }
}

impl Config {
    /// Load config from a specific path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a specific path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
