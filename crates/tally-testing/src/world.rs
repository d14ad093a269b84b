//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated data directories
//! - Seeding config files and guide snapshots
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tally_types::GuideWindowPayload;
use tempfile::TempDir;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use tally_testing::TestWorld;
///
/// let world = TestWorld::new().with_config("country = \"US\"\n");
///
/// let result = world.run(&["window"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    cwd: PathBuf,
    data_dir: PathBuf,
    format: String,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();
        let data_dir = base_path.join(".tally");

        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            cwd: base_path.clone(),
            temp_dir,
            data_dir,
            format: "plain".to_string(),
            env_vars: HashMap::new(),
        }
    }

    /// Get the data directory path (.tally).
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Select the output format passed to every command (default "plain").
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    /// Write a config.toml into the data directory.
    pub fn with_config(self, contents: &str) -> Self {
        std::fs::write(self.data_dir.join("config.toml"), contents)
            .expect("Failed to write config");
        self
    }

    /// Serialize a guide payload into the data directory's snapshot store.
    pub fn with_snapshot(self, name: &str, payload: &GuideWindowPayload) -> Self {
        let snapshots = self.data_dir.join("snapshots");
        std::fs::create_dir_all(&snapshots).expect("Failed to create snapshots dir");
        let json = serde_json::to_string_pretty(payload).expect("Failed to serialize payload");
        std::fs::write(snapshots.join(format!("{}.json", name)), json)
            .expect("Failed to write snapshot");
        self
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// The caller must provide the base command (e.g., from
    /// `Command::cargo_bin("tally")`). This method configures it with the
    /// appropriate data-dir, cwd, and env vars.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--format")
            .arg(&self.format);

        cmd.current_dir(&self.cwd);

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to
    /// be built and the `CARGO_BIN_EXE_` environment variable to be set
    /// (which cargo test does automatically).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("tally")
            .map_err(|e| anyhow::anyhow!("Failed to find tally binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Captured outcome of one CLI invocation.
pub struct CliResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON (for commands run with `--format json`).
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.stdout)
            .map_err(|e| anyhow::anyhow!("stdout is not valid JSON: {}\n{}", e, self.stdout))
    }
}
