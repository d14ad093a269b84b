use crate::presentation::renderers::GuideEvent;
use anyhow::Result;
use notify::{Event, PollWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Duration;

/// Watches the directory holding the serving snapshot and reports touches
/// of that file into the TUI's event channel. Polling backend so network
/// and overlay filesystems behave; dropping the struct stops it.
pub struct SnapshotWatcher {
    _watcher: PollWatcher,
}

impl SnapshotWatcher {
    pub fn spawn(snapshot_path: &Path, tx: Sender<GuideEvent>) -> Result<Self> {
        let target: PathBuf = snapshot_path.to_path_buf();
        let watch_dir = snapshot_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let config = notify::Config::default().with_poll_interval(Duration::from_millis(500));

        let mut watcher = PollWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res
                    && event.paths.iter().any(|path| path == &target)
                {
                    let _ = tx.send(GuideEvent::SnapshotChanged(target.clone()));
                }
            },
            config,
        )?;
        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

        Ok(Self { _watcher: watcher })
    }
}
