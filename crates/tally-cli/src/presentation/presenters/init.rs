use crate::presentation::view_models::InitViewModel;
use std::path::Path;

pub struct InitOutcome<'a> {
    pub data_dir: &'a Path,
    pub config_path: &'a Path,
    pub config_created: bool,
    pub snapshot: Option<(&'a str, &'a Path)>,
    pub snapshot_created: bool,
    pub episodes_seeded: usize,
}

pub fn present_init(outcome: InitOutcome<'_>) -> InitViewModel {
    InitViewModel {
        data_dir: outcome.data_dir.display().to_string(),
        config_path: outcome.config_path.display().to_string(),
        config_created: outcome.config_created,
        snapshot_name: outcome.snapshot.map(|(name, _)| name.to_string()),
        snapshot_path: outcome
            .snapshot
            .map(|(_, path)| path.display().to_string()),
        snapshot_created: outcome.snapshot_created,
        episodes_seeded: outcome.episodes_seeded,
    }
}
