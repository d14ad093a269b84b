use super::options::FormatOptions;
use crate::presentation::view_models::InitViewModel;
use owo_colors::OwoColorize;
use std::fmt;

pub struct InitView<'a> {
    pub vm: &'a InitViewModel,
    pub options: &'a FormatOptions,
}

impl fmt::Display for InitView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headline = format!("Initializing tally in {}", self.vm.data_dir);
        if self.options.enable_color {
            writeln!(f, "{}", headline.bold())?;
        } else {
            writeln!(f, "{}", headline)?;
        }
        writeln!(f)?;

        if self.vm.config_created {
            writeln!(f, "Config: created {}", self.vm.config_path)?;
        } else {
            writeln!(f, "Config: using existing {}", self.vm.config_path)?;
        }

        match (&self.vm.snapshot_name, &self.vm.snapshot_path) {
            (Some(name), Some(path)) if self.vm.snapshot_created => {
                writeln!(
                    f,
                    "Snapshot: stored '{}' ({} episodes) at {}",
                    name, self.vm.episodes_seeded, path
                )?;
            }
            _ => {
                writeln!(
                    f,
                    "Snapshot: already stored; pass --refresh to regenerate"
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Ready. Try: tally guide")?;
        Ok(())
    }
}
