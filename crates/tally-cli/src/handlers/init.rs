use crate::config::Config;
use crate::context::ExecutionContext;
use crate::presentation::presenters::init::{present_init, InitOutcome};
use crate::presentation::views::{FormatOptions, InitView};
use crate::types::OutputFormat;
use anyhow::{anyhow, Result};
use chrono::Local;
use tally_engine::{DateAxis, GuideSource};
use tally_feed::SampleSource;

const STARTER_SNAPSHOT: &str = "starter";

/// Create the data directory, a default config.toml, and a starter
/// snapshot built from the sample dataset around today.
pub fn handle(ctx: &ExecutionContext, refresh: bool) -> Result<()> {
    std::fs::create_dir_all(ctx.data_dir())?;

    let config_path = ctx.config_path();
    let config_created = !config_path.exists();
    let config = if config_created {
        let config = Config::default();
        config.save_to(&config_path)?;
        ctx.diag.info(format!("wrote default config to {}", config_path.display()));
        config
    } else {
        Config::load_from(&config_path)?
    };

    let store = ctx.store();
    let needs_snapshot = refresh || store.entries()?.is_empty();

    let mut snapshot = None;
    let mut episodes_seeded = 0;
    if needs_snapshot {
        let anchor = Local::now().date_naive();
        let axis = DateAxis::build(anchor, config.back_days, config.forward_days);
        let payload = SampleSource::new()
            .fetch_guide_window(axis.start_date(), axis.end_date(), &config.country)
            .map_err(|err| anyhow!("sample feed failed: {}", err))?;
        episodes_seeded = payload.episode_count();
        let path = store.write(STARTER_SNAPSHOT, &payload)?;
        ctx.diag.info(format!(
            "stored {} episodes in {}",
            episodes_seeded,
            path.display()
        ));
        snapshot = Some(path);
    }

    let vm = present_init(InitOutcome {
        data_dir: ctx.data_dir(),
        config_path: &config_path,
        config_created,
        snapshot: snapshot
            .as_deref()
            .map(|path| (STARTER_SNAPSHOT, path)),
        snapshot_created: needs_snapshot,
        episodes_seeded,
    });

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&vm)?),
        OutputFormat::Plain => {
            let options = FormatOptions::detect();
            print!(
                "{}",
                InitView {
                    vm: &vm,
                    options: &options
                }
            );
        }
    }
    Ok(())
}
