use super::args::{Cli, Commands};
use super::handlers;
use crate::config;
use crate::context::ExecutionContext;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = config::resolve_data_dir(cli.data_dir.as_deref())?;
    let ctx = ExecutionContext::new(data_dir, cli.format, cli.log_level);

    let Some(command) = cli.command else {
        show_guidance(&ctx);
        return Ok(());
    };

    match command {
        Commands::Init { refresh } => handlers::init::handle(&ctx, refresh),
        Commands::Window { window } => handlers::window::handle(&ctx, &window),
        Commands::Schedule { window } => handlers::schedule::handle(&ctx, &window),
        Commands::Export { window, output } => {
            handlers::export::handle(&ctx, &window, output.as_deref())
        }
        Commands::Guide { window, watch } => handlers::guide::handle(&ctx, &window, watch),
    }
}

fn show_guidance(ctx: &ExecutionContext) {
    println!("tally - TV show schedule grid\n");

    let config_exists = ctx.config_path().exists();
    let has_snapshots = ctx
        .store()
        .latest()
        .ok()
        .flatten()
        .is_some();

    if !config_exists || !has_snapshots {
        println!("Get started:");
        println!("  tally init\n");
        println!("The init command will:");
        println!("  1. Create the data directory and config.toml");
        println!("  2. Store a starter snapshot built from the sample dataset");
        println!("  3. Leave you ready to run 'tally guide'\n");
    } else {
        println!("Quick commands:");
        println!("  tally guide                       # Open the interactive grid");
        println!("  tally window                      # Summarize the current window");
        println!("  tally schedule                    # List episodes day by day");
        println!("  tally export --output guide.csv   # Export placed episodes\n");
    }

    println!("For more commands:");
    println!("  tally --help");
}
