use crate::args::WindowArgs;
use crate::context::ExecutionContext;
use crate::output::report_findings;
use crate::presentation::presenters::present_window;
use crate::presentation::views::{FormatOptions, WindowView};
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use tally_engine::{GuideCore, GuideSessionState};

pub fn handle(ctx: &ExecutionContext, args: &WindowArgs) -> Result<()> {
    let resolved = ctx.resolve_source(args)?;
    let options = ctx.window_options(args)?;
    let anchor = ctx.anchor(args);

    let mut core = GuideCore::new(resolved.source, options, GuideSessionState::default());
    let report = core
        .load_window(anchor)
        .with_context(|| format!("loading guide window from {}", resolved.label))?;
    report_findings(&ctx.diag, &report);

    let vm = present_window(&resolved.label, &core, report);
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&vm)?),
        OutputFormat::Plain => {
            let options = FormatOptions::detect();
            print!(
                "{}",
                WindowView {
                    vm: &vm,
                    options: &options
                }
            );
        }
    }
    Ok(())
}
