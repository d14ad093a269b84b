use crate::args::WindowArgs;
use crate::context::ExecutionContext;
use crate::output::report_findings;
use crate::presentation::presenters::present_export_rows;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tally_engine::{GuideCore, GuideSessionState};

/// Export placed cells: CSV under `--format plain`, JSON rows under
/// `--format json`, to stdout or `--output`.
pub fn handle(ctx: &ExecutionContext, args: &WindowArgs, output: Option<&Path>) -> Result<()> {
    let resolved = ctx.resolve_source(args)?;
    let options = ctx.window_options(args)?;
    let anchor = ctx.anchor(args);

    let mut core = GuideCore::new(resolved.source, options, GuideSessionState::default());
    let report = core
        .load_window(anchor)
        .with_context(|| format!("loading guide window from {}", resolved.label))?;
    report_findings(&ctx.diag, &report);

    let rows = present_export_rows(&core);

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path).with_context(|| {
            format!("creating export file {}", path.display())
        })?),
        None => Box::new(io::stdout()),
    };

    match ctx.format {
        OutputFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writeln!(writer)?;
        }
        OutputFormat::Plain => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in &rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
    }

    if let Some(path) = output {
        ctx.diag
            .info(format!("exported {} rows to {}", rows.len(), path.display()));
    }
    Ok(())
}
