use crate::args::WindowArgs;
use crate::context::ExecutionContext;
use crate::output::report_findings;
use crate::presentation::renderers::{GuideApp, GuideEvent, GuideTui};
use crate::watch::SnapshotWatcher;
use anyhow::{bail, Context, Result};
use std::sync::mpsc;
use tally_engine::{GuideCore, GuideSessionState};

/// Open the interactive guide. The render loop owns the core; the snapshot
/// watcher and the activation callback only ever talk to it through the
/// event channel.
pub fn handle(ctx: &ExecutionContext, args: &WindowArgs, watch: bool) -> Result<()> {
    let resolved = ctx.resolve_source(args)?;
    if watch && resolved.path.is_none() {
        bail!("--watch needs a snapshot file to watch; the sample dataset never changes");
    }

    let options = ctx.window_options(args)?;
    let anchor = ctx.anchor(args);

    let mut core = GuideCore::new(resolved.source, options, GuideSessionState::default());

    let (tx, rx) = mpsc::channel();
    let activation_tx = tx.clone();
    core.set_on_episode_activated(Box::new(move |episode| {
        let _ = activation_tx.send(GuideEvent::EpisodeActivated {
            id: episode.id,
            code: episode.code(),
        });
    }));

    // The first load must succeed; with no last-good window there is
    // nothing to degrade to.
    let report = core
        .load_window(anchor)
        .with_context(|| format!("loading guide window from {}", resolved.label))?;
    report_findings(&ctx.diag, &report);

    let mut app = GuideApp::new(
        core,
        anchor,
        resolved.label,
        watch,
        resolved.path.as_ref(),
    );

    let _watcher = match (watch, resolved.path.as_deref()) {
        (true, Some(path)) => Some(SnapshotWatcher::spawn(path, tx)?),
        _ => None,
    };

    GuideTui::new().run(&mut app, rx)
}
