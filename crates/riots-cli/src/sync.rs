use nu_ansi_term::Color::{Cyan, Green, Yellow};
use riots_core::{
    sync::{EventResponse, SyncOptions, SyncReport, Syncer},
    SiteResult,
};
use tracing::info;

use crate::{context::Context, utils::Colored};

pub fn sync(
    ctx: &Context,
    distribution_id: &str,
    options: &SyncOptions,
    json: bool,
) -> SiteResult<()> {
    let report = run(ctx, distribution_id, options)?;

    if json {
        println!("{}", serde_json::to_string(&report).unwrap_or_default());
        return Ok(());
    }

    if let Some(count) = report.indexed {
        info!("Index rendered with {} releases", Colored(Cyan, count));
    }
    for version in &report.published {
        info!(
            "{} {}",
            Colored(Green, "Published"),
            ctx.config.version_url(version)
        );
    }
    if !report.skipped.is_empty() {
        info!(
            "{} {}",
            Colored(Yellow, "Skipped (no single archive asset)"),
            report.skipped.join(", ")
        );
    }
    if !report.below_boundary.is_empty() {
        info!(
            "{} {}",
            Colored(Yellow, "Below legacy boundary"),
            report.below_boundary.join(", ")
        );
    }
    info!("Invalidation {}", Colored(Cyan, &report.invalidation_id));

    Ok(())
}

/// The event-triggered run: both phases, then the fixed response on stdout.
pub fn event(ctx: &Context, distribution_id: &str) -> SiteResult<()> {
    run(ctx, distribution_id, &SyncOptions::all())?;
    println!(
        "{}",
        serde_json::to_string(&EventResponse::default()).unwrap_or_default()
    );
    Ok(())
}

fn run(ctx: &Context, distribution_id: &str, options: &SyncOptions) -> SiteResult<SyncReport> {
    let source = ctx.source();
    let store = ctx.store();
    let cdn = ctx.cdn(distribution_id);

    Syncer::new(&ctx.config, &source, &ctx.client, &store, &cdn).run(options)
}
