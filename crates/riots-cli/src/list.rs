use nu_ansi_term::Color::{Blue, Green, LightRed};
use riots_core::{sync::release_status, SiteResult};
use tracing::info;

use crate::{context::Context, utils::Colored};

pub fn list_releases(ctx: &Context, json: bool) -> SiteResult<()> {
    let source = ctx.source();
    let store = ctx.store();

    let statuses = release_status(&source, &store)?;

    if json {
        println!("{}", serde_json::to_string(&statuses).unwrap_or_default());
        return Ok(());
    }

    for status in &statuses {
        let state = if status.published {
            Colored(Green, "published")
        } else {
            Colored(LightRed, "missing")
        };
        info!(
            "{} ({}) {}",
            Colored(Blue, &status.version),
            status.date,
            state
        );
    }
    info!(
        "{} of {} releases published",
        statuses.iter().filter(|s| s.published).count(),
        statuses.len()
    );

    Ok(())
}
