use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SyncResponse<'a> {
    synced: bool,
    remote: &'a str,
    project_root: String,
}

/// Handle `th sync`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !ctx.service.is_synced_replica() {
        anyhow::bail!(
            "no remote database configured; set database.url and database.auth_token \
             (or TAILHOUSE_DATABASE__URL and TAILHOUSE_DATABASE__AUTH_TOKEN)"
        );
    }

    ctx.service
        .sync()
        .await
        .context("failed to sync with remote database")?;

    output(
        &SyncResponse {
            synced: true,
            remote: &ctx.config.database.url,
            project_root: ctx.project_root.display().to_string(),
        },
        flags.format,
    )
}
