use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use th_config::{PROJECT_DIR, TailConfig};
use th_db::service::ThService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

const CONFIG_TEMPLATE: &str = r#"# Tailhouse project configuration.
# Values here override ~/.config/tailhouse/config.toml and are overridden by
# TAILHOUSE_* environment variables.

[general]
page_size = 10
max_page_size = 100

[display]
color = true

# Sync with a remote libSQL database:
# [database]
# url = "libsql://reptiles-example.turso.io"
# auth_token = "..."
"#;

#[derive(Debug, Serialize)]
struct InitResponse {
    project_root: PathBuf,
    database: PathBuf,
    config: PathBuf,
    created: bool,
}

/// Handle `th init`.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = initialize(Path::new(&args.path)).await?;
    output(&response, flags.format)
}

async fn initialize(root: &Path) -> anyhow::Result<InitResponse> {
    if !root.is_dir() {
        anyhow::bail!("cannot initialize '{}': directory does not exist", root.display());
    }

    let project_dir = root.join(PROJECT_DIR);
    let created = !project_dir.is_dir();
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("failed to create {}", project_dir.display()))?;

    let config = TailConfig::project_config_path(root);
    if !config.exists() {
        std::fs::write(&config, CONFIG_TEMPLATE)
            .with_context(|| format!("failed to write {}", config.display()))?;
    }

    // Opening the database runs the migrations.
    let database = project_dir.join("tailhouse.db");
    ThService::new_local(&database.to_string_lossy())
        .await
        .context("failed to create project database")?;

    tracing::info!(root = %root.display(), created, "project initialized");

    Ok(InitResponse {
        project_root: root.to_path_buf(),
        database,
        config,
        created,
    })
}
