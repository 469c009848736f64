use std::path::PathBuf;

use anyhow::Context;
use th_config::{PROJECT_DIR, TailConfig};
use th_db::service::ThService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ThService,
    pub config: TailConfig,
    pub project_root: PathBuf,
    /// Rows per page after applying `--page-size` over the config default.
    pub page_size: usize,
}

impl AppContext {
    /// Open the project database, as a synced replica when a remote is configured.
    pub async fn init(
        project_root: PathBuf,
        config: TailConfig,
        page_size_override: Option<usize>,
    ) -> anyhow::Result<Self> {
        let page_size = page_size_override.unwrap_or(config.general.page_size);
        config
            .general
            .check_page_size(page_size)
            .context("invalid --page-size")?;

        let project_dir = project_root.join(PROJECT_DIR);
        let db_path = project_dir.join("tailhouse.db");
        let synced_path = project_dir.join("tailhouse-synced.db");
        let db_path_str = db_path.to_string_lossy();
        let synced_path_str = synced_path.to_string_lossy();

        let service = if config.database.is_configured() {
            let replica_path: &str = if config.database.has_local_replica() {
                &config.database.local_replica_path
            } else {
                &synced_path_str
            };

            match ThService::new_synced(
                replica_path,
                &config.database.url,
                &config.database.auth_token,
            )
            .await
            {
                Ok(service) => service,
                Err(error) => {
                    tracing::warn!(
                        %error,
                        "failed to open synced replica; falling back to local database"
                    );
                    ThService::new_local(&db_path_str)
                        .await
                        .context("failed to open local database")?
                }
            }
        } else {
            ThService::new_local(&db_path_str)
                .await
                .context("failed to open local database")?
        };

        tracing::debug!(
            root = %project_root.display(),
            synced = service.is_synced_replica(),
            page_size,
            "application context ready"
        );

        Ok(Self {
            service,
            config,
            project_root,
            page_size,
        })
    }
}
