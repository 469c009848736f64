mod app_context;
mod project_root;

use std::path::Path;

use anyhow::Context;
use th_config::TailConfig;

pub use app_context::AppContext;
pub use project_root::resolve_project_root;

/// Load `.env` from the project root (if present) and then the layered config.
pub fn load_config(project_root: &Path) -> anyhow::Result<TailConfig> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    TailConfig::load_for(project_root).context("failed to load tailhouse config")
}
