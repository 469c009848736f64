//! libSQL database configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Remote database URL (e.g., `libsql://reptiles-myorg.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Local replica path used when syncing with the remote. Defaults to the
    /// project database file when empty.
    #[serde(default)]
    pub local_replica_path: String,
}

impl DatabaseConfig {
    /// Check if the remote has the minimum required fields for sync.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    #[must_use]
    pub fn has_local_replica(&self) -> bool {
        !self.local_replica_path.is_empty()
    }
}
