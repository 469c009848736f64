//! # th-db
//!
//! libSQL persistence for Tailhouse records: species, animals, housing
//! containers and slots, and the feeding, weight, and climate logs.
//!
//! A project keeps a local database file. When a remote libSQL endpoint is
//! configured the file is opened as an embedded replica and pushed/pulled with
//! an explicit [`ThDb::sync`].

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
pub struct ThDb {
    db: libsql::Database,
    conn: libsql::Connection,
    synced: bool,
}

impl ThDb {
    /// Open a local-only database at the given path (no remote sync).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::init(db, false).await
    }

    /// Open `local_replica_path` as an embedded replica of `remote_url`.
    ///
    /// Pulls remote state once before running migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the replica cannot be built, the initial
    /// sync fails, or migrations fail.
    pub async fn open_synced(
        local_replica_path: &str,
        remote_url: &str,
        auth_token: &str,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote_replica(
            local_replica_path,
            remote_url.to_string(),
            auth_token.to_string(),
        )
        .read_your_writes(true)
        .build()
        .await?;
        db.sync().await?;
        tracing::debug!(remote_url, "embedded replica synced on open");
        Self::init(db, true).await
    }

    async fn init(db: libsql::Database, synced: bool) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let th_db = Self { db, conn, synced };
        th_db.run_migrations().await?;
        Ok(th_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle is an embedded replica of a remote database.
    #[must_use]
    pub const fn is_synced_replica(&self) -> bool {
        self.synced
    }

    /// Push local writes and pull remote changes.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` for a local-only database, or the
    /// libSQL error if the sync itself fails.
    pub async fn sync(&self) -> Result<(), DatabaseError> {
        if !self.synced {
            return Err(DatabaseError::InvalidState(
                "cannot sync: database is local-only".into(),
            ));
        }
        self.db.sync().await?;
        Ok(())
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"ani-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
