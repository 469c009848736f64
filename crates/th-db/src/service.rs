//! Service layer for Tailhouse records.
//!
//! `ThService` wraps `ThDb` (raw database access). All repo methods are
//! implemented as `impl ThService` blocks in [`crate::repos`]. Cross-entity
//! invariants (cabinet-only slots, species still in use, slot/container
//! agreement) are checked here before SQL runs; cascades are left to the
//! schema's foreign keys.

use th_core::enums::EntityType;

use crate::ThDb;
use crate::error::DatabaseError;
use crate::helpers::{entity_type_to_table, placeholders};

pub struct ThService {
    db: ThDb,
}

impl ThService {
    /// Create a service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: ThDb::open_local(db_path).await?,
        })
    }

    /// Create a service backed by a synced embedded replica.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the replica cannot be opened.
    pub async fn new_synced(
        local_replica_path: &str,
        remote_url: &str,
        auth_token: &str,
    ) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: ThDb::open_synced(local_replica_path, remote_url, auth_token).await?,
        })
    }

    /// Create from an existing `ThDb`.
    #[must_use]
    pub const fn from_db(db: ThDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ThDb {
        &self.db
    }

    /// Sync the underlying database with the remote.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when running local-only.
    pub async fn sync(&self) -> Result<(), DatabaseError> {
        self.db.sync().await
    }

    #[must_use]
    pub const fn is_synced_replica(&self) -> bool {
        self.db.is_synced_replica()
    }

    /// Delete every row of `entity` whose id is in `ids`. Returns the number removed.
    pub(crate) async fn delete_by_ids(
        &self,
        entity: EntityType,
        ids: &[String],
    ) -> Result<u64, DatabaseError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let table = entity_type_to_table(entity);
        let sql = format!(
            "DELETE FROM {table} WHERE id IN ({})",
            placeholders(1, ids.len())
        );
        let removed = self
            .db
            .conn()
            .execute(&sql, libsql::params_from_iter(ids.iter().map(String::as_str)))
            .await?;
        tracing::debug!(entity = %entity, requested = ids.len(), removed, "bulk delete");
        Ok(removed)
    }

    /// Count rows of `table` matching `column = value`.
    pub(crate) async fn count_where(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1"),
                [value],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
