//! Housing container repository.
//!
//! Deleting a container removes its slots (`ON DELETE CASCADE`) and clears the
//! housing references of animals kept there (`ON DELETE SET NULL`).

use chrono::Utc;

use th_core::entities::HousingContainer;
use th_core::enums::{ContainerKind, EntityType};
use th_core::ids::PREFIX_CONTAINER;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::ThService;
use crate::updates::container::ContainerUpdate;

const SELECT_COLS: &str = "id, name, kind, created_at, updated_at";

fn row_to_container(row: &libsql::Row) -> Result<HousingContainer, DatabaseError> {
    Ok(HousingContainer {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: parse_enum(&row.get::<String>(2)?)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl ThService {
    pub async fn create_container(
        &self,
        name: &str,
        kind: ContainerKind,
    ) -> Result<HousingContainer, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::Validation("container name must not be empty".into()));
        }
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_CONTAINER).await?;

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO housing_containers ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                libsql::params![
                    id.as_str(),
                    name,
                    kind.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::debug!(%id, %kind, "container created");
        Ok(HousingContainer {
            id,
            name: name.to_string(),
            kind,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_container(&self, id: &str) -> Result<HousingContainer, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM housing_containers WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_container(&row)
    }

    /// All containers, most recently created first.
    pub async fn list_containers(&self) -> Result<Vec<HousingContainer>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM housing_containers ORDER BY created_at DESC, id"),
                (),
            )
            .await?;

        let mut containers = Vec::new();
        while let Some(row) = rows.next().await? {
            containers.push(row_to_container(&row)?);
        }
        Ok(containers)
    }

    /// Apply an update. Turning a cabinet that still has slots into a box is rejected.
    pub async fn update_container(
        &self,
        id: &str,
        update: ContainerUpdate,
    ) -> Result<HousingContainer, DatabaseError> {
        let current = self.get_container(id).await?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DatabaseError::Validation("container name must not be empty".into()));
            }
            sets.push(format!("name = ?{idx}"));
            params.push(name.into());
            idx += 1;
        }
        if let Some(kind) = update.kind {
            if !kind.has_slots() && current.kind.has_slots() {
                let slots = self.count_where("housing_slots", "container_id", id).await?;
                if slots > 0 {
                    return Err(DatabaseError::InvalidState(format!(
                        "container {id} still has {slots} slot(s); remove them before changing it to {kind}"
                    )));
                }
            }
            sets.push(format!("kind = ?{idx}"));
            params.push(kind.as_str().into());
            idx += 1;
        }

        if sets.is_empty() {
            return Ok(current);
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(Utc::now().to_rfc3339().into());
        idx += 1;

        params.push(id.into());
        let sql = format!(
            "UPDATE housing_containers SET {} WHERE id = ?{idx}",
            sets.join(", ")
        );
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.get_container(id).await
    }

    pub async fn delete_container(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_by_ids(EntityType::Container, &[id.to_string()])
            .await
            .map(|_| ())
    }

    pub async fn delete_many_containers(&self, ids: &[String]) -> Result<u64, DatabaseError> {
        self.delete_by_ids(EntityType::Container, ids).await
    }
}
