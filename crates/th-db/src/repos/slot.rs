//! Housing slot repository.
//!
//! Slots exist only inside cabinets and are addressed by `(column, row)`,
//! unique per cabinet.

use chrono::Utc;

use th_core::entities::HousingSlot;
use th_core::enums::EntityType;
use th_core::ids::PREFIX_SLOT;

use crate::error::DatabaseError;
use crate::helpers::{get_u32, parse_datetime};
use crate::service::ThService;
use crate::updates::slot::SlotUpdate;

const SELECT_COLS: &str = "id, container_id, slot_column, slot_row, created_at, updated_at";

fn row_to_slot(row: &libsql::Row) -> Result<HousingSlot, DatabaseError> {
    Ok(HousingSlot {
        id: row.get(0)?,
        container_id: row.get(1)?,
        column: get_u32(row, 2)?,
        row: get_u32(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn validate_position(column: u32, row: u32) -> Result<(), DatabaseError> {
    if HousingSlot::in_bounds(column, row) {
        Ok(())
    } else {
        Err(DatabaseError::Validation(format!(
            "slot position ({column}, {row}) is out of range, indices go up to {}",
            HousingSlot::MAX_INDEX
        )))
    }
}

impl ThService {
    /// Fail unless `container_id` names a cabinet.
    async fn require_cabinet(&self, container_id: &str) -> Result<(), DatabaseError> {
        let container = match self.get_container(container_id).await {
            Ok(container) => container,
            Err(DatabaseError::NoResult) => {
                return Err(DatabaseError::Validation(format!(
                    "unknown container {container_id}"
                )));
            }
            Err(e) => return Err(e),
        };
        if !container.kind.has_slots() {
            return Err(DatabaseError::InvalidState(format!(
                "container {container_id} is a {}, only cabinets have slots",
                container.kind
            )));
        }
        Ok(())
    }

    /// Fail if another slot of `container_id` already sits at `(column, row)`.
    async fn require_free_position(
        &self,
        container_id: &str,
        column: u32,
        row: u32,
        except_id: Option<&str>,
    ) -> Result<(), DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id FROM housing_slots WHERE container_id = ?1 AND slot_column = ?2 AND slot_row = ?3",
                libsql::params![container_id, i64::from(column), i64::from(row)],
            )
            .await?;
        if let Some(existing) = rows.next().await? {
            let existing_id: String = existing.get(0)?;
            if except_id != Some(existing_id.as_str()) {
                return Err(DatabaseError::InvalidState(format!(
                    "position ({column}, {row}) of {container_id} is taken by {existing_id}"
                )));
            }
        }
        Ok(())
    }

    pub async fn create_slot(
        &self,
        container_id: &str,
        column: u32,
        row: u32,
    ) -> Result<HousingSlot, DatabaseError> {
        validate_position(column, row)?;
        self.require_cabinet(container_id).await?;
        self.require_free_position(container_id, column, row, None).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_SLOT).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO housing_slots ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
                libsql::params![
                    id.as_str(),
                    container_id,
                    i64::from(column),
                    i64::from(row),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::debug!(%id, container_id, column, row, "slot created");
        Ok(HousingSlot {
            id,
            container_id: container_id.to_string(),
            column,
            row,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_slot(&self, id: &str) -> Result<HousingSlot, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM housing_slots WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_slot(&row)
    }

    /// Slots, optionally limited to one container, ordered by position.
    pub async fn list_slots(&self, container_id: Option<&str>) -> Result<Vec<HousingSlot>, DatabaseError> {
        let mut rows = match container_id {
            Some(container_id) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM housing_slots WHERE container_id = ?1 \
                             ORDER BY slot_row, slot_column"
                        ),
                        [container_id],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM housing_slots \
                             ORDER BY container_id, slot_row, slot_column"
                        ),
                        (),
                    )
                    .await?
            }
        };

        let mut slots = Vec::new();
        while let Some(row) = rows.next().await? {
            slots.push(row_to_slot(&row)?);
        }
        Ok(slots)
    }

    /// Move or re-address a slot. Animals in a moved slot follow it to the new container.
    pub async fn update_slot(&self, id: &str, update: SlotUpdate) -> Result<HousingSlot, DatabaseError> {
        let current = self.get_slot(id).await?;
        let container_id = update.container_id.unwrap_or_else(|| current.container_id.clone());
        let column = update.column.unwrap_or(current.column);
        let row = update.row.unwrap_or(current.row);

        if container_id == current.container_id && column == current.column && row == current.row {
            return Ok(current);
        }
        validate_position(column, row)?;
        if container_id != current.container_id {
            self.require_cabinet(&container_id).await?;
        }
        self.require_free_position(&container_id, column, row, Some(id)).await?;

        self.db()
            .conn()
            .execute(
                "UPDATE housing_slots SET container_id = ?1, slot_column = ?2, slot_row = ?3, updated_at = ?4 \
                 WHERE id = ?5",
                libsql::params![
                    container_id.as_str(),
                    i64::from(column),
                    i64::from(row),
                    Utc::now().to_rfc3339(),
                    id
                ],
            )
            .await?;

        if container_id != current.container_id {
            self.db()
                .conn()
                .execute(
                    "UPDATE animals SET container_id = ?1 WHERE slot_id = ?2",
                    libsql::params![container_id.as_str(), id],
                )
                .await?;
        }

        self.get_slot(id).await
    }

    /// Delete a slot. Animals housed there keep their container but lose the slot.
    pub async fn delete_slot(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_by_ids(EntityType::Slot, &[id.to_string()])
            .await
            .map(|_| ())
    }

    pub async fn delete_many_slots(&self, ids: &[String]) -> Result<u64, DatabaseError> {
        self.delete_by_ids(EntityType::Slot, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_animal, seed_cabinet, seed_slot, seed_species, test_service};
    use crate::updates::animal::AnimalUpdateBuilder;
    use crate::updates::slot::SlotUpdateBuilder;
    use pretty_assertions::assert_eq;
    use th_core::enums::ContainerKind;

    #[tokio::test]
    async fn slots_only_in_cabinets() {
        let svc = test_service().await;
        let boxed = svc.create_container("饲养盒", ContainerKind::Box).await.unwrap();
        let err = svc.create_slot(&boxed.id, 0, 0).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)));

        let err = svc.create_slot("hsg-missing", 0, 0).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn positions_are_unique_per_cabinet() {
        let svc = test_service().await;
        let a = seed_cabinet(&svc, "A架").await;
        let b = seed_cabinet(&svc, "B架").await;
        seed_slot(&svc, &a.id, 0, 0).await;

        assert!(matches!(
            svc.create_slot(&a.id, 0, 0).await,
            Err(DatabaseError::InvalidState(_))
        ));
        assert!(svc.create_slot(&b.id, 0, 0).await.is_ok());
    }

    #[tokio::test]
    async fn positions_beyond_the_index_limit_are_rejected() {
        let svc = test_service().await;
        let cabinet = seed_cabinet(&svc, "A架").await;

        assert!(matches!(
            svc.create_slot(&cabinet.id, u32::MAX, 0).await,
            Err(DatabaseError::Validation(_))
        ));
        assert!(matches!(
            svc.create_slot(&cabinet.id, 0, HousingSlot::MAX_INDEX + 1).await,
            Err(DatabaseError::Validation(_))
        ));
        let corner = svc
            .create_slot(&cabinet.id, HousingSlot::MAX_INDEX, HousingSlot::MAX_INDEX)
            .await
            .unwrap();

        let slot = seed_slot(&svc, &cabinet.id, 0, 0).await;
        assert!(matches!(
            svc.update_slot(&slot.id, SlotUpdateBuilder::new().column(100_000).build()).await,
            Err(DatabaseError::Validation(_))
        ));
        assert_eq!(svc.get_slot(&slot.id).await.unwrap().column, 0);
        assert_eq!(svc.list_slots(Some(&cabinet.id)).await.unwrap().len(), 2);
        assert_eq!(corner.column, HousingSlot::MAX_INDEX);
    }

    #[tokio::test]
    async fn list_orders_by_row_then_column() {
        let svc = test_service().await;
        let cabinet = seed_cabinet(&svc, "A架").await;
        seed_slot(&svc, &cabinet.id, 1, 1).await;
        seed_slot(&svc, &cabinet.id, 0, 1).await;
        seed_slot(&svc, &cabinet.id, 2, 0).await;

        let positions: Vec<_> = svc
            .list_slots(Some(&cabinet.id))
            .await
            .unwrap()
            .iter()
            .map(|s| (s.column, s.row))
            .collect();
        assert_eq!(positions, vec![(2, 0), (0, 1), (1, 1)]);
    }

    #[tokio::test]
    async fn moving_a_slot_moves_its_animals() {
        let svc = test_service().await;
        let species = seed_species(&svc, "玉米蛇").await;
        let a = seed_cabinet(&svc, "A架").await;
        let b = seed_cabinet(&svc, "B架").await;
        let slot = seed_slot(&svc, &a.id, 0, 0).await;
        let animal = seed_animal(&svc, &species.id, "雪蛇", None, &[]).await;
        svc.update_animal(&animal.id, AnimalUpdateBuilder::new().slot_id(Some(slot.id.clone())).build())
            .await
            .unwrap();

        let moved = svc
            .update_slot(&slot.id, SlotUpdateBuilder::new().container_id(b.id.clone()).row(3).build())
            .await
            .unwrap();
        assert_eq!((moved.container_id.as_str(), moved.column, moved.row), (b.id.as_str(), 0, 3));

        let reloaded = svc.get_animal(&animal.id).await.unwrap();
        assert_eq!(reloaded.container_id.as_deref(), Some(b.id.as_str()));
    }

    #[tokio::test]
    async fn deleting_a_slot_keeps_the_container_reference() {
        let svc = test_service().await;
        let species = seed_species(&svc, "玉米蛇").await;
        let cabinet = seed_cabinet(&svc, "A架").await;
        let slot = seed_slot(&svc, &cabinet.id, 0, 0).await;
        let animal = seed_animal(&svc, &species.id, "雪蛇", None, &[]).await;
        svc.update_animal(&animal.id, AnimalUpdateBuilder::new().slot_id(Some(slot.id.clone())).build())
            .await
            .unwrap();

        svc.delete_slot(&slot.id).await.unwrap();
        let reloaded = svc.get_animal(&animal.id).await.unwrap();
        assert_eq!(reloaded.slot_id, None);
        assert_eq!(reloaded.container_id.as_deref(), Some(cabinet.id.as_str()));
    }
}
