//! Weight log repository.

use chrono::{DateTime, Utc};

use th_core::entities::WeightLog;
use th_core::enums::EntityType;
use th_core::ids::PREFIX_WEIGHT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::ThService;

const SELECT_COLS: &str = "id, animal_id, measured_at, weight, note, created_at, updated_at";

fn row_to_weight(row: &libsql::Row) -> Result<WeightLog, DatabaseError> {
    Ok(WeightLog {
        id: row.get(0)?,
        animal_id: row.get(1)?,
        measured_at: parse_datetime(&row.get::<String>(2)?)?,
        weight: row.get::<f64>(3)?,
        note: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Mutable fields of a weight log. `weight` is in grams.
#[derive(Debug, Clone)]
pub struct WeightInput {
    pub animal_id: String,
    pub measured_at: DateTime<Utc>,
    pub weight: f64,
    pub note: Option<String>,
}

impl WeightInput {
    fn validate(&self) -> Result<(), DatabaseError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(DatabaseError::Validation(format!(
                "weight must be a positive number, got {}",
                self.weight
            )));
        }
        Ok(())
    }
}

impl ThService {
    pub async fn add_weight_log(&self, input: WeightInput) -> Result<WeightLog, DatabaseError> {
        input.validate()?;
        self.require_animal(&input.animal_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_WEIGHT).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO weight_logs ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
                libsql::params![
                    id.as_str(),
                    input.animal_id.as_str(),
                    input.measured_at.to_rfc3339(),
                    input.weight,
                    input.note.as_deref(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(WeightLog {
            id,
            animal_id: input.animal_id,
            measured_at: input.measured_at,
            weight: input.weight,
            note: input.note,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_weight_log(&self, id: &str) -> Result<WeightLog, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM weight_logs WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_weight(&row)
    }

    /// Weight logs, newest measurement first, optionally for one animal.
    pub async fn list_weight_logs(&self, animal_id: Option<&str>) -> Result<Vec<WeightLog>, DatabaseError> {
        let mut rows = match animal_id {
            Some(animal_id) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM weight_logs WHERE animal_id = ?1 \
                             ORDER BY measured_at DESC, id"
                        ),
                        [animal_id],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM weight_logs ORDER BY measured_at DESC, id"),
                        (),
                    )
                    .await?
            }
        };

        let mut logs = Vec::new();
        while let Some(row) = rows.next().await? {
            logs.push(row_to_weight(&row)?);
        }
        Ok(logs)
    }

    /// Overwrite every mutable field of a weight log.
    pub async fn replace_weight_log(&self, id: &str, input: WeightInput) -> Result<WeightLog, DatabaseError> {
        input.validate()?;
        self.require_animal(&input.animal_id).await?;

        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE weight_logs SET animal_id = ?1, measured_at = ?2, weight = ?3, note = ?4, \
                 updated_at = ?5 WHERE id = ?6",
                libsql::params![
                    input.animal_id.as_str(),
                    input.measured_at.to_rfc3339(),
                    input.weight,
                    input.note.as_deref(),
                    Utc::now().to_rfc3339(),
                    id
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_weight_log(id).await
    }

    pub async fn delete_weight_log(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_by_ids(EntityType::WeightLog, &[id.to_string()])
            .await
            .map(|_| ())
    }

    pub async fn delete_many_weight_logs(&self, ids: &[String]) -> Result<u64, DatabaseError> {
        self.delete_by_ids(EntityType::WeightLog, ids).await
    }
}
