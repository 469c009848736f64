//! Climate log repository: enclosure temperature (°C) and relative humidity (%).

use chrono::{DateTime, Utc};

use th_core::entities::ClimateLog;
use th_core::enums::EntityType;
use th_core::ids::PREFIX_CLIMATE;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::ThService;

const SELECT_COLS: &str =
    "id, animal_id, recorded_at, temperature, humidity, note, created_at, updated_at";

fn row_to_climate(row: &libsql::Row) -> Result<ClimateLog, DatabaseError> {
    Ok(ClimateLog {
        id: row.get(0)?,
        animal_id: row.get(1)?,
        recorded_at: parse_datetime(&row.get::<String>(2)?)?,
        temperature: row.get::<f64>(3)?,
        humidity: row.get::<f64>(4)?,
        note: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

#[derive(Debug, Clone)]
pub struct ClimateInput {
    pub animal_id: String,
    pub recorded_at: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub note: Option<String>,
}

impl ClimateInput {
    fn validate(&self) -> Result<(), DatabaseError> {
        if !self.temperature.is_finite() {
            return Err(DatabaseError::Validation("temperature must be a number".into()));
        }
        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(DatabaseError::Validation(format!(
                "humidity must be between 0 and 100, got {}",
                self.humidity
            )));
        }
        Ok(())
    }
}

impl ThService {
    pub async fn add_climate_log(&self, input: ClimateInput) -> Result<ClimateLog, DatabaseError> {
        input.validate()?;
        self.require_animal(&input.animal_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_CLIMATE).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO climate_logs ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                libsql::params![
                    id.as_str(),
                    input.animal_id.as_str(),
                    input.recorded_at.to_rfc3339(),
                    input.temperature,
                    input.humidity,
                    input.note.as_deref(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(ClimateLog {
            id,
            animal_id: input.animal_id,
            recorded_at: input.recorded_at,
            temperature: input.temperature,
            humidity: input.humidity,
            note: input.note,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_climate_log(&self, id: &str) -> Result<ClimateLog, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM climate_logs WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_climate(&row)
    }

    pub async fn list_climate_logs(&self, animal_id: Option<&str>) -> Result<Vec<ClimateLog>, DatabaseError> {
        let mut rows = match animal_id {
            Some(animal_id) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM climate_logs WHERE animal_id = ?1 \
                             ORDER BY recorded_at DESC, id"
                        ),
                        [animal_id],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM climate_logs ORDER BY recorded_at DESC, id"),
                        (),
                    )
                    .await?
            }
        };

        let mut logs = Vec::new();
        while let Some(row) = rows.next().await? {
            logs.push(row_to_climate(&row)?);
        }
        Ok(logs)
    }

    pub async fn replace_climate_log(
        &self,
        id: &str,
        input: ClimateInput,
    ) -> Result<ClimateLog, DatabaseError> {
        input.validate()?;
        self.require_animal(&input.animal_id).await?;

        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE climate_logs SET animal_id = ?1, recorded_at = ?2, temperature = ?3, humidity = ?4, \
                 note = ?5, updated_at = ?6 WHERE id = ?7",
                libsql::params![
                    input.animal_id.as_str(),
                    input.recorded_at.to_rfc3339(),
                    input.temperature,
                    input.humidity,
                    input.note.as_deref(),
                    Utc::now().to_rfc3339(),
                    id
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_climate_log(id).await
    }

    pub async fn delete_climate_log(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_by_ids(EntityType::ClimateLog, &[id.to_string()])
            .await
            .map(|_| ())
    }

    pub async fn delete_many_climate_logs(&self, ids: &[String]) -> Result<u64, DatabaseError> {
        self.delete_by_ids(EntityType::ClimateLog, ids).await
    }
}
