//! Feeding log repository.
//!
//! Logs are edited by replacing every mutable field at once.

use chrono::{DateTime, Utc};

use th_core::entities::FeedingLog;
use th_core::enums::EntityType;
use th_core::ids::PREFIX_FEEDING;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::ThService;

const SELECT_COLS: &str = "id, animal_id, fed_at, food, amount, note, created_at, updated_at";

fn row_to_feeding(row: &libsql::Row) -> Result<FeedingLog, DatabaseError> {
    Ok(FeedingLog {
        id: row.get(0)?,
        animal_id: row.get(1)?,
        fed_at: parse_datetime(&row.get::<String>(2)?)?,
        food: row.get(3)?,
        amount: row.get::<Option<f64>>(4)?,
        note: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Mutable fields of a feeding log.
#[derive(Debug, Clone)]
pub struct FeedingInput {
    pub animal_id: String,
    pub fed_at: DateTime<Utc>,
    pub food: String,
    pub amount: Option<f64>,
    pub note: Option<String>,
}

impl FeedingInput {
    fn validate(&self) -> Result<(), DatabaseError> {
        if self.food.trim().is_empty() {
            return Err(DatabaseError::Validation("food must not be empty".into()));
        }
        if let Some(amount) = self.amount
            && (!amount.is_finite() || amount < 0.0)
        {
            return Err(DatabaseError::Validation(format!(
                "amount must be a non-negative number, got {amount}"
            )));
        }
        Ok(())
    }
}

impl ThService {
    /// Fail unless `animal_id` exists. Shared by all log repos.
    pub(crate) async fn require_animal(&self, animal_id: &str) -> Result<(), DatabaseError> {
        match self.get_animal(animal_id).await {
            Ok(_) => Ok(()),
            Err(DatabaseError::NoResult) => Err(DatabaseError::Validation(format!(
                "unknown animal {animal_id}"
            ))),
            Err(e) => Err(e),
        }
    }

    pub async fn add_feeding_log(&self, input: FeedingInput) -> Result<FeedingLog, DatabaseError> {
        input.validate()?;
        self.require_animal(&input.animal_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_FEEDING).await?;
        let food = input.food.trim().to_string();
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO feeding_logs ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                libsql::params![
                    id.as_str(),
                    input.animal_id.as_str(),
                    input.fed_at.to_rfc3339(),
                    food.as_str(),
                    input.amount,
                    input.note.as_deref(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(FeedingLog {
            id,
            animal_id: input.animal_id,
            fed_at: input.fed_at,
            food,
            amount: input.amount,
            note: input.note,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_feeding_log(&self, id: &str) -> Result<FeedingLog, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM feeding_logs WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_feeding(&row)
    }

    /// Feeding logs, newest feeding first, optionally for one animal.
    pub async fn list_feeding_logs(&self, animal_id: Option<&str>) -> Result<Vec<FeedingLog>, DatabaseError> {
        let mut rows = match animal_id {
            Some(animal_id) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM feeding_logs WHERE animal_id = ?1 \
                             ORDER BY fed_at DESC, id"
                        ),
                        [animal_id],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM feeding_logs ORDER BY fed_at DESC, id"),
                        (),
                    )
                    .await?
            }
        };

        let mut logs = Vec::new();
        while let Some(row) = rows.next().await? {
            logs.push(row_to_feeding(&row)?);
        }
        Ok(logs)
    }

    /// Overwrite every mutable field of a feeding log.
    pub async fn replace_feeding_log(
        &self,
        id: &str,
        input: FeedingInput,
    ) -> Result<FeedingLog, DatabaseError> {
        input.validate()?;
        self.require_animal(&input.animal_id).await?;

        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE feeding_logs SET animal_id = ?1, fed_at = ?2, food = ?3, amount = ?4, note = ?5, \
                 updated_at = ?6 WHERE id = ?7",
                libsql::params![
                    input.animal_id.as_str(),
                    input.fed_at.to_rfc3339(),
                    input.food.trim(),
                    input.amount,
                    input.note.as_deref(),
                    Utc::now().to_rfc3339(),
                    id
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_feeding_log(id).await
    }

    pub async fn delete_feeding_log(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_by_ids(EntityType::FeedingLog, &[id.to_string()])
            .await
            .map(|_| ())
    }

    pub async fn delete_many_feeding_logs(&self, ids: &[String]) -> Result<u64, DatabaseError> {
        self.delete_by_ids(EntityType::FeedingLog, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_animal, seed_species, test_service};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn input(animal_id: &str, day: u32, food: &str) -> FeedingInput {
        FeedingInput {
            animal_id: animal_id.to_string(),
            fed_at: Utc.with_ymd_and_hms(2024, 6, day, 20, 0, 0).unwrap(),
            food: food.to_string(),
            amount: Some(1.0),
            note: None,
        }
    }

    #[tokio::test]
    async fn add_get_and_list_newest_first() {
        let svc = test_service().await;
        let species = seed_species(&svc, "玉米蛇").await;
        let a = seed_animal(&svc, &species.id, "雪蛇", None, &[]).await;
        let b = seed_animal(&svc, &species.id, "焦糖", None, &[]).await;

        let first = svc.add_feeding_log(input(&a.id, 1, "乳鼠")).await.unwrap();
        svc.add_feeding_log(input(&a.id, 8, "跳鼠")).await.unwrap();
        svc.add_feeding_log(input(&b.id, 3, "乳鼠")).await.unwrap();

        assert!(first.id.starts_with("fed-"));
        assert_eq!(svc.get_feeding_log(&first.id).await.unwrap().food, "乳鼠");

        let for_a = svc.list_feeding_logs(Some(&a.id)).await.unwrap();
        assert_eq!(for_a.iter().map(|l| l.food.as_str()).collect::<Vec<_>>(), vec!["跳鼠", "乳鼠"]);
        assert_eq!(svc.list_feeding_logs(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn replace_overwrites_all_fields() {
        let svc = test_service().await;
        let species = seed_species(&svc, "玉米蛇").await;
        let animal = seed_animal(&svc, &species.id, "雪蛇", None, &[]).await;
        let mut log_input = input(&animal.id, 1, "乳鼠");
        log_input.note = Some("拒食".into());
        let log = svc.add_feeding_log(log_input).await.unwrap();

        let mut replacement = input(&animal.id, 2, "成鼠");
        replacement.amount = None;
        replacement.fed_at += Duration::hours(1);
        let replaced = svc.replace_feeding_log(&log.id, replacement.clone()).await.unwrap();

        assert_eq!(replaced.food, "成鼠");
        assert_eq!(replaced.amount, None);
        assert_eq!(replaced.note, None, "omitted note is cleared");
        assert_eq!(replaced.fed_at, replacement.fed_at);
        assert_eq!(replaced.created_at.timestamp(), log.created_at.timestamp());
    }

    #[tokio::test]
    async fn logs_require_an_existing_animal() {
        let svc = test_service().await;
        let err = svc.add_feeding_log(input("ani-missing", 1, "乳鼠")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn replace_missing_log_is_no_result() {
        let svc = test_service().await;
        let species = seed_species(&svc, "玉米蛇").await;
        let animal = seed_animal(&svc, &species.id, "雪蛇", None, &[]).await;
        let result = svc.replace_feeding_log("fed-missing", input(&animal.id, 1, "乳鼠")).await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn deleting_the_animal_deletes_its_logs() {
        let svc = test_service().await;
        let species = seed_species(&svc, "玉米蛇").await;
        let animal = seed_animal(&svc, &species.id, "雪蛇", None, &[]).await;
        svc.add_feeding_log(input(&animal.id, 1, "乳鼠")).await.unwrap();

        svc.delete_animal(&animal.id).await.unwrap();
        assert!(svc.list_feeding_logs(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_many_logs() {
        let svc = test_service().await;
        let species = seed_species(&svc, "玉米蛇").await;
        let animal = seed_animal(&svc, &species.id, "雪蛇", None, &[]).await;
        let a = svc.add_feeding_log(input(&animal.id, 1, "乳鼠")).await.unwrap();
        let b = svc.add_feeding_log(input(&animal.id, 2, "乳鼠")).await.unwrap();

        assert_eq!(svc.delete_many_feeding_logs(&[a.id, b.id]).await.unwrap(), 2);
        assert!(svc.list_feeding_logs(Some(&animal.id)).await.unwrap().is_empty());
    }
}
