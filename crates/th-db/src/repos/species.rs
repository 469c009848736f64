//! Species repository.

use chrono::Utc;

use th_core::entities::SpeciesType;
use th_core::enums::EntityType;
use th_core::ids::PREFIX_SPECIES;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::ThService;
use crate::updates::species::SpeciesUpdate;

const SELECT_COLS: &str = "id, name, created_at, updated_at";

fn row_to_species(row: &libsql::Row) -> Result<SpeciesType, DatabaseError> {
    Ok(SpeciesType {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
        updated_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

fn validate_name(name: &str) -> Result<&str, DatabaseError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DatabaseError::Validation("species name must not be empty".into()));
    }
    Ok(name)
}

impl ThService {
    pub async fn create_species(&self, name: &str) -> Result<SpeciesType, DatabaseError> {
        let name = validate_name(name)?;
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_SPECIES).await?;

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO species_types ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4)"),
                libsql::params![id.as_str(), name, now.to_rfc3339(), now.to_rfc3339()],
            )
            .await?;

        tracing::debug!(%id, name, "species created");
        Ok(SpeciesType {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_species(&self, id: &str) -> Result<SpeciesType, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM species_types WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_species(&row)
    }

    /// All species, most recently created first.
    pub async fn list_species(&self) -> Result<Vec<SpeciesType>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM species_types ORDER BY created_at DESC, id"),
                (),
            )
            .await?;

        let mut species = Vec::new();
        while let Some(row) = rows.next().await? {
            species.push(row_to_species(&row)?);
        }
        Ok(species)
    }

    pub async fn update_species(
        &self,
        id: &str,
        update: SpeciesUpdate,
    ) -> Result<SpeciesType, DatabaseError> {
        let Some(name) = update.name else {
            return self.get_species(id).await;
        };
        let name = validate_name(&name)?;

        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE species_types SET name = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![name, Utc::now().to_rfc3339(), id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_species(id).await
    }

    /// Delete a species. Rejected while any animal still references it.
    pub async fn delete_species(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_many_species(&[id.to_string()]).await.map(|_| ())
    }

    /// Delete several species at once. Rejected as a whole if any is still in use.
    pub async fn delete_many_species(&self, ids: &[String]) -> Result<u64, DatabaseError> {
        for id in ids {
            let in_use = self.count_where("animals", "species_id", id).await?;
            if in_use > 0 {
                return Err(DatabaseError::InvalidState(format!(
                    "species {id} still has {in_use} animal(s)"
                )));
            }
        }
        self.delete_by_ids(EntityType::Species, ids).await
    }
}
