//! Animal repository.
//!
//! Housing rules: an animal in a slot is always in that slot's container.
//! Given only a slot, the container is taken from it; given both, they must
//! agree.

use chrono::{NaiveDate, Utc};

use th_core::entities::Animal;
use th_core::enums::{EntityType, Sex};
use th_core::ids::PREFIX_ANIMAL;

use crate::error::DatabaseError;
use crate::helpers::{
    get_opt_string, parse_datetime, parse_optional_date, parse_sex, parse_traits, traits_to_json,
};
use crate::service::ThService;
use crate::updates::animal::AnimalUpdate;

const SELECT_COLS: &str = "id, name, nickname, sex, traits, species_id, container_id, slot_id, \
                           birth_date, weight, created_at, updated_at";

const DATE_FORMAT: &str = "%Y-%m-%d";

fn row_to_animal(row: &libsql::Row) -> Result<Animal, DatabaseError> {
    let id: String = row.get(0)?;
    let sex = parse_sex(&id, get_opt_string(row, 3)?.as_deref());
    Ok(Animal {
        name: row.get(1)?,
        nickname: get_opt_string(row, 2)?,
        sex,
        traits: parse_traits(&row.get::<String>(4)?)?,
        species_id: row.get(5)?,
        container_id: get_opt_string(row, 6)?,
        slot_id: get_opt_string(row, 7)?,
        birth_date: parse_optional_date(get_opt_string(row, 8)?.as_deref())?,
        weight: row.get::<Option<f64>>(9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
        id,
    })
}

/// Trim traits and drop blanks. Order and duplicates are kept as entered.
fn clean_traits(traits: Vec<String>) -> Vec<String> {
    traits
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn opt_text(value: Option<&str>) -> libsql::Value {
    value.map_or(libsql::Value::Null, Into::into)
}

fn opt_date(value: Option<NaiveDate>) -> libsql::Value {
    value.map_or(libsql::Value::Null, |d| d.format(DATE_FORMAT).to_string().into())
}

fn opt_real(value: Option<f64>) -> libsql::Value {
    value.map_or(libsql::Value::Null, libsql::Value::Real)
}

fn validate_weight(weight: Option<f64>) -> Result<(), DatabaseError> {
    match weight {
        Some(w) if !w.is_finite() || w < 0.0 => Err(DatabaseError::Validation(format!(
            "weight must be a non-negative number, got {w}"
        ))),
        _ => Ok(()),
    }
}

/// Input for [`ThService::create_animal`].
#[derive(Debug, Clone, Default)]
pub struct NewAnimal {
    pub name: String,
    pub nickname: Option<String>,
    pub sex: Option<Sex>,
    pub traits: Vec<String>,
    pub species_id: String,
    pub container_id: Option<String>,
    pub slot_id: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub weight: Option<f64>,
}

impl ThService {
    /// Resolve the `(container_id, slot_id)` pair an animal will be stored with.
    async fn resolve_housing(
        &self,
        container_id: Option<String>,
        slot_id: Option<String>,
    ) -> Result<(Option<String>, Option<String>), DatabaseError> {
        match (container_id, slot_id) {
            (container_id, Some(slot_id)) => {
                let slot = match self.get_slot(&slot_id).await {
                    Ok(slot) => slot,
                    Err(DatabaseError::NoResult) => {
                        return Err(DatabaseError::Validation(format!("unknown slot {slot_id}")));
                    }
                    Err(e) => return Err(e),
                };
                if let Some(container_id) = container_id
                    && container_id != slot.container_id
                {
                    return Err(DatabaseError::Validation(format!(
                        "slot {slot_id} belongs to {}, not {container_id}",
                        slot.container_id
                    )));
                }
                Ok((Some(slot.container_id), Some(slot_id)))
            }
            (Some(container_id), None) => {
                match self.get_container(&container_id).await {
                    Ok(_) => Ok((Some(container_id), None)),
                    Err(DatabaseError::NoResult) => Err(DatabaseError::Validation(format!(
                        "unknown container {container_id}"
                    ))),
                    Err(e) => Err(e),
                }
            }
            (None, None) => Ok((None, None)),
        }
    }

    async fn require_species(&self, species_id: &str) -> Result<(), DatabaseError> {
        match self.get_species(species_id).await {
            Ok(_) => Ok(()),
            Err(DatabaseError::NoResult) => Err(DatabaseError::Validation(format!(
                "unknown species {species_id}"
            ))),
            Err(e) => Err(e),
        }
    }

    pub async fn create_animal(&self, input: NewAnimal) -> Result<Animal, DatabaseError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DatabaseError::Validation("animal name must not be empty".into()));
        }
        validate_weight(input.weight)?;
        self.require_species(&input.species_id).await?;
        let (container_id, slot_id) = self.resolve_housing(input.container_id, input.slot_id).await?;
        let traits = clean_traits(input.traits);

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ANIMAL).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO animals ({SELECT_COLS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
                ),
                libsql::params![
                    id.as_str(),
                    name.as_str(),
                    opt_text(input.nickname.as_deref()),
                    opt_text(input.sex.map(Sex::as_str)),
                    traits_to_json(&traits)?,
                    input.species_id.as_str(),
                    opt_text(container_id.as_deref()),
                    opt_text(slot_id.as_deref()),
                    opt_date(input.birth_date),
                    opt_real(input.weight),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::debug!(%id, species_id = %input.species_id, "animal created");
        Ok(Animal {
            id,
            name,
            nickname: input.nickname,
            sex: input.sex,
            traits,
            species_id: input.species_id,
            container_id,
            slot_id,
            birth_date: input.birth_date,
            weight: input.weight,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_animal(&self, id: &str) -> Result<Animal, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM animals WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_animal(&row)
    }

    /// All animals, most recently created first.
    pub async fn list_animals(&self) -> Result<Vec<Animal>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM animals ORDER BY created_at DESC, id"),
                (),
            )
            .await?;

        let mut animals = Vec::new();
        while let Some(row) = rows.next().await? {
            animals.push(row_to_animal(&row)?);
        }
        Ok(animals)
    }

    pub async fn update_animal(&self, id: &str, update: AnimalUpdate) -> Result<Animal, DatabaseError> {
        let current = self.get_animal(id).await?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DatabaseError::Validation("animal name must not be empty".into()));
            }
            sets.push(format!("name = ?{idx}"));
            params.push(name.into());
            idx += 1;
        }
        if let Some(ref nickname) = update.nickname {
            sets.push(format!("nickname = ?{idx}"));
            params.push(opt_text(nickname.as_deref()));
            idx += 1;
        }
        if let Some(sex) = update.sex {
            sets.push(format!("sex = ?{idx}"));
            params.push(opt_text(sex.map(Sex::as_str)));
            idx += 1;
        }
        if let Some(ref traits) = update.traits {
            sets.push(format!("traits = ?{idx}"));
            params.push(traits_to_json(&clean_traits(traits.clone()))?.into());
            idx += 1;
        }
        if let Some(ref species_id) = update.species_id {
            self.require_species(species_id).await?;
            sets.push(format!("species_id = ?{idx}"));
            params.push(species_id.as_str().into());
            idx += 1;
        }
        if update.moves_housing() {
            // A new container without a slot keeps the current slot only if
            // the slot already lies in that container.
            let slot_id = match (&update.container_id, &update.slot_id) {
                (_, Some(slot_id)) => slot_id.clone(),
                (Some(Some(container_id)), None) => current
                    .slot_id
                    .clone()
                    .filter(|_| current.container_id.as_deref() == Some(container_id.as_str())),
                (Some(None), None) | (None, None) => None,
            };
            let container_id = match &update.container_id {
                Some(container_id) => container_id.clone(),
                None if slot_id.is_some() => None,
                None => current.container_id.clone(),
            };
            let (container_id, slot_id) = self.resolve_housing(container_id, slot_id).await?;
            sets.push(format!("container_id = ?{idx}"));
            params.push(opt_text(container_id.as_deref()));
            idx += 1;
            sets.push(format!("slot_id = ?{idx}"));
            params.push(opt_text(slot_id.as_deref()));
            idx += 1;
        }
        if let Some(birth_date) = update.birth_date {
            sets.push(format!("birth_date = ?{idx}"));
            params.push(opt_date(birth_date));
            idx += 1;
        }
        if let Some(weight) = update.weight {
            validate_weight(weight)?;
            sets.push(format!("weight = ?{idx}"));
            params.push(opt_real(weight));
            idx += 1;
        }

        if sets.is_empty() {
            return Ok(current);
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(Utc::now().to_rfc3339().into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE animals SET {} WHERE id = ?{idx}", sets.join(", "));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.get_animal(id).await
    }

    /// Delete an animal and, through the schema, all of its logs.
    pub async fn delete_animal(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_by_ids(EntityType::Animal, &[id.to_string()])
            .await
            .map(|_| ())
    }

    pub async fn delete_many_animals(&self, ids: &[String]) -> Result<u64, DatabaseError> {
        self.delete_by_ids(EntityType::Animal, ids).await
    }
}
