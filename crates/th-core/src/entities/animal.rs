use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Sex;

/// A tracked individual.
///
/// `sex` is `None` when the stored value is missing or not a member of the
/// closed [`Sex`] set. `traits` are genotype/morph labels; their order carries
/// no meaning.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Animal {
    pub id: String,
    pub name: String,
    pub nickname: Option<String>,
    pub sex: Option<Sex>,
    pub traits: Vec<String>,
    pub species_id: String,
    pub container_id: Option<String>,
    pub slot_id: Option<String>,
    pub birth_date: Option<NaiveDate>,
    /// Grams.
    pub weight: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
