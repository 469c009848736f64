use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One feeding event.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FeedingLog {
    pub id: String,
    pub animal_id: String,
    pub fed_at: DateTime<Utc>,
    /// Food item, e.g. "乳鼠".
    pub food: String,
    /// Grams offered, when weighed.
    pub amount: Option<f64>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One weigh-in. Weight is in grams.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WeightLog {
    pub id: String,
    pub animal_id: String,
    pub measured_at: DateTime<Utc>,
    pub weight: f64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Enclosure temperature (°C) and relative humidity (%) reading for an animal.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ClimateLog {
    pub id: String,
    pub animal_id: String,
    pub recorded_at: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
