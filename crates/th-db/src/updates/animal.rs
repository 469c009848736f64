//! Animal update builder.

use chrono::NaiveDate;
use serde::Serialize;
use th_core::enums::Sex;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnimalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Option<Sex>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traits: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Option<f64>>,
}

impl AnimalUpdate {
    /// Whether the update touches housing (container or slot).
    #[must_use]
    pub const fn moves_housing(&self) -> bool {
        self.container_id.is_some() || self.slot_id.is_some()
    }
}

pub struct AnimalUpdateBuilder(AnimalUpdate);

impl AnimalUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AnimalUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn nickname(mut self, nickname: Option<String>) -> Self {
        self.0.nickname = Some(nickname);
        self
    }

    #[must_use]
    pub fn sex(mut self, sex: Option<Sex>) -> Self {
        self.0.sex = Some(sex);
        self
    }

    #[must_use]
    pub fn traits(mut self, traits: Vec<String>) -> Self {
        self.0.traits = Some(traits);
        self
    }

    #[must_use]
    pub fn species_id(mut self, species_id: impl Into<String>) -> Self {
        self.0.species_id = Some(species_id.into());
        self
    }

    #[must_use]
    pub fn container_id(mut self, container_id: Option<String>) -> Self {
        self.0.container_id = Some(container_id);
        self
    }

    #[must_use]
    pub fn slot_id(mut self, slot_id: Option<String>) -> Self {
        self.0.slot_id = Some(slot_id);
        self
    }

    #[must_use]
    pub fn birth_date(mut self, birth_date: Option<NaiveDate>) -> Self {
        self.0.birth_date = Some(birth_date);
        self
    }

    #[must_use]
    pub fn weight(mut self, weight: Option<f64>) -> Self {
        self.0.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn build(self) -> AnimalUpdate {
        self.0
    }
}
