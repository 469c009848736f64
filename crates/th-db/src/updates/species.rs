//! Species update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SpeciesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub struct SpeciesUpdateBuilder(SpeciesUpdate);

impl SpeciesUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SpeciesUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn build(self) -> SpeciesUpdate {
        self.0
    }
}
