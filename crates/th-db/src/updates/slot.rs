//! Housing slot update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SlotUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
}

pub struct SlotUpdateBuilder(SlotUpdate);

impl SlotUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SlotUpdate::default())
    }

    /// Move the slot to another cabinet.
    #[must_use]
    pub fn container_id(mut self, container_id: impl Into<String>) -> Self {
        self.0.container_id = Some(container_id.into());
        self
    }

    #[must_use]
    pub fn column(mut self, column: u32) -> Self {
        self.0.column = Some(column);
        self
    }

    #[must_use]
    pub fn row(mut self, row: u32) -> Self {
        self.0.row = Some(row);
        self
    }

    #[must_use]
    pub fn build(self) -> SlotUpdate {
        self.0
    }
}
