//! Housing container update builder.

use serde::Serialize;
use th_core::enums::ContainerKind;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContainerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContainerKind>,
}

pub struct ContainerUpdateBuilder(ContainerUpdate);

impl ContainerUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ContainerUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: ContainerKind) -> Self {
        self.0.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn build(self) -> ContainerUpdate {
        self.0
    }
}
