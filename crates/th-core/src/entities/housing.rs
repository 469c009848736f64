use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ContainerKind;

/// A physical enclosure: a single box or a multi-slot cabinet.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HousingContainer {
    pub id: String,
    pub name: String,
    pub kind: ContainerKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A position inside a cabinet. Only meaningful when the parent is a cabinet.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HousingSlot {
    pub id: String,
    pub container_id: String,
    /// Horizontal index, zero-based.
    pub column: u32,
    /// Vertical index, zero-based.
    pub row: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HousingSlot {
    /// Largest accepted column or row index.
    pub const MAX_INDEX: u32 = 255;

    /// Whether both indices are within [`Self::MAX_INDEX`].
    #[must_use]
    pub const fn in_bounds(column: u32, row: u32) -> bool {
        column <= Self::MAX_INDEX && row <= Self::MAX_INDEX
    }
}
