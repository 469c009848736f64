//! Closed enumerations for Tailhouse records.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! which is also the form stored in SQL. Display labels (`label()`) are the
//! zh-CN strings shown in tables and charts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Sex
// ---------------------------------------------------------------------------

/// Sex of an animal, including the "probable" determinations made before
/// an animal is mature enough to sex reliably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    ProbableMale,
    ProbableFemale,
    Unknown,
}

impl Sex {
    /// Number of members.
    pub const COUNT: usize = 5;

    /// Canonical order. Grouping leaves and bar-chart columns follow it.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Male,
        Self::Female,
        Self::ProbableMale,
        Self::ProbableFemale,
        Self::Unknown,
    ];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::ProbableMale => "probable_male",
            Self::ProbableFemale => "probable_female",
            Self::Unknown => "unknown",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "公",
            Self::Female => "母",
            Self::ProbableMale => "疑似公",
            Self::ProbableFemale => "疑似母",
            Self::Unknown => "未知",
        }
    }

    /// Position of this member in [`Sex::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Male => 0,
            Self::Female => 1,
            Self::ProbableMale => 2,
            Self::ProbableFemale => 3,
            Self::Unknown => 4,
        }
    }

    /// Parse a stored value. Returns `None` for anything outside the closed set.
    #[must_use]
    pub fn from_stored(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sex| sex.as_str() == raw)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ContainerKind
// ---------------------------------------------------------------------------

/// Kind of housing container.
///
/// A `Box` is a single enclosure. A `Cabinet` is a rack with addressable
/// slots (see `HousingSlot`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Box,
    Cabinet,
}

impl ContainerKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Cabinet => "cabinet",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Box => "箱",
            Self::Cabinet => "柜",
        }
    }

    /// Whether containers of this kind have slots.
    #[must_use]
    pub const fn has_slots(self) -> bool {
        matches!(self, Self::Cabinet)
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Every persisted entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Species,
    Animal,
    Container,
    Slot,
    FeedingLog,
    WeightLog,
    ClimateLog,
}

impl EntityType {
    pub const ALL: [Self; 7] = [
        Self::Species,
        Self::Animal,
        Self::Container,
        Self::Slot,
        Self::FeedingLog,
        Self::WeightLog,
        Self::ClimateLog,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Species => "species",
            Self::Animal => "animal",
            Self::Container => "container",
            Self::Slot => "slot",
            Self::FeedingLog => "feeding_log",
            Self::WeightLog => "weight_log",
            Self::ClimateLog => "climate_log",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
