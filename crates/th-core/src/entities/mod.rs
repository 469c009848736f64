//! Entity structs for all Tailhouse records.
//!
//! Each entity maps to a table in the libSQL database (see `th-db/migrations`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! output and schema export.

mod animal;
mod housing;
mod logs;
mod species;

pub use animal::Animal;
pub use housing::{HousingContainer, HousingSlot};
pub use logs::{ClimateLog, FeedingLog, WeightLog};
pub use species::SpeciesType;
