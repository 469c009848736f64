//! Repository modules implementing CRUD operations for all Tailhouse entities.
//!
//! Each module adds methods to `ThService` via `impl ThService` blocks.

pub mod animal;
pub mod climate;
pub mod collections;
pub mod container;
pub mod feeding;
pub mod slot;
pub mod species;
pub mod weight;
