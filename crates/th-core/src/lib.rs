//! # th-core
//!
//! Core types, ID prefixes, and error types for Tailhouse.
//!
//! This crate provides the foundational types shared across all Tailhouse crates:
//! - Entity structs for all tracked records (species, animals, housing, logs)
//! - Closed enumerations (sex, container kind, entity type) with display labels
//! - ID prefix constants
//! - Stable string hashing and the label color palette
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod palette;
