//! # th-view
//!
//! Pure, synchronous projections over already-loaded Tailhouse collections.
//!
//! Nothing here performs I/O or holds state between calls: every function
//! takes the collections it needs and returns a fresh value. Empty input is
//! always valid and produces the empty form of the output.
//!
//! - [`dedup`]: value-based deduplication of filter options
//! - [`grouping`]: species → name → genotype → sex counting tree
//! - [`charts`]: treemap, pie, and grouped-bar projections
//! - [`table`]: equality filters, pagination, and id-keyed selection
//! - [`line`]: time series for weight and climate logs
//! - [`cabinet`]: slot grid for cabinet containers

pub mod cabinet;
pub mod charts;
pub mod dedup;
pub mod grouping;
pub mod line;
mod rows;
pub mod table;
