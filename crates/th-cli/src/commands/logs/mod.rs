//! Feeding, weight, and climate log commands.
//!
//! All three share one shape: add, replace every field, list newest first,
//! and delete by id.

pub mod climate;
pub mod feeding;
pub mod weight;

use th_view::table::{Filter, FilterValue, TableQuery, TableRow};

/// Page query over logs, optionally narrowed to one animal.
fn log_query<T: TableRow + Clone>(animal: Option<&str>, page: usize, page_size: usize) -> TableQuery<'static, T> {
    TableQuery::new(page, page_size).with_filter(Filter::field("animal_id", FilterValue::from_option(animal)))
}
