//! Table pipeline: equality filters, then pagination.
//!
//! Filters chain by feeding one's output into the next. Pagination always
//! runs last, so the reported total is the filtered count. Row selection is
//! tracked by id and is independent of both stages.

use std::collections::BTreeSet;

use serde::Serialize;

/// Sentinel accepted wherever a filter value is parsed.
pub const ALL_SENTINEL: &str = "all";

/// A record that can be shown as a table row.
pub trait TableRow {
    /// Stable identity of the row, used for selection.
    fn row_id(&self) -> &str;

    /// Value of a named field as text, or `None` when the field is empty or unknown.
    fn field_value(&self, field: &str) -> Option<String>;
}

/// Active value of one filter control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    /// No filtering.
    #[default]
    All,
    /// Only rows whose value equals this string exactly.
    Exact(String),
}

impl FilterValue {
    /// Parse a control value; `"all"` (any case) and blank mean no filtering.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            Self::All
        } else {
            Self::Exact(trimmed.to_string())
        }
    }

    /// Parse an optional control value; `None` means no filtering.
    #[must_use]
    pub fn from_option(raw: Option<&str>) -> Self {
        raw.map_or(Self::All, Self::parse)
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    fn accepts(&self, actual: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Exact(expected) => actual == Some(expected.as_str()),
        }
    }
}

/// Derives the compared value from a row.
pub type KeyFn<'a, T> = Box<dyn Fn(&T) -> Option<String> + 'a>;

/// One equality filter.
pub enum Filter<'a, T> {
    /// Compare a named field of the row.
    Field { field: &'a str, value: FilterValue },
    /// Compare the result of a function of the row.
    Derived { key: KeyFn<'a, T>, value: FilterValue },
}

impl<'a, T: TableRow> Filter<'a, T> {
    #[must_use]
    pub const fn field(field: &'a str, value: FilterValue) -> Self {
        Self::Field { field, value }
    }

    pub fn derived<F>(key: F, value: FilterValue) -> Self
    where
        F: Fn(&T) -> Option<String> + 'a,
    {
        Self::Derived {
            key: Box::new(key),
            value,
        }
    }

    #[must_use]
    pub fn value(&self) -> &FilterValue {
        match self {
            Self::Field { value, .. } | Self::Derived { value, .. } => value,
        }
    }

    /// Whether `row` passes this filter.
    pub fn matches(&self, row: &T) -> bool {
        if self.value().is_all() {
            return true;
        }
        let actual = match self {
            Self::Field { field, .. } => row.field_value(field),
            Self::Derived { key, .. } => key(row),
        };
        self.value().accepts(actual.as_deref())
    }
}

/// Rows passing every filter, in input order.
pub fn apply_filters<'r, T: TableRow>(rows: &'r [T], filters: &[Filter<'_, T>]) -> Vec<&'r T> {
    rows.iter()
        .filter(|row| filters.iter().all(|filter| filter.matches(row)))
        .collect()
}

/// Zero-based page `page` of `size` rows: `rows[page*size .. page*size+size]`,
/// clamped to the slice bounds.
#[must_use]
pub fn paginate<T>(rows: &[T], page: usize, size: usize) -> &[T] {
    let start = page.saturating_mul(size).min(rows.len());
    let end = start.saturating_add(size).min(rows.len());
    &rows[start..end]
}

/// Number of pages needed for `total` rows.
#[must_use]
pub const fn page_count(total: usize, size: usize) -> usize {
    if size == 0 { 0 } else { total.div_ceil(size) }
}

/// One rendered page of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// Rows after filtering, before pagination.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
}

/// Filters plus a page window.
pub struct TableQuery<'a, T> {
    pub filters: Vec<Filter<'a, T>>,
    pub page: usize,
    pub page_size: usize,
}

impl<'a, T: TableRow + Clone> TableQuery<'a, T> {
    #[must_use]
    pub const fn new(page: usize, page_size: usize) -> Self {
        Self {
            filters: Vec::new(),
            page,
            page_size,
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Filter<'a, T>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Rows passing every filter, ignoring the page window.
    pub fn filtered<'r>(&self, rows: &'r [T]) -> Vec<&'r T> {
        apply_filters(rows, &self.filters)
    }

    /// Filter, then cut out the requested page.
    pub fn run(&self, rows: &[T]) -> Page<T> {
        let filtered = self.filtered(rows);
        let window = paginate(&filtered, self.page, self.page_size);
        Page {
            rows: window.iter().map(|row| (*row).clone()).collect(),
            total: filtered.len(),
            page: self.page,
            page_size: self.page_size,
            page_count: page_count(filtered.len(), self.page_size),
        }
    }
}

/// Checked rows for batch actions, keyed by row id.
///
/// Selections survive filter changes: a row hidden by a filter stays selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one id. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    pub fn deselect(&mut self, id: &str) {
        self.ids.remove(id);
    }

    /// Select every given row. Callers pass the filtered, unpaginated rows.
    pub fn select_all<'r, T, I>(&mut self, rows: I)
    where
        T: TableRow + 'r,
        I: IntoIterator<Item = &'r T>,
    {
        self.ids
            .extend(rows.into_iter().map(|row| row.row_id().to_string()));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// How many of `rows` are selected.
    pub fn visible_count<T: TableRow>(&self, rows: &[T]) -> usize {
        rows.iter().filter(|row| self.contains(row.row_id())).count()
    }

    /// Selected ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
