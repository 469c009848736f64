//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual datetime
//! format issue (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, NaiveDate, Utc};
use th_core::enums::{EntityType, Sex};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional `YYYY-MM-DD` TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not a calendar date.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}"))),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all th-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Parse a stored sex. Values outside the closed set load as `None`.
#[must_use]
pub fn parse_sex(animal_id: &str, s: Option<&str>) -> Option<Sex> {
    let raw = s.filter(|s| !s.is_empty())?;
    let sex = Sex::from_stored(raw);
    if sex.is_none() {
        tracing::warn!(animal_id, stored = raw, "unrecognized sex value, treating as absent");
    }
    sex
}

/// Parse the JSON array stored in `animals.traits`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the column is not a JSON array of strings.
pub fn parse_traits(s: &str) -> Result<Vec<String>, DatabaseError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(s).map_err(|e| DatabaseError::Query(format!("Invalid traits JSON: {e}")))
}

/// Serialize traits for storage.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn traits_to_json(traits: &[String]) -> Result<String, DatabaseError> {
    serde_json::to_string(traits).map_err(|e| DatabaseError::Other(e.into()))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a non-negative INTEGER column as `u32`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the stored value is negative or too large.
pub fn get_u32(row: &libsql::Row, idx: i32) -> Result<u32, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u32::try_from(raw).map_err(|_| DatabaseError::Query(format!("column {idx}: {raw} out of range")))
}

/// `?N` placeholders for an `IN (...)` list, numbered from `start`.
#[must_use]
pub fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|n| format!("?{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Map `EntityType` to the corresponding SQL table name.
#[must_use]
pub const fn entity_type_to_table(entity: EntityType) -> &'static str {
    match entity {
        EntityType::Species => "species_types",
        EntityType::Animal => "animals",
        EntityType::Container => "housing_containers",
        EntityType::Slot => "housing_slots",
        EntityType::FeedingLog => "feeding_logs",
        EntityType::WeightLog => "weight_logs",
        EntityType::ClimateLog => "climate_logs",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rstest::rstest;
    use th_core::enums::ContainerKind;

    #[test]
    fn parses_both_datetime_formats() {
        let rfc = parse_datetime("2024-05-01T08:30:00+00:00").unwrap();
        let sqlite = parse_datetime("2024-05-01 08:30:00").unwrap();
        assert_eq!(rfc, sqlite);
        assert_eq!(rfc.hour(), 8);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn parses_optional_dates() {
        let date = parse_optional_date(Some("2023-07-14")).unwrap().unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 7, 14));
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
        assert!(parse_optional_date(Some("2023-13-01")).is_err());
    }

    #[rstest]
    #[case(Some("male"), Some(Sex::Male))]
    #[case(Some("unknown"), Some(Sex::Unknown))]
    #[case(Some("FAMALE"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn sex_parsing_is_lenient(#[case] stored: Option<&str>, #[case] expected: Option<Sex>) {
        assert_eq!(parse_sex("ani-1", stored), expected);
    }

    #[test]
    fn container_kind_parses_via_serde() {
        let kind: ContainerKind = parse_enum("cabinet").unwrap();
        assert_eq!(kind, ContainerKind::Cabinet);
        assert!(parse_enum::<ContainerKind>("shelf").is_err());
    }

    #[test]
    fn traits_roundtrip_through_json() {
        let traits = vec!["白化".to_string(), "条纹".to_string()];
        let stored = traits_to_json(&traits).unwrap();
        assert_eq!(parse_traits(&stored).unwrap(), traits);
        assert!(parse_traits("").unwrap().is_empty());
        assert!(parse_traits("not json").is_err());
    }

    #[test]
    fn placeholder_lists() {
        assert_eq!(placeholders(1, 3), "?1, ?2, ?3");
        assert_eq!(placeholders(4, 1), "?4");
        assert_eq!(placeholders(1, 0), "");
    }

    #[test]
    fn every_entity_has_a_table() {
        for entity in EntityType::ALL {
            assert!(!entity_type_to_table(entity).is_empty());
        }
    }
}
