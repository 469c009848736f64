use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;

/// Token accepted by nullable update flags to clear the field.
pub const CLEAR_TOKEN: &str = "none";

/// Parse a `snake_case` enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a log timestamp. Accepts RFC 3339, `YYYY-MM-DD HH:MM`, or a bare
/// date (midnight UTC). Missing means now.
pub fn parse_timestamp(raw: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    let Some(raw) = raw else {
        return Ok(Utc::now());
    };
    let trimmed = raw.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M") {
        return Ok(at.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }
    anyhow::bail!("invalid timestamp '{raw}': expected RFC 3339, 'YYYY-MM-DD HH:MM', or 'YYYY-MM-DD'")
}

/// Map a nullable flag value: `none` clears, anything else sets.
#[must_use]
pub fn nullable(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case(CLEAR_TOKEN) {
        None
    } else {
        Some(trimmed)
    }
}
