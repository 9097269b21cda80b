//! Database query modules.
//!
//! - users: account creation and lookup
//! - images: image insert, listing, and payload retrieval

pub mod images;
pub mod users;

/// Convert a stored RFC 3339 timestamp column into `DateTime<Utc>`.
pub(crate) fn parse_timestamp(
    idx: usize,
    value: &str,
) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}
