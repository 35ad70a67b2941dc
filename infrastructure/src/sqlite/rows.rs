//! Row decoding helpers

use chrono::{DateTime, Utc};
use rusqlite::Row;
use rusqlite::types::Type;
use std::str::FromStr;
use tally_application::StoreError;

/// Map a rusqlite error onto the store port's error type.
pub(crate) fn db_err(error: rusqlite::Error) -> StoreError {
    match error {
        rusqlite::Error::FromSqlConversionFailure(column, _, cause) => {
            StoreError::Corrupt(format!("column {}: {}", column, cause))
        }
        other => StoreError::Database(other.to_string()),
    }
}

fn conversion_failure<E>(idx: usize, ty: Type, error: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, ty, Box::new(error))
}

/// Decode a text column through `FromStr` (ids, statuses).
pub(crate) fn parsed<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e| conversion_failure(idx, Type::Text, e))
}

/// Decode an integer column through a fallible domain conversion.
pub(crate) fn checked<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: TryFrom<i64>,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    let raw: i64 = row.get(idx)?;
    T::try_from(raw).map_err(|e| conversion_failure(idx, Type::Integer, e))
}

/// Decode an RFC 3339 timestamp column.
pub(crate) fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| conversion_failure(idx, Type::Text, e))
}

/// Decode a non-negative ordering column.
pub(crate) fn position(row: &Row<'_>, idx: usize) -> rusqlite::Result<usize> {
    checked::<usize>(row, idx)
}
