//! Row-to-entity parsing helpers.
//!
//! The external schema stores dates as TEXT and mixes integer and real
//! quantities, so every repo goes through these instead of raw `row.get`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use libsql::Value;
use libsql::params::IntoParams;

use crate::error::DatabaseError;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a TEXT column as a local timestamp.
///
/// Accepts `"2025-03-01 08:30:00"`, the `T`-separated form, fractional
/// seconds, RFC 3339 (offset dropped) and a bare date (midnight).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if no format matches.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, DatabaseError> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column. NULL and empty string are both `None`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<NaiveDateTime>, DatabaseError> {
    match s {
        Some(s) if !s.trim().is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Format for binding timestamps.
#[must_use]
pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format for binding against `date(column)`.
#[must_use]
pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
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

/// Required timestamp column.
///
/// # Errors
///
/// Returns `DatabaseError` if the column is NULL or unparsable.
pub fn get_datetime(row: &libsql::Row, idx: i32) -> Result<NaiveDateTime, DatabaseError> {
    parse_datetime(&row.get::<String>(idx)?)
}

/// Nullable timestamp column.
///
/// # Errors
///
/// Returns `DatabaseError` if a present value cannot be parsed.
pub fn get_opt_datetime(
    row: &libsql::Row,
    idx: i32,
) -> Result<Option<NaiveDateTime>, DatabaseError> {
    parse_optional_datetime(get_opt_string(row, idx)?.as_deref())
}

/// Numeric column that may hold INTEGER, REAL or NULL (read as 0).
///
/// # Errors
///
/// Returns `DatabaseError::Query` for TEXT that is not a number, or BLOB.
#[allow(clippy::cast_precision_loss)]
pub fn get_number(row: &libsql::Row, idx: i32) -> Result<f64, DatabaseError> {
    match row.get_value(idx)? {
        Value::Null => Ok(0.0),
        Value::Integer(i) => Ok(i as f64),
        Value::Real(f) => Ok(f),
        Value::Text(t) => t
            .trim()
            .parse()
            .map_err(|e| DatabaseError::Query(format!("Column {idx}: '{t}' is not a number: {e}"))),
        Value::Blob(_) => Err(DatabaseError::Query(format!(
            "Column {idx}: expected a number, got BLOB"
        ))),
    }
}

/// Nullable id column. NULL and `0` both mean "nobody".
///
/// # Errors
///
/// Returns `DatabaseError::Query` for values that are not integers.
pub fn get_opt_id(row: &libsql::Row, idx: i32) -> Result<Option<i64>, DatabaseError> {
    match row.get_value(idx)? {
        Value::Null | Value::Integer(0) => Ok(None),
        Value::Integer(i) => Ok(Some(i)),
        Value::Text(t) if t.trim().is_empty() => Ok(None),
        Value::Text(t) => t
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Column {idx}: '{t}' is not an id: {e}"))),
        other => Err(DatabaseError::Query(format!(
            "Column {idx}: expected an id, got {other:?}"
        ))),
    }
}

/// Run a `SELECT COUNT(*) ...` style query and return the first column.
pub(crate) async fn query_count(
    conn: &libsql::Connection,
    sql: &str,
    params: impl IntoParams,
) -> Result<i64, DatabaseError> {
    let mut rows = conn.query(sql, params).await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<Option<i64>>(0)?.unwrap_or(0))
}
