//! Chain timestamps: `YYYY-MM-DDTHH:MM:SS`, always UTC, no offset.

use chrono::{Duration, NaiveDateTime};

use crate::TransactionError;

/// Layout used by nodes for `time` and `expiration` fields.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a chain timestamp into Unix seconds.
pub fn parse_timestamp(s: &str) -> Result<u32, TransactionError> {
    let parsed = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| TransactionError::InvalidTimestamp(format!("{:?}: {}", s, e)))?;
    u32::try_from(parsed.and_utc().timestamp()).map_err(|_| {
        TransactionError::InvalidTimestamp(format!("{:?}: outside the 32-bit range", s))
    })
}

/// Add `seconds` to a chain timestamp and format the result.
pub fn add_seconds(s: &str, seconds: i64) -> Result<String, TransactionError> {
    let parsed = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| TransactionError::InvalidTimestamp(format!("{:?}: {}", s, e)))?;
    let shifted = parsed
        .checked_add_signed(Duration::seconds(seconds))
        .ok_or_else(|| TransactionError::InvalidTimestamp(format!("{:?}: overflow", s)))?;
    Ok(shifted.format(TIMESTAMP_FORMAT).to_string())
}
