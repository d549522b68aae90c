//! Time utilities: HH:MM parsing.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Validate an optional HH:MM value; `None` and blanks pass through.
pub fn parse_optional_time(input: Option<&str>) -> AppResult<Option<NaiveTime>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_time(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidTime(s.to_string())),
    }
}
