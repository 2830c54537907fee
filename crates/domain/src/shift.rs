//! Shift domain types and validation rules.

use chrono::{DateTime, Utc};
use rosterly_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Unique identifier for a shift record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftId(i64);

impl ShiftId {
    /// Creates a shift identifier from a database key.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ShiftId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validates a shift's scheduled window.
pub fn validate_shift_window(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> AppResult<()> {
    if end_time <= start_time {
        return Err(AppError::Validation(
            "shift end time must be after its start time".to_owned(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn forward_window_is_accepted() {
        let start = Utc::now();
        assert!(validate_shift_window(start, start + Duration::hours(8)).is_ok());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let start = Utc::now();
        assert!(validate_shift_window(start, start - Duration::hours(1)).is_err());
    }

    #[test]
    fn zero_length_window_is_rejected() {
        let start = Utc::now();
        assert!(validate_shift_window(start, start).is_err());
    }
}
