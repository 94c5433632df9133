use chrono::{Duration, NaiveDate};

use crate::error::AppError;

/// Bookings and showtimes are only accepted for dates in
/// [today, today + MAX_DAYS_AHEAD], both ends inclusive.
pub const MAX_DAYS_AHEAD: i64 = 7;

/// `today` is passed in rather than read from the wall clock so callers stay
/// deterministic under test; handlers supply `Utc::now().date_naive()`.
pub fn validate_show_date(show_date: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    if show_date < today {
        return Err(AppError::InvalidDate(
            "show date cannot be in the past".to_string(),
        ));
    }
    if show_date > today + Duration::days(MAX_DAYS_AHEAD) {
        return Err(AppError::InvalidDate(format!(
            "show date must be within the next {} days",
            MAX_DAYS_AHEAD
        )));
    }
    Ok(())
}
