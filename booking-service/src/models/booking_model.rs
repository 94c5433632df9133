use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use shared::error::AppError;
use shared::utils::serialize_object_id;

/// Immutable record of seats reserved against one showtime. Created once by
/// the booking workflow; the id and bookingTime are always server-assigned.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub cinema_id: String,
    pub movie_id: String,
    pub showtime_id: String,
    pub seats_booked: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_time: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.user_id.is_empty() {
            return Err(AppError::Validation("user id is required".to_string()));
        }
        if self.cinema_id.is_empty() {
            return Err(AppError::Validation("cinema id is required".to_string()));
        }
        if self.movie_id.is_empty() {
            return Err(AppError::Validation("movie id is required".to_string()));
        }
        if self.showtime_id.is_empty() {
            return Err(AppError::Validation("showtime id is required".to_string()));
        }
        if self.seats_booked <= 0 {
            return Err(AppError::Validation(
                "seats booked must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> Booking {
        Booking {
            id: None,
            user_id: "64f0c6a2e4b0a1b2c3d4e5f1".to_string(),
            cinema_id: "64f0c6a2e4b0a1b2c3d4e5f2".to_string(),
            movie_id: "64f0c6a2e4b0a1b2c3d4e5f3".to_string(),
            showtime_id: "64f0c6a2e4b0a1b2c3d4e5f4".to_string(),
            seats_booked: 2,
            booking_time: None,
        }
    }

    #[test]
    fn valid_booking_passes() {
        assert!(booking().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_seats() {
        let mut b = booking();
        b.seats_booked = 0;
        assert!(matches!(b.validate(), Err(AppError::Validation(_))));
        b.seats_booked = -3;
        assert!(matches!(b.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_missing_references() {
        let mut b = booking();
        b.showtime_id.clear();
        assert!(matches!(b.validate(), Err(AppError::Validation(_))));
    }
}
