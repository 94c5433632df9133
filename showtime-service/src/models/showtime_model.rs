use chrono::{NaiveDate, NaiveTime};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use shared::error::AppError;
use shared::utils::{hhmm, serialize_object_id};

/// Authoritative showtime record. The same struct is stored in the
/// `showtimes` collection and returned on the wire; ids serialize as hex.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Showtime {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub movie_id: String,
    pub cinema_id: String,
    pub screen_number: String,
    pub show_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub price: f64,
    pub total_seats: i32,
    pub available_seats: i32,
}

impl Showtime {
    /// Field-level checks applied before any store access. The date window is
    /// validated separately since it depends on the current day.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.movie_id.is_empty() {
            return Err(AppError::Validation("movie id is required".to_string()));
        }
        if self.cinema_id.is_empty() {
            return Err(AppError::Validation("cinema id is required".to_string()));
        }
        if self.screen_number.is_empty() {
            return Err(AppError::Validation("screen number is required".to_string()));
        }
        if self.price <= 0.0 {
            return Err(AppError::Validation("price must be positive".to_string()));
        }
        if self.total_seats <= 0 {
            return Err(AppError::Validation(
                "total seats must be positive".to_string(),
            ));
        }
        if self.available_seats < 0 || self.available_seats > self.total_seats {
            return Err(AppError::Validation(
                "available seats must be between 0 and total seats".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Showtime {
        Showtime {
            id: None,
            movie_id: "64f0c6a2e4b0a1b2c3d4e5f6".to_string(),
            cinema_id: "64f0c6a2e4b0a1b2c3d4e5f7".to_string(),
            screen_number: "3".to_string(),
            show_date: "2026-08-30".parse().unwrap(),
            start_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            price: 12.5,
            total_seats: 100,
            available_seats: 100,
        }
    }

    #[test]
    fn valid_showtime_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_price_and_seats() {
        let mut s = sample();
        s.price = 0.0;
        assert!(matches!(s.validate(), Err(AppError::Validation(_))));

        let mut s = sample();
        s.total_seats = 0;
        assert!(matches!(s.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_available_outside_total() {
        let mut s = sample();
        s.available_seats = 101;
        assert!(matches!(s.validate(), Err(AppError::Validation(_))));

        let mut s = sample();
        s.available_seats = -1;
        assert!(matches!(s.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn wire_format_uses_camel_case_and_hhmm() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["showDate"], "2026-08-30");
        assert_eq!(json["startTime"], "19:30");
        assert_eq!(json["availableSeats"], 100);
        assert!(json.get("_id").is_none());
    }
}
