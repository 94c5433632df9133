use chrono::{NaiveDate, NaiveTime};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use shared::error::AppError;
use shared::utils::{hhmm, serialize_object_id};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub cinema_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    pub duration: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    /// Denormalized copy of the showtime store's records, maintained only
    /// through the add/remove sub-list operations. Nothing reconciles it with
    /// the authoritative store.
    #[serde(default)]
    pub showtimes: Vec<MovieShowtime>,
}

/// Showtime entry as embedded in a movie document. The id, when present, is
/// the hex id of the authoritative record in the showtime service.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MovieShowtime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub screen_number: String,
    pub show_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub price: f64,
    pub total_seats: i32,
    pub available_seats: i32,
}

impl Movie {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.cinema_id.is_empty() {
            return Err(AppError::Validation("cinema id is required".to_string()));
        }
        if self.title.is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }
        if self.duration <= 0 {
            return Err(AppError::Validation(
                "duration must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Id-deduplicated append. Returns false (and leaves the list untouched)
    /// when an entry with the same id is already present.
    pub fn add_showtime(&mut self, showtime: MovieShowtime) -> bool {
        if let Some(id) = showtime.id.as_deref() {
            if self.showtimes.iter().any(|s| s.id.as_deref() == Some(id)) {
                return false;
            }
        }
        self.showtimes.push(showtime);
        true
    }

    /// Id-match removal; a no-op when no entry carries the id.
    pub fn remove_showtime(&mut self, showtime_id: &str) -> bool {
        let before = self.showtimes.len();
        self.showtimes
            .retain(|s| s.id.as_deref() != Some(showtime_id));
        self.showtimes.len() != before
    }
}
