//! HTTP client for the showtime service.
//!
//! The booking workflow is the only cross-service caller in the system: it
//! reads a showtime snapshot, asks the store to reduce seats, and hands seats
//! back when its own persist fails.

use chrono::{NaiveDate, NaiveTime};
use reqwest::StatusCode;
use serde::Deserialize;

use shared::error::{AppError, ErrorResponse};
use shared::utils::hhmm;

/// Showtime snapshot as returned by the showtime service. Only the fields the
/// booking workflow reads; the seat count is stale the moment it arrives.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowtimeView {
    #[serde(rename = "_id")]
    pub id: String,
    pub movie_id: String,
    pub cinema_id: String,
    pub show_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub available_seats: i32,
}

pub struct ShowtimeClient {
    client: reqwest::Client,
    base_url: String,
}

impl ShowtimeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_showtime(&self, id: &str) -> Result<ShowtimeView, AppError> {
        let response = self
            .client
            .get(format!("{}/api/showtimes/{}", self.base_url, id))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("showtime service unreachable: {}", e)))?;

        match response.status() {
            StatusCode::OK => response.json::<ShowtimeView>().await.map_err(|e| {
                AppError::Upstream(format!("malformed showtime response: {}", e))
            }),
            StatusCode::NOT_FOUND => Err(AppError::NotFound(format!(
                "Showtime not found with id: {}",
                id
            ))),
            status => Err(self.error_from(status, response).await),
        }
    }

    pub async fn reduce_seats(&self, id: &str, count: i32) -> Result<(), AppError> {
        let response = self
            .client
            .put(format!("{}/api/showtimes/{}/reduce", self.base_url, id))
            .query(&[("count", count)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("showtime service unreachable: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(self.error_from(response.status(), response).await)
    }

    pub async fn release_seats(&self, id: &str, count: i32) -> Result<(), AppError> {
        let response = self
            .client
            .put(format!("{}/api/showtimes/{}/release", self.base_url, id))
            .query(&[("count", count)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("showtime service unreachable: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(self.error_from(response.status(), response).await)
    }

    /// Maps the store's error statuses back onto the shared taxonomy, keeping
    /// the remote message when the body carries one.
    async fn error_from(&self, status: StatusCode, response: reqwest::Response) -> AppError {
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => format!("showtime service returned HTTP {}", status),
        };
        match status {
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            StatusCode::CONFLICT => AppError::InsufficientSeats(message),
            StatusCode::BAD_REQUEST => AppError::Validation(message),
            _ => AppError::Upstream(message),
        }
    }
}
