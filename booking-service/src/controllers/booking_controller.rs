use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use futures::TryStreamExt;
use mongodb::{bson::doc, Database};
use tracing::{error, info};

use shared::error::AppError;
use shared::utils::parse_object_id;
use shared::window::validate_show_date;

use crate::client::{ShowtimeClient, ShowtimeView};
use crate::models::booking_model::Booking;

const COLLECTION: &str = "bookings";

/// Local admission check against the showtime snapshot: date window first,
/// then seats. Both are re-checked here even though the showtime store
/// enforces its own rules; the snapshot may still be stale by the time the
/// remote decrement runs, which is why the store's conditional update has the
/// final word.
fn check_admission(
    showtime: &ShowtimeView,
    seats_requested: i32,
    today: NaiveDate,
) -> Result<(), AppError> {
    validate_show_date(showtime.show_date, today)?;
    if showtime.available_seats < seats_requested {
        return Err(AppError::InsufficientSeats(format!(
            "Not enough seats available. Available: {}",
            showtime.available_seats
        )));
    }
    Ok(())
}

/// The booking workflow, strictly ordered, no retries:
/// fetch showtime, validate window and seats against the snapshot, decrement
/// remotely, persist locally. If the persist fails after the decrement
/// succeeded, a compensating release call hands the seats back.
pub async fn create_booking(
    Extension(db): Extension<Database>,
    Extension(showtime_client): Extension<Arc<ShowtimeClient>>,
    Json(mut booking): Json<Booking>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    booking.validate()?;

    let showtime = showtime_client.fetch_showtime(&booking.showtime_id).await?;
    check_admission(&showtime, booking.seats_booked, Utc::now().date_naive())?;

    showtime_client
        .reduce_seats(&booking.showtime_id, booking.seats_booked)
        .await?;

    booking.id = None;
    booking.booking_time = Some(Utc::now());

    let bookings = db.collection::<Booking>(COLLECTION);
    let inserted = match bookings.insert_one(&booking, None).await {
        Ok(inserted) => inserted,
        Err(e) => {
            // Seats were already taken remotely; hand them back before
            // surfacing the persist failure.
            if let Err(release_err) = showtime_client
                .release_seats(&booking.showtime_id, booking.seats_booked)
                .await
            {
                error!(
                    "failed to release {} seats on showtime {} after persist failure: {}",
                    booking.seats_booked, booking.showtime_id, release_err
                );
            }
            return Err(e.into());
        }
    };
    booking.id = inserted.inserted_id.as_object_id();

    info!(
        "booked {} seats on showtime {} for user {}",
        booking.seats_booked, booking.showtime_id, booking.user_id
    );
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn get_booking_by_id(
    Path(id_str): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<Json<Booking>, AppError> {
    let id = parse_object_id(&id_str)?;
    let bookings = db.collection::<Booking>(COLLECTION);

    match bookings.find_one(doc! {"_id": id}, None).await? {
        Some(booking) => Ok(Json(booking)),
        None => Err(AppError::NotFound(format!(
            "Booking not found with id: {}",
            id_str
        ))),
    }
}

pub async fn get_bookings_by_user_id(
    Path(user_id): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = db.collection::<Booking>(COLLECTION);
    let mut cursor = bookings.find(doc! {"userId": &user_id}, None).await?;

    let mut result = Vec::new();
    while let Some(booking) = cursor.try_next().await? {
        result.push(booking);
    }
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn showtime(show_date: &str, available_seats: i32) -> ShowtimeView {
        ShowtimeView {
            id: "64f0c6a2e4b0a1b2c3d4e5f4".to_string(),
            movie_id: "64f0c6a2e4b0a1b2c3d4e5f3".to_string(),
            cinema_id: "64f0c6a2e4b0a1b2c3d4e5f2".to_string(),
            show_date: show_date.parse().unwrap(),
            start_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            available_seats,
        }
    }

    fn today() -> NaiveDate {
        "2026-08-27".parse().unwrap()
    }

    #[test]
    fn admits_within_window_and_capacity() {
        assert!(check_admission(&showtime("2026-08-30", 5), 3, today()).is_ok());
    }

    #[test]
    fn admits_boundary_dates() {
        assert!(check_admission(&showtime("2026-08-27", 5), 1, today()).is_ok());
        assert!(check_admission(&showtime("2026-09-03", 5), 1, today()).is_ok());
    }

    #[test]
    fn rejects_dates_outside_window() {
        let err = check_admission(&showtime("2026-08-26", 5), 1, today()).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
        let err = check_admission(&showtime("2026-09-04", 5), 1, today()).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
    }

    #[test]
    fn rejects_overbooking_the_snapshot() {
        let err = check_admission(&showtime("2026-08-30", 2), 3, today()).unwrap_err();
        assert!(matches!(err, AppError::InsufficientSeats(_)));
    }

    #[test]
    fn date_window_is_checked_before_seats() {
        // A stale-dated showtime fails on the date even when seats are short
        // too, matching the workflow's step order.
        let err = check_admission(&showtime("2026-08-01", 0), 3, today()).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
    }
}
