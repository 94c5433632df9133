use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::doc, Database};
use serde::Deserialize;
use tracing::info;

use shared::error::AppError;
use shared::utils::parse_object_id;
use shared::window::validate_show_date;

use crate::models::showtime_model::Showtime;

const COLLECTION: &str = "showtimes";

#[derive(Deserialize)]
pub struct SeatCount {
    pub count: i32,
}

pub async fn create_showtime(
    Extension(db): Extension<Database>,
    Json(mut showtime): Json<Showtime>,
) -> Result<(StatusCode, Json<Showtime>), AppError> {
    showtime.validate()?;
    validate_show_date(showtime.show_date, Utc::now().date_naive())?;

    showtime.id = None;
    let showtimes = db.collection::<Showtime>(COLLECTION);
    let inserted = showtimes.insert_one(&showtime, None).await?;
    showtime.id = inserted.inserted_id.as_object_id();

    info!(
        "created showtime for movie {} on {}",
        showtime.movie_id, showtime.show_date
    );
    Ok((StatusCode::CREATED, Json(showtime)))
}

pub async fn get_showtime_by_id(
    Path(id_str): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<Json<Showtime>, AppError> {
    let id = parse_object_id(&id_str)?;
    let showtimes = db.collection::<Showtime>(COLLECTION);

    match showtimes.find_one(doc! {"_id": id}, None).await? {
        Some(showtime) => Ok(Json(showtime)),
        None => Err(AppError::NotFound(format!(
            "Showtime not found with id: {}",
            id_str
        ))),
    }
}

pub async fn get_showtimes_by_movie_id(
    Path(movie_id): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<Showtime>>, AppError> {
    let showtimes = db.collection::<Showtime>(COLLECTION);
    let mut cursor = showtimes.find(doc! {"movieId": &movie_id}, None).await?;

    let mut result = Vec::new();
    while let Some(showtime) = cursor.try_next().await? {
        result.push(showtime);
    }
    Ok(Json(result))
}

pub async fn get_showtimes_by_cinema_id(
    Path(cinema_id): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<Showtime>>, AppError> {
    let showtimes = db.collection::<Showtime>(COLLECTION);
    let mut cursor = showtimes.find(doc! {"cinemaId": &cinema_id}, None).await?;

    let mut result = Vec::new();
    while let Some(showtime) = cursor.try_next().await? {
        result.push(showtime);
    }
    Ok(Json(result))
}

pub async fn update_showtime(
    Path(id_str): Path<String>,
    Extension(db): Extension<Database>,
    Json(mut showtime): Json<Showtime>,
) -> Result<Json<Showtime>, AppError> {
    let id = parse_object_id(&id_str)?;
    showtime.validate()?;
    validate_show_date(showtime.show_date, Utc::now().date_naive())?;

    let showtimes = db.collection::<Showtime>(COLLECTION);

    // Replacement document carries no _id, so the existing one is kept.
    showtime.id = None;
    let result = showtimes
        .replace_one(doc! {"_id": id}, &showtime, None)
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!(
            "Showtime not found with id: {}",
            id_str
        )));
    }

    showtime.id = Some(id);
    Ok(Json(showtime))
}

pub async fn delete_showtime(
    Path(id_str): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<StatusCode, AppError> {
    let id = parse_object_id(&id_str)?;
    let showtimes = db.collection::<Showtime>(COLLECTION);

    let result = showtimes.delete_one(doc! {"_id": id}, None).await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound(format!(
            "Showtime not found with id: {}",
            id_str
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Decrements `availableSeats` by `count`, but only when the live value still
/// covers the request. The filter and `$inc` run as one MongoDB document
/// update, so two racing reductions can never drive the count negative; the
/// loser observes `matched_count == 0` and gets InsufficientSeats.
pub async fn reduce_seats(
    Path(id_str): Path<String>,
    Query(params): Query<SeatCount>,
    Extension(db): Extension<Database>,
) -> Result<StatusCode, AppError> {
    let id = parse_object_id(&id_str)?;
    if params.count <= 0 {
        return Err(AppError::Validation("count must be positive".to_string()));
    }

    let showtimes = db.collection::<Showtime>(COLLECTION);
    let result = showtimes
        .update_one(
            doc! {"_id": id, "availableSeats": {"$gte": params.count}},
            doc! {"$inc": {"availableSeats": -params.count}},
            None,
        )
        .await?;

    if result.matched_count == 0 {
        return match showtimes.find_one(doc! {"_id": id}, None).await? {
            Some(showtime) => Err(AppError::InsufficientSeats(format!(
                "Not enough seats available. Available: {}",
                showtime.available_seats
            ))),
            None => Err(AppError::NotFound(format!(
                "Showtime not found with id: {}",
                id_str
            ))),
        };
    }

    info!("reduced {} seats on showtime {}", params.count, id_str);
    Ok(StatusCode::OK)
}

/// Inverse of `reduce_seats`, used by the booking service to hand seats back
/// when its local persist fails after a successful decrement. Guarded so the
/// count can never climb past `totalSeats`.
pub async fn release_seats(
    Path(id_str): Path<String>,
    Query(params): Query<SeatCount>,
    Extension(db): Extension<Database>,
) -> Result<StatusCode, AppError> {
    let id = parse_object_id(&id_str)?;
    if params.count <= 0 {
        return Err(AppError::Validation("count must be positive".to_string()));
    }

    let showtimes = db.collection::<Showtime>(COLLECTION);
    let result = showtimes
        .update_one(
            doc! {
                "_id": id,
                "$expr": {"$lte": [{"$add": ["$availableSeats", params.count]}, "$totalSeats"]},
            },
            doc! {"$inc": {"availableSeats": params.count}},
            None,
        )
        .await?;

    if result.matched_count == 0 {
        return match showtimes.find_one(doc! {"_id": id}, None).await? {
            Some(_) => Err(AppError::Validation(format!(
                "releasing {} seats would exceed total seats",
                params.count
            ))),
            None => Err(AppError::NotFound(format!(
                "Showtime not found with id: {}",
                id_str
            ))),
        };
    }

    info!("released {} seats on showtime {}", params.count, id_str);
    Ok(StatusCode::OK)
}
