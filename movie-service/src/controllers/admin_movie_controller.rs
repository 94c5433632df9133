use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use mongodb::{
    bson::{doc, to_bson},
    Database,
};
use tracing::info;

use shared::error::AppError;
use shared::utils::parse_object_id;

use crate::controllers::movie_controller::COLLECTION;
use crate::models::movie_model::{Movie, MovieShowtime};

pub async fn create_movie(
    Extension(db): Extension<Database>,
    Json(mut movie): Json<Movie>,
) -> Result<(StatusCode, Json<Movie>), AppError> {
    movie.validate()?;

    movie.id = None;
    let movies = db.collection::<Movie>(COLLECTION);
    let inserted = movies.insert_one(&movie, None).await?;
    movie.id = inserted.inserted_id.as_object_id();

    info!("created movie {}", movie.title);
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Full-field replace of the movie metadata. The embedded showtime list is
/// carried over from the stored document, never taken from the payload.
pub async fn update_movie(
    Path(id_str): Path<String>,
    Extension(db): Extension<Database>,
    Json(mut movie): Json<Movie>,
) -> Result<Json<Movie>, AppError> {
    let id = parse_object_id(&id_str)?;
    movie.validate()?;

    let movies = db.collection::<Movie>(COLLECTION);
    let existing = movies
        .find_one(doc! {"_id": id}, None)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie not found with id: {}", id_str)))?;

    movie.id = None;
    movie.showtimes = existing.showtimes;
    movies.replace_one(doc! {"_id": id}, &movie, None).await?;

    movie.id = Some(id);
    Ok(Json(movie))
}

pub async fn delete_movie(
    Path(id_str): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<StatusCode, AppError> {
    let id = parse_object_id(&id_str)?;
    let movies = db.collection::<Movie>(COLLECTION);

    let result = movies.delete_one(doc! {"_id": id}, None).await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound(format!(
            "Movie not found with id: {}",
            id_str
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_showtime_to_movie(
    Path(movie_id): Path<String>,
    Extension(db): Extension<Database>,
    Json(showtime): Json<MovieShowtime>,
) -> Result<Json<Movie>, AppError> {
    let id = parse_object_id(&movie_id)?;
    let movies = db.collection::<Movie>(COLLECTION);

    let mut movie = movies
        .find_one(doc! {"_id": id}, None)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie not found with id: {}", movie_id)))?;

    // Duplicate ids are a silent no-op so the call stays idempotent.
    if movie.add_showtime(showtime) {
        movies
            .update_one(
                doc! {"_id": id},
                doc! {"$set": {"showtimes": to_bson(&movie.showtimes)?}},
                None,
            )
            .await?;
    }

    Ok(Json(movie))
}

pub async fn remove_showtime_from_movie(
    Path((movie_id, showtime_id)): Path<(String, String)>,
    Extension(db): Extension<Database>,
) -> Result<Json<Movie>, AppError> {
    let id = parse_object_id(&movie_id)?;
    let movies = db.collection::<Movie>(COLLECTION);

    let mut movie = movies
        .find_one(doc! {"_id": id}, None)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie not found with id: {}", movie_id)))?;

    if movie.remove_showtime(&showtime_id) {
        movies
            .update_one(
                doc! {"_id": id},
                doc! {"$set": {"showtimes": to_bson(&movie.showtimes)?}},
                None,
            )
            .await?;
    }

    Ok(Json(movie))
}

pub async fn get_movie_showtimes(
    Path(movie_id): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<MovieShowtime>>, AppError> {
    let id = parse_object_id(&movie_id)?;
    let movies = db.collection::<Movie>(COLLECTION);

    let movie = movies
        .find_one(doc! {"_id": id}, None)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie not found with id: {}", movie_id)))?;

    Ok(Json(movie.showtimes))
}
