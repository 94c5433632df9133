use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use futures::TryStreamExt;
use mongodb::{bson::doc, Database};
use tracing::info;

use shared::error::AppError;
use shared::utils::parse_object_id;

use crate::models::cinema_model::Cinema;

const COLLECTION: &str = "cinemas";

pub async fn create_cinema(
    Extension(db): Extension<Database>,
    Json(mut cinema): Json<Cinema>,
) -> Result<(StatusCode, Json<Cinema>), AppError> {
    cinema.validate()?;

    cinema.id = None;
    let cinemas = db.collection::<Cinema>(COLLECTION);
    let inserted = cinemas.insert_one(&cinema, None).await?;
    cinema.id = inserted.inserted_id.as_object_id();

    info!("created cinema {}", cinema.name);
    Ok((StatusCode::CREATED, Json(cinema)))
}

pub async fn get_all_cinemas(
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<Cinema>>, AppError> {
    let cinemas = db.collection::<Cinema>(COLLECTION);
    let mut cursor = cinemas.find(None, None).await?;

    let mut result = Vec::new();
    while let Some(cinema) = cursor.try_next().await? {
        result.push(cinema);
    }
    Ok(Json(result))
}

pub async fn get_cinema_by_id(
    Path(id_str): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<Json<Cinema>, AppError> {
    let id = parse_object_id(&id_str)?;
    let cinemas = db.collection::<Cinema>(COLLECTION);

    match cinemas.find_one(doc! {"_id": id}, None).await? {
        Some(cinema) => Ok(Json(cinema)),
        None => Err(AppError::NotFound(format!(
            "Cinema not found with id: {}",
            id_str
        ))),
    }
}
