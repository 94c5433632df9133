use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Database,
};
use serde::Deserialize;

use shared::error::AppError;
use shared::utils::parse_object_id;

use crate::models::movie_model::Movie;

pub(crate) const COLLECTION: &str = "movies";

#[derive(Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// Characters with meaning in MongoDB `$regex` patterns, escaped so a title
/// search treats the query as a literal substring.
pub(crate) fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if "\\^$.|?*+()[]{}".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive literal-substring match on the title field.
pub(crate) fn title_filter(query: &str) -> Document {
    doc! {
        "title": {"$regex": escape_regex(query), "$options": "i"}
    }
}

pub async fn get_all_movies(
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = db.collection::<Movie>(COLLECTION);
    let mut cursor = movies.find(None, None).await?;

    let mut result = Vec::new();
    while let Some(movie) = cursor.try_next().await? {
        result.push(movie);
    }
    Ok(Json(result))
}

pub async fn search_movies(
    Query(params): Query<SearchQuery>,
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = db.collection::<Movie>(COLLECTION);
    let mut cursor = movies.find(title_filter(&params.query), None).await?;

    let mut result = Vec::new();
    while let Some(movie) = cursor.try_next().await? {
        result.push(movie);
    }
    Ok(Json(result))
}

pub async fn get_movie_by_id(
    Path(id_str): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<Json<Movie>, AppError> {
    let id = parse_object_id(&id_str)?;
    let movies = db.collection::<Movie>(COLLECTION);

    match movies.find_one(doc! {"_id": id}, None).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(AppError::NotFound(format!(
            "Movie not found with id: {}",
            id_str
        ))),
    }
}

pub async fn get_movies_by_cinema_id(
    Path(cinema_id): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = db.collection::<Movie>(COLLECTION);
    let mut cursor = movies.find(doc! {"cinemaId": &cinema_id}, None).await?;

    let mut result = Vec::new();
    while let Some(movie) = cursor.try_next().await? {
        result.push(movie);
    }
    Ok(Json(result))
}
