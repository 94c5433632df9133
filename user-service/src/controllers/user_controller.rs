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

use crate::models::user_model::User;

const COLLECTION: &str = "users";

pub async fn create_user(
    Extension(db): Extension<Database>,
    Json(mut user): Json<User>,
) -> Result<(StatusCode, Json<User>), AppError> {
    user.validate()?;

    user.id = None;
    let users = db.collection::<User>(COLLECTION);
    let inserted = users.insert_one(&user, None).await?;
    user.id = inserted.inserted_id.as_object_id();

    info!("created user {}", user.email);
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_all_users(Extension(db): Extension<Database>) -> Result<Json<Vec<User>>, AppError> {
    let users = db.collection::<User>(COLLECTION);
    let mut cursor = users.find(None, None).await?;

    let mut result = Vec::new();
    while let Some(user) = cursor.try_next().await? {
        result.push(user);
    }
    Ok(Json(result))
}

pub async fn get_user_by_id(
    Path(id_str): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<Json<User>, AppError> {
    let id = parse_object_id(&id_str)?;
    let users = db.collection::<User>(COLLECTION);

    match users.find_one(doc! {"_id": id}, None).await? {
        Some(user) => Ok(Json(user)),
        None => Err(AppError::NotFound(format!(
            "User not found with id: {}",
            id_str
        ))),
    }
}

pub async fn update_user(
    Path(id_str): Path<String>,
    Extension(db): Extension<Database>,
    Json(mut user): Json<User>,
) -> Result<Json<User>, AppError> {
    let id = parse_object_id(&id_str)?;
    user.validate()?;

    let users = db.collection::<User>(COLLECTION);

    user.id = None;
    let result = users.replace_one(doc! {"_id": id}, &user, None).await?;
    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!(
            "User not found with id: {}",
            id_str
        )));
    }

    user.id = Some(id);
    Ok(Json(user))
}

pub async fn delete_user(
    Path(id_str): Path<String>,
    Extension(db): Extension<Database>,
) -> Result<StatusCode, AppError> {
    let id = parse_object_id(&id_str)?;
    let users = db.collection::<User>(COLLECTION);

    let result = users.delete_one(doc! {"_id": id}, None).await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound(format!(
            "User not found with id: {}",
            id_str
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
