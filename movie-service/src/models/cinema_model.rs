use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use shared::error::AppError;
use shared::utils::serialize_object_id;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Cinema {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub name: String,
    pub location: String,
}

impl Cinema {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        if self.location.is_empty() {
            return Err(AppError::Validation("location is required".to_string()));
        }
        Ok(())
    }
}
