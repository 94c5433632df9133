use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use shared::error::AppError;
use shared::utils::{is_valid_email, serialize_object_id};

/// Role tag only. Nothing enforces access control off this field; a
/// cinema-admin is just a user that carries its cinema's id.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    #[serde(rename = "CUSTOMER")]
    Customer,
    #[serde(rename = "CINEMA_ADMIN")]
    CinemaAdmin,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cinema_id: Option<String>,
}

impl User {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("email must be valid".to_string()));
        }
        if self.phone.is_empty() {
            return Err(AppError::Validation("phone is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: None,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: "555-0100".to_string(),
            user_type: UserType::Customer,
            cinema_id: None,
        }
    }

    #[test]
    fn valid_user_passes() {
        assert!(user().validate().is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        let mut u = user();
        u.email = "not-an-email".to_string();
        assert!(matches!(u.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn role_serializes_as_screaming_case() {
        let mut u = user();
        u.user_type = UserType::CinemaAdmin;
        u.cinema_id = Some("64f0c6a2e4b0a1b2c3d4e5f7".to_string());

        let json = serde_json::to_value(&u).unwrap();
        assert_eq!(json["userType"], "CINEMA_ADMIN");
        assert_eq!(json["cinemaId"], "64f0c6a2e4b0a1b2c3d4e5f7");
    }
}
