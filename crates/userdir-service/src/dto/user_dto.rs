//! User-related DTOs.

use serde::{Deserialize, Serialize};
use userdir_core::rules::not_blank;
use userdir_core::{NewUser, User, UserId};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating or replacing a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserSchema {
    #[validate(custom(function = "not_blank"))]
    pub username: String,

    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,

    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

impl From<UserSchema> for NewUser {
    fn from(schema: UserSchema) -> Self {
        Self::new(schema.username, schema.email, schema.password)
    }
}

/// Public projection of a user. The password never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserPublic {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// A page of users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserList {
    pub users: Vec<UserPublic>,
}

impl From<Vec<User>> for UserList {
    fn from(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(UserPublic::from).collect(),
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub message: String,
}

impl Message {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Confirmation returned after a delete.
    #[must_use]
    pub fn user_deleted(id: UserId) -> Self {
        Self::new(format!("User {id} deleted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use userdir_core::ValidateExt;

    fn schema(username: &str, email: &str, password: &str) -> UserSchema {
        UserSchema {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_schema() {
        assert!(schema("Paulo", "p@x.com", "1234").validate_request().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let err = schema("Paulo", "not-an-email", "1234").validate_request().unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_blank_fields_rejected() {
        let err = schema("  ", "p@x.com", "").validate_request().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("password: must not be blank"));
        assert!(message.contains("username: must not be blank"));
    }

    #[test]
    fn test_missing_field_fails_deserialization() {
        let result: Result<UserSchema, _> =
            serde_json::from_str(r#"{"username": "Paulo", "email": "p@x.com"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_public_projection_drops_password() {
        let now = Utc::now();
        let user = User {
            id: UserId::new(1),
            username: "Paulo".to_string(),
            email: "p@x.com".to_string(),
            password: "1234".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(UserPublic::from(user)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "username": "Paulo", "email": "p@x.com"})
        );
    }

    #[test]
    fn test_user_deleted_message() {
        let json = serde_json::to_value(Message::user_deleted(UserId::new(7))).unwrap();
        assert_eq!(json, serde_json::json!({"message": "User 7 deleted"}));
    }
}
