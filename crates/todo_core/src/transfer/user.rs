use super::{opaque_update, present, required_update};
use crate::model::user::{User, UserDraft, UserId, UserPatch};
use crate::model::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Body of `POST /users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}

impl CreateUser {
    pub fn into_draft(self) -> Result<UserDraft, ValidationError> {
        UserDraft::new(self.username, self.password_hash)
    }
}

/// Body of `PUT /users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUser {
    #[serde(default, deserialize_with = "present")]
    pub username: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub password_hash: Option<Option<String>>,
}

impl UpdateUser {
    pub fn into_patch(self) -> Result<UserPatch, ValidationError> {
        Ok(UserPatch {
            username: required_update("username", self.username)?,
            password_hash: opaque_update("password_hash", self.password_hash)?,
        })
    }
}

/// Query string of `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserFilter {
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            username: value.username,
            created_at: value.created_at,
        }
    }
}
