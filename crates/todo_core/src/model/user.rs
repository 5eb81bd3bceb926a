//! User entity.
//!
//! # Invariants
//! - `username` is unique across all users.
//! - `password_hash` is an opaque credential string; core never inspects it.

use super::{check_required_text, normalize_required_text, ValidationError};
use chrono::NaiveDateTime;

pub type UserId = i64;

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    /// UTC, assigned by storage on insert.
    pub created_at: NaiveDateTime,
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub password_hash: String,
}

impl UserDraft {
    /// Builds a draft. `username` is trimmed; `password_hash` is kept
    /// byte-for-byte.
    pub fn new(
        username: impl AsRef<str>,
        password_hash: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let password_hash = password_hash.into();
        check_required_text("password_hash", &password_hash)?;
        Ok(Self {
            username: normalize_required_text("username", username.as_ref())?,
            password_hash,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required_text("username", &self.username)?;
        check_required_text("password_hash", &self.password_hash)
    }
}

/// Partial update for a user. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(username) = self.username.as_deref() {
            check_required_text("username", username)?;
        }
        if let Some(password_hash) = self.password_hash.as_deref() {
            check_required_text("password_hash", password_hash)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password_hash.is_none()
    }

    /// Applies present fields onto `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(password_hash) = &self.password_hash {
            user.password_hash = password_hash.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{User, UserDraft, UserPatch};
    use chrono::DateTime;

    #[test]
    fn draft_trims_username_and_rejects_blank_hash() {
        let draft = UserDraft::new(" ana ", "h1").unwrap();
        assert_eq!(draft.username, "ana");

        let err = UserDraft::new("ana", "  ").unwrap_err();
        assert_eq!(err.field, "password_hash");
    }

    #[test]
    fn draft_keeps_hash_verbatim() {
        let draft = UserDraft::new("ana", " hash== ").unwrap();
        assert_eq!(draft.password_hash, " hash== ");
    }

    #[test]
    fn patch_with_empty_string_is_invalid_not_ignored() {
        let patch = UserPatch {
            username: Some(String::new()),
            password_hash: None,
        };
        let err = patch.validate().unwrap_err();
        assert_eq!(err.field, "username");
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let created_at = DateTime::from_timestamp_millis(1_700_000_000_000)
            .unwrap()
            .naive_utc();
        let mut user = User {
            id: 7,
            username: "ana".to_string(),
            password_hash: "h1".to_string(),
            created_at,
        };
        UserPatch {
            username: None,
            password_hash: Some("h2".to_string()),
        }
        .apply_to(&mut user);

        assert_eq!(user.username, "ana");
        assert_eq!(user.password_hash, "h2");
        assert_eq!(user.created_at, created_at);
    }
}
