//! User operations.
//!
//! # Invariants
//! - Creating a user with a taken username fails with `Conflict` and leaves
//!   the existing record untouched.
//! - Deleting a user cascades to the user's lists and items.

use super::{not_found_as, ServiceError, ServiceResult};
use crate::model::user::{User, UserDraft, UserId, UserPatch};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use log::info;

pub const USER_NOT_FOUND: &str = "User not found";
pub const USERNAME_TAKEN: &str = "Username already registered";

/// Use-case service for users.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a user after checking the username is free.
    pub fn create_user(&self, draft: &UserDraft) -> ServiceResult<User> {
        draft.validate()?;
        if self.repo.find_by_username(&draft.username)?.is_some() {
            info!("event=user_create module=service status=conflict");
            return Err(ServiceError::Conflict(USERNAME_TAKEN.to_string()));
        }

        let user = self.repo.create_user(draft).map_err(map_username_conflict)?;
        info!(
            "event=user_create module=service status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    pub fn get_user(&self, id: UserId) -> ServiceResult<User> {
        self.repo
            .get_user(id)?
            .ok_or_else(|| ServiceError::not_found(USER_NOT_FOUND))
    }

    /// Lists all users, or those whose username contains `filter`
    /// (case-insensitive). A blank filter means no filter.
    pub fn list_users(&self, filter: Option<&str>) -> ServiceResult<Vec<User>> {
        let filter = filter.map(str::trim).filter(|value| !value.is_empty());
        Ok(self.repo.list_users(filter)?)
    }

    /// Applies a presence-based partial update.
    pub fn update_user(&self, id: UserId, patch: &UserPatch) -> ServiceResult<User> {
        patch.validate()?;
        let user = not_found_as(self.repo.update_user(id, patch), USER_NOT_FOUND)
            .map_err(|err| match err {
                ServiceError::Conflict(_) => ServiceError::Conflict(USERNAME_TAKEN.to_string()),
                other => other,
            })?;
        info!(
            "event=user_update module=service status=ok user_id={} fields={}",
            id,
            changed_fields(patch)
        );
        Ok(user)
    }

    /// Deletes the user together with every list (and item) it owns.
    pub fn delete_user(&self, id: UserId) -> ServiceResult<()> {
        let lists_removed = not_found_as(self.repo.delete_user(id), USER_NOT_FOUND)?;
        info!(
            "event=user_delete module=service status=ok user_id={} lists_removed={}",
            id, lists_removed
        );
        Ok(())
    }
}

fn map_username_conflict(err: RepoError) -> ServiceError {
    match err {
        RepoError::Conflict(_) => ServiceError::Conflict(USERNAME_TAKEN.to_string()),
        other => other.into(),
    }
}

fn changed_fields(patch: &UserPatch) -> String {
    if patch.is_empty() {
        return "none".to_string();
    }
    let mut fields = Vec::new();
    if patch.username.is_some() {
        fields.push("username");
    }
    if patch.password_hash.is_some() {
        fields.push("password_hash");
    }
    fields.join(",")
}
