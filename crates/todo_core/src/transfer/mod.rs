//! Transfer shapes crossing the API boundary.
//!
//! # Responsibility
//! - Define request payloads and convert them into validated drafts/patches.
//! - Define response payloads built from stored records.
//!
//! # Invariants
//! - Update payloads reject unknown fields.
//! - In update payloads a field's presence, not its value, signals a change:
//!   an absent field is untouched, `null` clears a clearable field and is
//!   rejected for a required one.
//! - Credentials never appear in a response.

use crate::model::{check_required_text, normalize_required_text, ValidationError, ValidationReason};
use serde::{Deserialize, Deserializer, Serialize};

pub mod search;
pub mod todo_item;
pub mod todo_list;
pub mod user;

/// Confirmation body returned by delete operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Deserializes a field so that a present `null` becomes `Some(None)`.
///
/// Pair with `#[serde(default)]` so an absent field stays `None`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Resolves a present-or-absent required text field of an update payload.
pub(crate) fn required_update(
    field: &'static str,
    value: Option<Option<String>>,
) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(None) => Err(ValidationError::new(field, ValidationReason::Null)),
        Some(Some(text)) => normalize_required_text(field, &text).map(Some),
    }
}

/// Like [`required_update`], but keeps the text exactly as sent.
pub(crate) fn opaque_update(
    field: &'static str,
    value: Option<Option<String>>,
) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(None) => Err(ValidationError::new(field, ValidationReason::Null)),
        Some(Some(text)) => check_required_text(field, &text).map(|()| Some(text)),
    }
}
