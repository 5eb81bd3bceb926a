//! Entity layer for users, to-do lists and to-do items.
//!
//! # Responsibility
//! - Define the stored records and their relationships.
//! - Define draft (create) and patch (partial update) inputs with the
//!   validation every write path must pass.
//!
//! # Invariants
//! - Ids and `created_at` are assigned by storage and never change.
//! - Required text fields are trimmed, non-empty and at most
//!   [`MAX_TEXT_CHARS`] characters.
//! - A patch field that is `None` leaves the stored value untouched; a field
//!   that is `Some(..)` replaces it, whatever the value.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod todo_item;
pub mod todo_list;
pub mod user;

/// Upper bound (in characters) for names, usernames and credential hashes.
pub const MAX_TEXT_CHARS: usize = 255;

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// Value is empty after trimming.
    Empty,
    /// Value is longer than the allowed number of characters.
    TooLong { max: usize, actual: usize },
    /// Value was explicitly `null` for a field that cannot be cleared.
    Null,
}

/// Field-level validation failure raised before any storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            ValidationReason::Empty => write!(f, "{} must not be empty", self.field),
            ValidationReason::TooLong { max, actual } => write!(
                f,
                "{} must be at most {max} characters (got {actual})",
                self.field
            ),
            ValidationReason::Null => write!(f, "{} must not be null", self.field),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and enforces the required-text rules for `field`.
pub fn normalize_required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    check_required_text(field, trimmed)?;
    Ok(trimmed.to_string())
}

/// Enforces the required-text rules without normalizing.
pub fn check_required_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, ValidationReason::Empty));
    }
    let actual = value.chars().count();
    if actual > MAX_TEXT_CHARS {
        return Err(ValidationError::new(
            field,
            ValidationReason::TooLong {
                max: MAX_TEXT_CHARS,
                actual,
            },
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{normalize_required_text, ValidationReason, MAX_TEXT_CHARS};

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(normalize_required_text("name", "  Groceries \n").unwrap(), "Groceries");
    }

    #[test]
    fn blank_required_text_is_rejected() {
        let err = normalize_required_text("name", "   ").unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.reason, ValidationReason::Empty);
        assert_eq!(err.to_string(), "name must not be empty");
    }

    #[test]
    fn length_is_counted_in_characters() {
        let at_limit = "é".repeat(MAX_TEXT_CHARS);
        assert!(normalize_required_text("name", &at_limit).is_ok());

        let over = "é".repeat(MAX_TEXT_CHARS + 1);
        let err = normalize_required_text("name", &over).unwrap_err();
        assert_eq!(
            err.reason,
            ValidationReason::TooLong {
                max: MAX_TEXT_CHARS,
                actual: MAX_TEXT_CHARS + 1
            }
        );
    }
}
