//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Isolate SQLite query details from service orchestration.
//! - Translate constraint failures into semantic errors.
//!
//! # Invariants
//! - Write paths validate drafts/patches before SQL mutations.
//! - Multi-statement writes (read-modify-write updates, cascading deletes)
//!   run inside one `IMMEDIATE` transaction.
//! - Result sets are ordered by ascending id.

use crate::db::DbError;
use crate::model::ValidationError;
use chrono::{DateTime, NaiveDateTime};
use rusqlite::{ffi, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod todo_item_repo;
pub mod todo_list_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity named in repository errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    TodoList,
    TodoItem,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::User => "user",
            Self::TodoList => "to-do list",
            Self::TodoItem => "to-do item",
        };
        f.write_str(label)
    }
}

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// No row matched the given key.
    NotFound { entity: EntityKind, id: i64 },
    /// A referenced parent row does not exist (foreign key violation).
    MissingReference { entity: EntityKind, id: i64 },
    /// A unique column already holds the value.
    Conflict(String),
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::MissingReference { entity, id } => {
                write!(f, "referenced {entity} does not exist: {id}")
            }
            Self::Conflict(message) => write!(f, "{message}"),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Builds a `LIKE ... ESCAPE '\'` pattern matching `needle` as a literal
/// substring.
pub(crate) fn like_contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn datetime_to_millis(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp_millis()
}

pub(crate) fn millis_to_datetime(column: &str, value: i64) -> RepoResult<NaiveDateTime> {
    DateTime::from_timestamp_millis(value)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| RepoError::InvalidData(format!("timestamp `{value}` out of range in {column}")))
}

/// Returns true when `err` is the given extended constraint code.
pub(crate) fn is_constraint(err: &rusqlite::Error, extended_code: i32) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(failure, _) if failure.extended_code == extended_code)
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    is_constraint(err, ffi::SQLITE_CONSTRAINT_UNIQUE)
}

pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    is_constraint(err, ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}

pub(crate) fn ensure_tables_ready(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    for table in tables {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::{datetime_to_millis, like_contains_pattern, millis_to_datetime};

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_contains_pattern("milk"), "%milk%");
        assert_eq!(like_contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn millis_conversion_preserves_instant() {
        let value = millis_to_datetime("t", 1_700_000_000_123).unwrap();
        assert_eq!(datetime_to_millis(value), 1_700_000_000_123);
    }

    #[test]
    fn out_of_range_millis_is_invalid_data() {
        assert!(millis_to_datetime("todo_items.deadline", i64::MAX).is_err());
    }
}
