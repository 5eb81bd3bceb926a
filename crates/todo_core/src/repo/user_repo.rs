//! User repository contract and SQLite implementation.
//!
//! # Invariants
//! - Username uniqueness is backed by the `users.username` UNIQUE constraint;
//!   a violation surfaces as `RepoError::Conflict` on insert and on update.
//! - Deleting a user removes the user's lists and their items in the same
//!   transaction.

use super::{
    ensure_tables_ready, is_unique_violation, like_contains_pattern, millis_to_datetime,
    EntityKind, RepoError, RepoResult,
};
use crate::model::user::{User, UserDraft, UserId, UserPatch};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    password_hash,
    created_at
FROM users";

/// Repository interface for user CRUD operations.
pub trait UserRepository {
    fn create_user(&self, draft: &UserDraft) -> RepoResult<User>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    /// Lists users, optionally narrowed to usernames containing `filter`
    /// (case-insensitive).
    fn list_users(&self, filter: Option<&str>) -> RepoResult<Vec<User>>;
    fn update_user(&self, id: UserId, patch: &UserPatch) -> RepoResult<User>;
    /// Deletes the user and everything it owns; returns the number of lists removed.
    fn delete_user(&self, id: UserId) -> RepoResult<usize>;
    fn user_exists(&self, id: UserId) -> RepoResult<bool>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables_ready(conn, &["users"])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, draft: &UserDraft) -> RepoResult<User> {
        draft.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2);",
            params![draft.username.as_str(), draft.password_hash.as_str()],
        );
        match inserted {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(username_conflict(&draft.username));
            }
            Err(err) => return Err(err.into()),
        }

        let id = self.conn.last_insert_rowid();
        fetch_user(self.conn, id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::User,
            id,
        })
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        fetch_user(self.conn, id)
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE username = ?1;"))?;
        let mut rows = stmt.query([username])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_user_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_users(&self, filter: Option<&str>) -> RepoResult<Vec<User>> {
        let mut users = Vec::new();
        match filter {
            Some(needle) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{USER_SELECT_SQL}
                     WHERE casefold(username) LIKE casefold(?1) ESCAPE '\\'
                     ORDER BY id ASC;"
                ))?;
                let mut rows = stmt.query([like_contains_pattern(needle)])?;
                while let Some(row) = rows.next()? {
                    users.push(parse_user_row(row)?);
                }
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    users.push(parse_user_row(row)?);
                }
            }
        }
        Ok(users)
    }

    fn update_user(&self, id: UserId, patch: &UserPatch) -> RepoResult<User> {
        patch.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut user = fetch_user(&tx, id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::User,
            id,
        })?;
        patch.apply_to(&mut user);

        let updated = tx.execute(
            "UPDATE users
             SET
                username = ?2,
                password_hash = ?3
             WHERE id = ?1;",
            params![id, user.username.as_str(), user.password_hash.as_str()],
        );
        match updated {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(username_conflict(&user.username));
            }
            Err(err) => return Err(err.into()),
        }
        tx.commit()?;

        Ok(user)
    }

    fn delete_user(&self, id: UserId) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "DELETE FROM todo_items
             WHERE list_id IN (SELECT id FROM todo_lists WHERE user_id = ?1);",
            [id],
        )?;
        let lists_removed = tx.execute("DELETE FROM todo_lists WHERE user_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM users WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::User,
                id,
            });
        }
        tx.commit()?;

        Ok(lists_removed)
    }

    fn user_exists(&self, id: UserId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn fetch_user(conn: &Connection, id: UserId) -> RepoResult<Option<User>> {
    let mut stmt = conn.prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_user_row(row)?)),
        None => Ok(None),
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let created_at: i64 = row.get("created_at")?;
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
        created_at: millis_to_datetime("users.created_at", created_at)?,
    })
}

fn username_conflict(username: &str) -> RepoError {
    RepoError::Conflict(format!("username `{username}` already registered"))
}
