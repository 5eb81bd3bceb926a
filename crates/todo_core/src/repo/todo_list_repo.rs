//! To-do list repository contract and SQLite implementation.
//!
//! # Invariants
//! - Returned lists always carry their full item collection.
//! - Deleting a list deletes its items in the same transaction; no orphaned
//!   item survives a committed delete.

use super::todo_item_repo::load_items_for_list;
use super::{
    ensure_tables_ready, is_foreign_key_violation, like_contains_pattern, millis_to_datetime,
    EntityKind, RepoError, RepoResult,
};
use crate::model::todo_list::{ListId, TodoList, TodoListDraft, TodoListPatch};
use crate::model::user::UserId;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const LIST_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    name,
    created_at
FROM todo_lists";

/// Repository interface for list CRUD and search operations.
pub trait TodoListRepository {
    fn create_list(&self, draft: &TodoListDraft) -> RepoResult<TodoList>;
    fn get_list(&self, id: ListId) -> RepoResult<Option<TodoList>>;
    fn list_exists(&self, id: ListId) -> RepoResult<bool>;
    fn lists_for_user(&self, user_id: UserId) -> RepoResult<Vec<TodoList>>;
    fn update_list(&self, id: ListId, patch: &TodoListPatch) -> RepoResult<TodoList>;
    /// Deletes the list and its items; returns the number of items removed.
    fn delete_list(&self, id: ListId) -> RepoResult<usize>;
    /// Lists whose name contains `needle` (case-insensitive).
    fn search_lists(&self, needle: &str) -> RepoResult<Vec<TodoList>>;
}

/// SQLite-backed list repository.
pub struct SqliteTodoListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoListRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables_ready(conn, &["users", "todo_lists", "todo_items"])?;
        Ok(Self { conn })
    }
}

impl TodoListRepository for SqliteTodoListRepository<'_> {
    fn create_list(&self, draft: &TodoListDraft) -> RepoResult<TodoList> {
        draft.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO todo_lists (user_id, name) VALUES (?1, ?2);",
            params![draft.user_id, draft.name.as_str()],
        );
        match inserted {
            Ok(_) => {}
            Err(err) if is_foreign_key_violation(&err) => {
                return Err(RepoError::MissingReference {
                    entity: EntityKind::User,
                    id: draft.user_id,
                });
            }
            Err(err) => return Err(err.into()),
        }

        let id = self.conn.last_insert_rowid();
        fetch_list(self.conn, id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::TodoList,
            id,
        })
    }

    fn get_list(&self, id: ListId) -> RepoResult<Option<TodoList>> {
        fetch_list(self.conn, id)
    }

    fn list_exists(&self, id: ListId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM todo_lists WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn lists_for_user(&self, user_id: UserId) -> RepoResult<Vec<TodoList>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LIST_SELECT_SQL} WHERE user_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([user_id])?;
        let mut lists = Vec::new();
        while let Some(row) = rows.next()? {
            lists.push(parse_list_row(self.conn, row)?);
        }
        Ok(lists)
    }

    fn update_list(&self, id: ListId, patch: &TodoListPatch) -> RepoResult<TodoList> {
        patch.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut list = fetch_list(&tx, id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::TodoList,
            id,
        })?;
        patch.apply_to(&mut list);

        tx.execute(
            "UPDATE todo_lists SET name = ?2 WHERE id = ?1;",
            params![id, list.name.as_str()],
        )?;
        tx.commit()?;

        Ok(list)
    }

    fn delete_list(&self, id: ListId) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let items_removed = tx.execute("DELETE FROM todo_items WHERE list_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM todo_lists WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::TodoList,
                id,
            });
        }
        tx.commit()?;

        Ok(items_removed)
    }

    fn search_lists(&self, needle: &str) -> RepoResult<Vec<TodoList>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LIST_SELECT_SQL}
             WHERE casefold(name) LIKE casefold(?1) ESCAPE '\\'
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([like_contains_pattern(needle)])?;
        let mut lists = Vec::new();
        while let Some(row) = rows.next()? {
            lists.push(parse_list_row(self.conn, row)?);
        }
        Ok(lists)
    }
}

fn fetch_list(conn: &Connection, id: ListId) -> RepoResult<Option<TodoList>> {
    let mut stmt = conn.prepare(&format!("{LIST_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_list_row(conn, row)?)),
        None => Ok(None),
    }
}

fn parse_list_row(conn: &Connection, row: &Row<'_>) -> RepoResult<TodoList> {
    let id: ListId = row.get("id")?;
    let created_at: i64 = row.get("created_at")?;
    Ok(TodoList {
        id,
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        created_at: millis_to_datetime("todo_lists.created_at", created_at)?,
        items: load_items_for_list(conn, id)?,
    })
}
