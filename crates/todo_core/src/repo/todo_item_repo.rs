//! To-do item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own every SQL statement touching `todo_items`.
//! - Resolve items either by id alone or by the compound (list id, item id)
//!   key, so flat and list-scoped callers share one code path.
//!
//! # Invariants
//! - Inserting an item whose list does not exist fails with
//!   `RepoError::MissingReference` (foreign key backstop).
//! - `created_at` is never written after insert.

use super::{
    datetime_to_millis, ensure_tables_ready, is_foreign_key_violation, like_contains_pattern,
    millis_to_datetime, EntityKind, RepoError, RepoResult,
};
use crate::model::todo_item::{ItemId, TodoItem, TodoItemDraft, TodoItemPatch};
use crate::model::todo_list::ListId;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};

pub(crate) const ITEM_SELECT_SQL: &str = "SELECT
    id,
    list_id,
    name,
    description,
    deadline,
    created_at
FROM todo_items";

/// Lookup key for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemKey {
    pub id: ItemId,
    /// When set, the item must also belong to this list.
    pub list_id: Option<ListId>,
}

impl ItemKey {
    pub fn by_id(id: ItemId) -> Self {
        Self { id, list_id: None }
    }

    pub fn in_list(list_id: ListId, id: ItemId) -> Self {
        Self {
            id,
            list_id: Some(list_id),
        }
    }
}

/// Which columns a substring search inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSearchScope {
    Name,
    NameOrDescription,
}

/// Repository interface for item CRUD and search operations.
pub trait TodoItemRepository {
    fn create_item(&self, draft: &TodoItemDraft) -> RepoResult<TodoItem>;
    fn get_item(&self, key: ItemKey) -> RepoResult<Option<TodoItem>>;
    /// Lists items of one list, or all items when `list_id` is `None`.
    fn list_items(&self, list_id: Option<ListId>) -> RepoResult<Vec<TodoItem>>;
    fn update_item(&self, key: ItemKey, patch: &TodoItemPatch) -> RepoResult<TodoItem>;
    fn delete_item(&self, key: ItemKey) -> RepoResult<()>;
    fn search_items(&self, needle: &str, scope: ItemSearchScope) -> RepoResult<Vec<TodoItem>>;
}

/// SQLite-backed item repository.
pub struct SqliteTodoItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoItemRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables_ready(conn, &["todo_lists", "todo_items"])?;
        Ok(Self { conn })
    }
}

impl TodoItemRepository for SqliteTodoItemRepository<'_> {
    fn create_item(&self, draft: &TodoItemDraft) -> RepoResult<TodoItem> {
        draft.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO todo_items (list_id, name, description, deadline)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.list_id,
                draft.name.as_str(),
                draft.description.as_deref(),
                draft.deadline.map(datetime_to_millis),
            ],
        );
        match inserted {
            Ok(_) => {}
            Err(err) if is_foreign_key_violation(&err) => {
                return Err(RepoError::MissingReference {
                    entity: EntityKind::TodoList,
                    id: draft.list_id,
                });
            }
            Err(err) => return Err(err.into()),
        }

        let id = self.conn.last_insert_rowid();
        fetch_item(self.conn, ItemKey::by_id(id))?.ok_or(RepoError::NotFound {
            entity: EntityKind::TodoItem,
            id,
        })
    }

    fn get_item(&self, key: ItemKey) -> RepoResult<Option<TodoItem>> {
        fetch_item(self.conn, key)
    }

    fn list_items(&self, list_id: Option<ListId>) -> RepoResult<Vec<TodoItem>> {
        match list_id {
            Some(list_id) => load_items_for_list(self.conn, list_id),
            None => query_items(
                self.conn,
                &format!("{ITEM_SELECT_SQL} ORDER BY id ASC;"),
                Vec::new(),
            ),
        }
    }

    fn update_item(&self, key: ItemKey, patch: &TodoItemPatch) -> RepoResult<TodoItem> {
        patch.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut item = fetch_item(&tx, key)?.ok_or(RepoError::NotFound {
            entity: EntityKind::TodoItem,
            id: key.id,
        })?;
        patch.apply_to(&mut item);

        tx.execute(
            "UPDATE todo_items
             SET
                name = ?2,
                description = ?3,
                deadline = ?4
             WHERE id = ?1;",
            params![
                item.id,
                item.name.as_str(),
                item.description.as_deref(),
                item.deadline.map(datetime_to_millis),
            ],
        )?;
        tx.commit()?;

        Ok(item)
    }

    fn delete_item(&self, key: ItemKey) -> RepoResult<()> {
        let changed = match key.list_id {
            Some(list_id) => self.conn.execute(
                "DELETE FROM todo_items WHERE id = ?1 AND list_id = ?2;",
                params![key.id, list_id],
            )?,
            None => self
                .conn
                .execute("DELETE FROM todo_items WHERE id = ?1;", [key.id])?,
        };

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::TodoItem,
                id: key.id,
            });
        }

        Ok(())
    }

    fn search_items(&self, needle: &str, scope: ItemSearchScope) -> RepoResult<Vec<TodoItem>> {
        let predicate = match scope {
            ItemSearchScope::Name => "casefold(name) LIKE casefold(?1) ESCAPE '\\'",
            ItemSearchScope::NameOrDescription => {
                "(casefold(name) LIKE casefold(?1) ESCAPE '\\'
                 OR casefold(description) LIKE casefold(?1) ESCAPE '\\')"
            }
        };
        query_items(
            self.conn,
            &format!("{ITEM_SELECT_SQL} WHERE {predicate} ORDER BY id ASC;"),
            vec![Value::Text(like_contains_pattern(needle))],
        )
    }
}

/// Loads all items of one list ordered by id.
pub(crate) fn load_items_for_list(conn: &Connection, list_id: ListId) -> RepoResult<Vec<TodoItem>> {
    query_items(
        conn,
        &format!("{ITEM_SELECT_SQL} WHERE list_id = ?1 ORDER BY id ASC;"),
        vec![Value::Integer(list_id)],
    )
}

fn fetch_item(conn: &Connection, key: ItemKey) -> RepoResult<Option<TodoItem>> {
    let mut sql = format!("{ITEM_SELECT_SQL} WHERE id = ?");
    let mut bind_values = vec![Value::Integer(key.id)];
    if let Some(list_id) = key.list_id {
        sql.push_str(" AND list_id = ?");
        bind_values.push(Value::Integer(list_id));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_item_row(row)?)),
        None => Ok(None),
    }
}

fn query_items(conn: &Connection, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<TodoItem>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse_item_row(row)?);
    }
    Ok(items)
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<TodoItem> {
    let created_at: i64 = row.get("created_at")?;
    let deadline = match row.get::<_, Option<i64>>("deadline")? {
        Some(value) => Some(millis_to_datetime("todo_items.deadline", value)?),
        None => None,
    };

    Ok(TodoItem {
        id: row.get("id")?,
        list_id: row.get("list_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        deadline,
        created_at: millis_to_datetime("todo_items.created_at", created_at)?,
    })
}
