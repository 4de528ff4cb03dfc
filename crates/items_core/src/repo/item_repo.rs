//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `items` table.
//! - Convert between `Item` and its row encoding (UUID text, epoch micros).
//!
//! # Invariants
//! - Every operation is a single SQL statement; a write either lands fully
//!   or leaves the table unchanged.
//! - Read paths reject rows that violate item invariants.

use crate::db::DbError;
use crate::model::item::{Item, ItemId, ItemValidationError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    status,
    created_at,
    updated_at
FROM items";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for item persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Db(DbError),
    NotFound(ItemId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
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

/// Repository interface for item CRUD operations.
pub trait ItemRepository {
    /// Inserts a new row. The caller assigns a unique `id`.
    fn create_item(&self, item: &Item) -> RepoResult<Item>;
    /// Returns every stored item.
    fn list_items(&self) -> RepoResult<Vec<Item>>;
    fn get_item(&self, id: ItemId) -> RepoResult<Item>;
    /// Overwrites the mutable columns of an existing row.
    fn update_item(&self, item: &Item) -> RepoResult<Item>;
    fn delete_item(&self, id: ItemId) -> RepoResult<()>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create_item(&self, item: &Item) -> RepoResult<Item> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO items (
                id,
                title,
                description,
                status,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                item.id.to_string(),
                item.title.as_str(),
                item.description.as_str(),
                item.status,
                item.created_at.timestamp_micros(),
                item.updated_at.timestamp_micros(),
            ],
        )?;

        Ok(item.clone())
    }

    fn list_items(&self) -> RepoResult<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} ORDER BY created_at ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Item> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;

        if let Some(row) = rows.next()? {
            return parse_item_row(row);
        }

        Err(RepoError::NotFound(id))
    }

    fn update_item(&self, item: &Item) -> RepoResult<Item> {
        item.validate()?;

        // created_at is read back rather than trusted from the caller.
        let stored_created_at: Option<i64> = self
            .conn
            .query_row(
                "UPDATE items
                 SET
                    title = ?1,
                    description = ?2,
                    status = ?3,
                    updated_at = ?4
                 WHERE id = ?5
                 RETURNING created_at;",
                params![
                    item.title.as_str(),
                    item.description.as_str(),
                    item.status,
                    item.updated_at.timestamp_micros(),
                    item.id.to_string(),
                ],
                |row| row.get(0),
            )
            .optional()?;

        let Some(created_micros) = stored_created_at else {
            return Err(RepoError::NotFound(item.id));
        };

        Ok(Item {
            created_at: micros_to_datetime(created_micros, "created_at")?,
            ..item.clone()
        })
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in items.id"))
    })?;

    let item = Item {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        status: row.get("status")?,
        created_at: micros_to_datetime(row.get("created_at")?, "created_at")?,
        updated_at: micros_to_datetime(row.get("updated_at")?, "updated_at")?,
    };
    item.validate()?;
    Ok(item)
}

fn micros_to_datetime(micros: i64, column: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        RepoError::InvalidData(format!("timestamp `{micros}` out of range in items.{column}"))
    })
}
