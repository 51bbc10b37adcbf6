//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    auth::UserID,
    category::{Category, CategoryId, CategoryName, NewCategory},
    db::{CreateTable, MapRow},
    stores::CategoryStore,
};

use super::lock;

/// Creates, retrieves and deletes budget categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const SELECT_CATEGORY: &str =
    "SELECT id, name, total_budget, icon, color, user_id, created_at FROM category";

impl CategoryStore for SQLiteCategoryStore {
    fn create(&self, category: NewCategory) -> Result<Category, Error> {
        let connection = lock(&self.connection)?;

        connection.execute(
            "INSERT INTO category (name, total_budget, icon, color, user_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                category.name.as_ref(),
                category.total_budget,
                &category.icon,
                &category.color,
                category.user_id.as_i64(),
                OffsetDateTime::now_utc(),
            ),
        )?;

        let id = connection.last_insert_rowid();

        connection
            .prepare(&format!("{SELECT_CATEGORY} WHERE id = ?1"))?
            .query_row([id], SQLiteCategoryStore::map_row)
            .map_err(|error| error.into())
    }

    fn get(&self, category_id: CategoryId, user_id: UserID) -> Result<Category, Error> {
        lock(&self.connection)?
            .prepare(&format!("{SELECT_CATEGORY} WHERE id = ?1 AND user_id = ?2"))?
            .query_row((category_id, user_id.as_i64()), SQLiteCategoryStore::map_row)
            .map_err(|error| error.into())
    }

    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Category>, Error> {
        lock(&self.connection)?
            .prepare(&format!(
                "{SELECT_CATEGORY} WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
            ))?
            .query_map([user_id.as_i64()], SQLiteCategoryStore::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// # Errors
    ///
    /// The foreign key from `expense.category_id` makes SQLite refuse the
    /// delete while expenses exist, which surfaces as [Error::CategoryHasExpenses].
    fn delete(&self, category_id: CategoryId, user_id: UserID) -> Result<(), Error> {
        let rows_affected = lock(&self.connection)?
            .execute(
                "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
                (category_id, user_id.as_i64()),
            )
            .map_err(|error| match error {
                // Code 787 occurs when a FOREIGN KEY constraint failed.
                rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                    Error::CategoryHasExpenses
                }
                error => error.into(),
            })?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingCategory);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                total_budget REAL NOT NULL,
                icon TEXT NOT NULL,
                color TEXT NOT NULL,
                user_id INTEGER NOT NULL REFERENCES user(id),
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id);",
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_name: String = row.get(offset + 1)?;

        Ok(Category {
            id: row.get(offset)?,
            name: CategoryName::new_unchecked(&raw_name),
            total_budget: row.get(offset + 2)?,
            icon: row.get(offset + 3)?,
            color: row.get(offset + 4)?,
            user_id: UserID::new(row.get(offset + 5)?),
            created_at: row.get(offset + 6)?,
        })
    }
}
