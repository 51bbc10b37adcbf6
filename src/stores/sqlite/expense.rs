//! Implements a SQLite backed expense store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    auth::UserID,
    category::CategoryId,
    db::{CreateTable, MapRow},
    expense::{Expense, ExpenseId, NewExpense},
    stores::ExpenseStore,
};

use super::lock;

/// Creates, retrieves and deletes expenses to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new expense store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const SELECT_EXPENSE: &str = "SELECT id, category_id, amount, title, user_id, created_at FROM expense";

impl ExpenseStore for SQLiteExpenseStore {
    fn create(&self, expense: NewExpense) -> Result<Expense, Error> {
        let connection = lock(&self.connection)?;

        // Inserts nothing unless the category exists and belongs to the same user.
        let rows_affected = connection.execute(
            "INSERT INTO expense (category_id, amount, title, user_id, created_at)
            SELECT id, ?2, ?3, user_id, ?4 FROM category WHERE id = ?1 AND user_id = ?5",
            (
                expense.category_id,
                expense.amount,
                &expense.title,
                OffsetDateTime::now_utc(),
                expense.user_id.as_i64(),
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        let id = connection.last_insert_rowid();

        connection
            .prepare(&format!("{SELECT_EXPENSE} WHERE id = ?1"))?
            .query_row([id], SQLiteExpenseStore::map_row)
            .map_err(|error| error.into())
    }

    fn get(&self, expense_id: ExpenseId, user_id: UserID) -> Result<Expense, Error> {
        lock(&self.connection)?
            .prepare(&format!("{SELECT_EXPENSE} WHERE id = ?1 AND user_id = ?2"))?
            .query_row((expense_id, user_id.as_i64()), SQLiteExpenseStore::map_row)
            .map_err(|error| error.into())
    }

    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Expense>, Error> {
        lock(&self.connection)?
            .prepare(&format!(
                "{SELECT_EXPENSE} WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
            ))?
            .query_map([user_id.as_i64()], SQLiteExpenseStore::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect()
    }

    fn get_by_category(
        &self,
        category_id: CategoryId,
        user_id: UserID,
    ) -> Result<Vec<Expense>, Error> {
        lock(&self.connection)?
            .prepare(&format!(
                "{SELECT_EXPENSE} WHERE category_id = ?1 AND user_id = ?2 \
                ORDER BY created_at DESC, id DESC"
            ))?
            .query_map((category_id, user_id.as_i64()), SQLiteExpenseStore::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect()
    }

    fn delete(&self, expense_id: ExpenseId, user_id: UserID) -> Result<(), Error> {
        let rows_affected = lock(&self.connection)?.execute(
            "DELETE FROM expense WHERE id = ?1 AND user_id = ?2",
            (expense_id, user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingExpense);
        }

        Ok(())
    }

    fn delete_by_category(
        &self,
        category_id: CategoryId,
        user_id: UserID,
    ) -> Result<usize, Error> {
        lock(&self.connection)?
            .execute(
                "DELETE FROM expense WHERE category_id = ?1 AND user_id = ?2",
                (category_id, user_id.as_i64()),
            )
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteExpenseStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        // No ON DELETE CASCADE: a category with expenses cannot be deleted.
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY,
                category_id INTEGER NOT NULL REFERENCES category(id),
                amount REAL NOT NULL,
                title TEXT,
                user_id INTEGER NOT NULL REFERENCES user(id),
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_expense_category_id ON expense(category_id);
            CREATE INDEX IF NOT EXISTS idx_expense_user_id ON expense(user_id);",
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteExpenseStore {
    type ReturnType = Expense;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Expense {
            id: row.get(offset)?,
            category_id: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            title: row.get(offset + 3)?,
            user_id: UserID::new(row.get(offset + 4)?),
            created_at: row.get(offset + 5)?,
        })
    }
}
