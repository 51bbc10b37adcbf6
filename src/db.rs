//! Traits shared by the SQLite stores and the function that creates the schema.

use rusqlite::{Connection, Row, TransactionBehavior};

use crate::{
    Error,
    stores::sqlite::{SQLiteCategoryStore, SQLiteExpenseStore, SQLiteUserStore},
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table (and any indexes) if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping a [Row] to a concrete rust type.
///
/// # Examples
/// ```
/// use rusqlite::{Connection, Row};
///
/// use budget_planner::db::MapRow;
///
/// struct Foo {
///     id: i64,
///     desc: String,
/// }
///
/// impl MapRow for Foo {
///     type ReturnType = Self;
///
///     fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self, rusqlite::Error> {
///         Ok(Self {
///             id: row.get(offset)?,
///             desc: row.get(offset + 1)?,
///         })
///     }
/// }
///
/// let connection = Connection::open_in_memory().unwrap();
/// let foo = connection
///     .query_row("SELECT 1, 'one'", [], Foo::map_row)
///     .unwrap();
///
/// assert_eq!(foo.id, 1);
/// assert_eq!(foo.desc, "one");
/// ```
pub trait MapRow {
    /// The type built from a row.
    type ReturnType;

    /// Convert a row whose columns are in table order, starting at column 0.
    ///
    /// # Errors
    /// Returns an error if a column cannot be converted or does not exist.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row whose columns are in table order, starting at column `offset`.
    ///
    /// Useful for joins, where one row holds the columns of two tables.
    ///
    /// # Errors
    /// Returns an error if a column cannot be converted or does not exist.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Create the tables for users, categories and expenses.
///
/// Foreign keys are switched on for `connection`, which is what stops a
/// category from being deleted while expenses still reference it.
///
/// # Errors
/// Returns an error if the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    SQLiteUserStore::create_table(&transaction)?;
    SQLiteCategoryStore::create_table(&transaction)?;
    SQLiteExpenseStore::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
