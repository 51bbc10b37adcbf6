//! SQLite implementations of the stores, plus the [AppState] alias and
//! constructor that wire them to one shared connection.

mod category;
mod expense;
mod user;

pub use category::SQLiteCategoryStore;
pub use expense::SQLiteExpenseStore;
pub use user::SQLiteUserStore;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{AppState, Error, db::initialize};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteCategoryStore, SQLiteExpenseStore, SQLiteUserStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database. `local_timezone` should be a canonical timezone
/// name, e.g. "Asia/Kolkata".
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(
    db_connection: Connection,
    cookie_secret: &str,
    local_timezone: &str,
) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        cookie_secret,
        local_timezone,
        SQLiteCategoryStore::new(connection.clone()),
        SQLiteExpenseStore::new(connection.clone()),
        SQLiteUserStore::new(connection),
    ))
}

/// Lock the shared connection, mapping a poisoned lock to [Error::DatabaseLockError].
fn lock(connection: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}

#[cfg(test)]
pub(crate) fn get_test_connection() -> Arc<Mutex<Connection>> {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    Arc::new(Mutex::new(connection))
}
