//! Implements a SQLite backed user store.

use std::sync::{Arc, Mutex};

use email_address::EmailAddress;
use rusqlite::{Connection, Row};

use crate::{
    Error,
    auth::{PasswordHash, User, UserID},
    db::{CreateTable, MapRow},
    stores::UserStore,
};

use super::lock;

/// Creates and retrieves users to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// # Errors
    ///
    /// Returns [Error::DuplicateEmail] if the email is taken, or
    /// [Error::SqlError] if there is some other SQL error.
    fn create(&self, email: EmailAddress, password_hash: PasswordHash) -> Result<User, Error> {
        let connection = lock(&self.connection)?;

        connection.execute(
            "INSERT INTO user (email, password) VALUES (?1, ?2)",
            (email.as_str(), password_hash.as_ref()),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User {
            id,
            email,
            password_hash,
        })
    }

    fn get(&self, id: UserID) -> Result<User, Error> {
        lock(&self.connection)?
            .prepare("SELECT id, email, password FROM user WHERE id = :id")?
            .query_row(&[(":id", &id.as_i64())], SQLiteUserStore::map_row)
            .map_err(|error| error.into())
    }

    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error> {
        lock(&self.connection)?
            .prepare("SELECT id, email, password FROM user WHERE email = :email")?
            .query_row(&[(":email", email.as_str())], SQLiteUserStore::map_row)
            .map_err(|error| error.into())
    }

    fn set_password(&self, id: UserID, password_hash: PasswordHash) -> Result<(), Error> {
        let rows_affected = lock(&self.connection)?.execute(
            "UPDATE user SET password = ?1 WHERE id = ?2",
            (password_hash.as_ref(), id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id INTEGER PRIMARY KEY,
                    email TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let raw_email: String = row.get(offset + 1)?;
        let raw_password_hash: String = row.get(offset + 2)?;

        Ok(User {
            id: UserID::new(raw_id),
            email: EmailAddress::new_unchecked(raw_email),
            password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        })
    }
}
