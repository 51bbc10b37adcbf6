//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    auth::DEFAULT_COOKIE_DURATION,
    stores::{CategoryStore, ExpenseStore, UserStore},
};

/// The state of the web server.
///
/// The stores are type parameters so that handlers only depend on the store
/// traits. See [SQLAppState](crate::stores::sqlite::SQLAppState) for the
/// SQLite backed state used by the server.
#[derive(Debug, Clone)]
pub struct AppState<C, E, U> {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,

    /// The store for budget categories.
    pub category_store: C,

    /// The store for expenses.
    pub expense_store: E,

    /// The store for users.
    pub user_store: U,
}

impl<C, E, U> AppState<C, E, U>
where
    C: CategoryStore + Clone + Send + Sync,
    E: ExpenseStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    /// Create a new [AppState] with the default cookie duration.
    pub fn new(
        cookie_secret: &str,
        local_timezone: &str,
        category_store: C,
        expense_store: E,
        user_store: U,
    ) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            local_timezone: local_timezone.to_owned(),
            category_store,
            expense_store,
            user_store,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl<C, E, U> FromRef<AppState<C, E, U>> for Key {
    fn from_ref(state: &AppState<C, E, U>) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

#[cfg(test)]
mod app_state_tests {
    use crate::{auth::DEFAULT_COOKIE_DURATION, stores::sqlite::create_app_state};

    use super::create_cookie_key;

    #[test]
    fn same_secret_gives_same_key() {
        assert_eq!(
            create_cookie_key("foobar").master(),
            create_cookie_key("foobar").master()
        );
        assert_ne!(
            create_cookie_key("foobar").master(),
            create_cookie_key("barfoo").master()
        );
    }

    #[test]
    fn sqlite_state_has_defaults() {
        let connection = rusqlite::Connection::open_in_memory().unwrap();

        let state = create_app_state(connection, "foobar", "Asia/Kolkata").unwrap();

        assert_eq!(state.cookie_duration, DEFAULT_COOKIE_DURATION);
        assert_eq!(state.local_timezone, "Asia/Kolkata");
    }
}
