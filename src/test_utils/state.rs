//! Builders for an in-memory [SQLAppState] and the rows the handler tests need.

use std::str::FromStr;

use email_address::EmailAddress;
use rusqlite::Connection;

use crate::{
    auth::{PasswordHash, User, UserID},
    category::{Category, CategoryName, DEFAULT_COLOR, DEFAULT_ICON, NewCategory},
    expense::{Expense, NewExpense},
    stores::{
        CategoryStore, ExpenseStore, UserStore,
        sqlite::{SQLAppState, create_app_state},
    },
};

/// A password that passes the strength check.
pub(crate) const TEST_PASSWORD: &str = "marigold-tram-sixty-lantern";

pub(crate) fn get_test_state() -> SQLAppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    create_app_state(connection, "foobar", "Etc/UTC").expect("Could not create app state")
}

/// Create a user whose password is [TEST_PASSWORD], hashed with the cheapest bcrypt cost.
pub(crate) fn create_test_user(state: &SQLAppState, email: &str) -> User {
    let password_hash =
        PasswordHash::from_raw_password(TEST_PASSWORD, 4).expect("Could not hash test password");

    state
        .user_store
        .create(
            EmailAddress::from_str(email).expect("Invalid test email"),
            password_hash,
        )
        .expect("Could not create test user")
}

pub(crate) fn create_test_category(
    state: &SQLAppState,
    user_id: UserID,
    name: &str,
    total_budget: f64,
) -> Category {
    state
        .category_store
        .create(NewCategory {
            name: CategoryName::new_unchecked(name),
            total_budget,
            icon: DEFAULT_ICON.to_owned(),
            color: DEFAULT_COLOR.to_owned(),
            user_id,
        })
        .expect("Could not create test category")
}

pub(crate) fn create_test_expense(
    state: &SQLAppState,
    category: &Category,
    amount: f64,
    title: Option<&str>,
) -> Expense {
    state
        .expense_store
        .create(NewExpense {
            category_id: category.id,
            amount,
            title: title.map(str::to_owned),
            user_id: category.user_id,
        })
        .expect("Could not create test expense")
}
