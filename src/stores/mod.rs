//! The storage collaborator.
//!
//! Handlers only reach categories, expenses and users through the traits in
//! this module. [sqlite] holds the implementations backed by a shared SQLite
//! connection.

mod category;
mod expense;
mod user;

pub mod sqlite;

pub use category::CategoryStore;
pub use expense::ExpenseStore;
pub use user::UserStore;
