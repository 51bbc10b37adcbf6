//! Defines the category store trait.

use crate::{
    Error,
    auth::UserID,
    category::{Category, CategoryId, NewCategory},
};

/// Creates, retrieves and deletes a user's budget categories.
///
/// Every lookup is scoped by the owner, so a category that belongs to another
/// user is reported the same way as one that does not exist.
pub trait CategoryStore {
    /// Store a new category and return it with its ID and creation time.
    fn create(&self, category: NewCategory) -> Result<Category, Error>;

    /// Get a category by its ID.
    ///
    /// Returns [Error::NotFound] if there is no such category for `user_id`.
    fn get(&self, category_id: CategoryId, user_id: UserID) -> Result<Category, Error>;

    /// Get all categories for a user, newest first.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Category>, Error>;

    /// Delete a category.
    ///
    /// Returns [Error::CategoryHasExpenses] if any expense still references the
    /// category, or [Error::DeleteMissingCategory] if there is no such category
    /// for `user_id`.
    fn delete(&self, category_id: CategoryId, user_id: UserID) -> Result<(), Error>;
}
