//! Defines the expense store trait.

use crate::{
    Error,
    auth::UserID,
    category::CategoryId,
    expense::{Expense, ExpenseId, NewExpense},
};

/// Creates, retrieves and deletes a user's expenses.
///
/// Lists are ordered newest first.
pub trait ExpenseStore {
    /// Store a new expense and return it with its ID and creation time.
    ///
    /// Returns [Error::NotFound] if the category does not exist or belongs to
    /// another user.
    fn create(&self, expense: NewExpense) -> Result<Expense, Error>;

    /// Get an expense by its ID, or [Error::NotFound].
    fn get(&self, expense_id: ExpenseId, user_id: UserID) -> Result<Expense, Error>;

    /// Get all of a user's expenses across their categories.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Expense>, Error>;

    /// Get the expenses recorded against one category.
    fn get_by_category(
        &self,
        category_id: CategoryId,
        user_id: UserID,
    ) -> Result<Vec<Expense>, Error>;

    /// Delete an expense, or return [Error::DeleteMissingExpense].
    fn delete(&self, expense_id: ExpenseId, user_id: UserID) -> Result<(), Error>;

    /// Delete every expense in a category and return how many were deleted.
    fn delete_by_category(&self, category_id: CategoryId, user_id: UserID)
    -> Result<usize, Error>;
}
