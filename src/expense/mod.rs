//! Expenses recorded against a category: the expenses page, the progress
//! partial and the endpoints for adding and deleting expenses.

mod create;
mod delete;
mod domain;
mod page;

pub use create::{ExpenseEndpointState, create_expense_endpoint};
pub use delete::{
    DeleteExpenseState, EXPENSES_CHANGED_EVENT, delete_category_expenses_endpoint,
    delete_expense_endpoint,
};
pub use domain::{
    Expense, ExpenseForm, ExpenseId, NewExpense, parse_amount, parse_pending_amount,
};
pub use page::{ExpensesPageState, ProgressQuery, get_expenses_page, get_progress_partial};
