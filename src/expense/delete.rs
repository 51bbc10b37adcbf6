//! Endpoints for deleting one expense or all expenses of a category.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HX_TRIGGER, HxRedirect};

use crate::{
    AppState, Error,
    alert::Alert,
    auth::UserID,
    category::CategoryId,
    endpoints::{self, format_endpoint},
    expense::{ExpenseEndpointState, ExpenseId},
    stores::{CategoryStore, ExpenseStore},
};

/// The event the expenses page listens for to refresh the progress bar.
pub const EXPENSES_CHANGED_EVENT: &str = "expenses-changed";

/// The state needed for deleting a single expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState<E> {
    pub expense_store: E,
}

impl<C, E, U> FromRef<AppState<C, E, U>> for DeleteExpenseState<E>
where
    E: Clone,
{
    fn from_ref(state: &AppState<C, E, U>) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
        }
    }
}

/// Handle expense deletion. Returns success alert or error.
pub async fn delete_expense_endpoint<E>(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<DeleteExpenseState<E>>,
    Extension(user_id): Extension<UserID>,
) -> Response
where
    E: ExpenseStore + Clone + Send + Sync,
{
    match state.expense_store.delete(expense_id, user_id) {
        Ok(_) => (
            [(HX_TRIGGER, EXPENSES_CHANGED_EVENT)],
            Alert::SuccessSimple {
                message: "Expense deleted".to_owned(),
            },
        )
            .into_response(),
        Err(Error::DeleteMissingExpense) => Error::DeleteMissingExpense.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting expense {expense_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

/// Delete every expense in the category `category_id` and reload the expenses page.
pub async fn delete_category_expenses_endpoint<C, E>(
    Path(category_id): Path<CategoryId>,
    State(state): State<ExpenseEndpointState<C, E>>,
    Extension(user_id): Extension<UserID>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    E: ExpenseStore + Clone + Send + Sync,
{
    if let Err(error) = state.category_store.get(category_id, user_id) {
        return error.into_alert_response();
    }

    match state.expense_store.delete_by_category(category_id, user_id) {
        Ok(count) => {
            tracing::info!("Deleted {count} expense(s) from category {category_id}");

            (
                HxRedirect(format_endpoint(endpoints::CATEGORY_EXPENSES_VIEW, category_id)),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting the expenses of category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
