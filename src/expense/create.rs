//! Endpoint for adding an expense to a category.

use axum::{
    Extension, Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    auth::UserID,
    category::CategoryId,
    endpoints::{self, format_endpoint},
    expense::{ExpenseForm, page::expense_form_view},
    stores::{CategoryStore, ExpenseStore},
};

/// The state needed for endpoints that change the expenses of a category.
#[derive(Debug, Clone)]
pub struct ExpenseEndpointState<C, E> {
    pub category_store: C,
    pub expense_store: E,
}

impl<C, E, U> FromRef<AppState<C, E, U>> for ExpenseEndpointState<C, E>
where
    C: Clone,
    E: Clone,
{
    fn from_ref(state: &AppState<C, E, U>) -> Self {
        Self {
            category_store: state.category_store.clone(),
            expense_store: state.expense_store.clone(),
        }
    }
}

fn validation_message(error: &Error) -> String {
    match error {
        Error::MissingAmount => format!("Missing Input: {error}"),
        Error::InvalidAmount(_) => format!("Invalid Amount: {error}"),
        error => format!("Error: {error}"),
    }
}

/// Add an expense to the category `category_id` and reload the expenses page.
pub async fn create_expense_endpoint<C, E>(
    Path(category_id): Path<CategoryId>,
    State(state): State<ExpenseEndpointState<C, E>>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<ExpenseForm>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    E: ExpenseStore + Clone + Send + Sync,
{
    if let Err(error) = state.category_store.get(category_id, user_id) {
        return error.into_alert_response();
    }

    let new_expense = match form.validate(category_id, user_id) {
        Ok(new_expense) => new_expense,
        Err(error) => {
            return expense_form_view(category_id, &form, &validation_message(&error))
                .into_response();
        }
    };

    match state.expense_store.create(new_expense) {
        Ok(_) => (
            HxRedirect(format_endpoint(endpoints::CATEGORY_EXPENSES_VIEW, category_id)),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an expense: {error}");

            error.into_alert_response()
        }
    }
}
