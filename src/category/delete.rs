//! Category deletion endpoint.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HX_TRIGGER;

use crate::{
    AppState, Error,
    alert::Alert,
    auth::UserID,
    category::CategoryId,
    stores::CategoryStore,
};

/// The event the home page listens for to refresh the budget summary.
pub const CATEGORIES_CHANGED_EVENT: &str = "categories-changed";

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState<C> {
    pub category_store: C,
}

impl<C, E, U> FromRef<AppState<C, E, U>> for DeleteCategoryState<C>
where
    C: Clone,
{
    fn from_ref(state: &AppState<C, E, U>) -> Self {
        Self {
            category_store: state.category_store.clone(),
        }
    }
}

/// Handle category deletion. Returns success alert or error.
///
/// A category that still has expenses is kept and the user is asked to
/// delete its expenses first.
pub async fn delete_category_endpoint<C>(
    Path(category_id): Path<CategoryId>,
    State(state): State<DeleteCategoryState<C>>,
    Extension(user_id): Extension<UserID>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
{
    match state.category_store.delete(category_id, user_id) {
        Ok(_) => (
            [(HX_TRIGGER, CATEGORIES_CHANGED_EVENT)],
            Alert::SuccessSimple {
                message: "Category deleted".to_owned(),
            },
        )
            .into_response(),
        Err(error @ (Error::CategoryHasExpenses | Error::DeleteMissingCategory)) => {
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
