//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        auth_guard, auth_guard_hx, get_log_in_page, get_log_out, get_register_page, post_log_in,
        register_user,
    },
    category::{create_category_endpoint, delete_category_endpoint, get_new_category_page},
    endpoints,
    error_page::{get_404_not_found, get_internal_server_error_page},
    expense::{
        create_expense_endpoint, delete_category_expenses_endpoint, delete_expense_endpoint,
        get_expenses_page, get_progress_partial,
    },
    home::{get_category_list_partial, get_home_page, get_summary_partial},
    stores::{CategoryStore, ExpenseStore, UserStore},
};

/// Return a router with all the app's routes.
pub fn build_router<C, E, U>(state: AppState<C, E, U>) -> Router
where
    C: CategoryStore + Clone + Send + Sync + 'static,
    E: ExpenseStore + Clone + Send + Sync + 'static,
    U: UserStore + Clone + Send + Sync + 'static,
{
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in::<U>))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::USERS, post(register_user::<U>))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::HOME_VIEW, get(get_home_page::<C, E>))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(
            endpoints::CATEGORY_EXPENSES_VIEW,
            get(get_expenses_page::<C, E>),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // The API routes need to use the HX-REDIRECT header for auth redirects to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::SUMMARY, get(get_summary_partial::<C, E>))
            .route(
                endpoints::CATEGORY_LIST,
                get(get_category_list_partial::<C, E>),
            )
            .route(endpoints::POST_CATEGORY, post(create_category_endpoint::<C>))
            .route(
                endpoints::DELETE_CATEGORY,
                delete(delete_category_endpoint::<C>),
            )
            .route(
                endpoints::CATEGORY_EXPENSES_API,
                post(create_expense_endpoint::<C, E>)
                    .delete(delete_category_expenses_endpoint::<C, E>),
            )
            .route(
                endpoints::CATEGORY_PROGRESS,
                get(get_progress_partial::<C, E>),
            )
            .route(
                endpoints::DELETE_EXPENSE,
                delete(delete_expense_endpoint::<E>),
            )
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the home page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::HOME_VIEW)
}
