//! The expenses page for one category and its budget progress partial.

use axum::{
    Extension,
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::UserID,
    budget::{projected_progress, spent_for_category},
    category::{Category, CategoryId},
    endpoints::{self, format_endpoint},
    expense::{EXPENSES_CHANGED_EVENT, Expense, ExpenseForm, parse_pending_amount},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, format_currency,
        rupee_input_styles,
    },
    navigation::NavBar,
    stores::{CategoryStore, ExpenseStore},
    timezone::local_date,
};

/// The bar colour for a category without a colour of its own.
const FALLBACK_PROGRESS_COLOR: &str = "#10B981";
const PROGRESS_CONTAINER_ID: &str = "progress";

/// The state needed for the expenses page and the progress partial.
#[derive(Debug, Clone)]
pub struct ExpensesPageState<C, E> {
    pub category_store: C,
    pub expense_store: E,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl<C, E, U> FromRef<AppState<C, E, U>> for ExpensesPageState<C, E>
where
    C: Clone,
    E: Clone,
{
    fn from_ref(state: &AppState<C, E, U>) -> Self {
        Self {
            category_store: state.category_store.clone(),
            expense_store: state.expense_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the page for adding expenses to a category and listing the existing ones.
pub async fn get_expenses_page<C, E>(
    Path(category_id): Path<CategoryId>,
    State(state): State<ExpensesPageState<C, E>>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    E: ExpenseStore + Clone + Send + Sync,
{
    let category = state.category_store.get(category_id, user_id)?;
    let expenses = state
        .expense_store
        .get_by_category(category_id, user_id)
        .inspect_err(|error| {
            tracing::error!("Could not get expenses for category {category_id}: {error}")
        })?;

    let rows = expenses
        .iter()
        .map(|expense| {
            let date = local_date(expense.created_at, &state.local_timezone)?;
            Ok((expense, date.to_string()))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(expenses_view(&category, &expenses, &rows).into_response())
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    /// The amount currently typed into the add expense form.
    pub amount: Option<String>,
}

/// Render the progress bar as it would be if the pending amount were added.
pub async fn get_progress_partial<C, E>(
    Path(category_id): Path<CategoryId>,
    Query(query): Query<ProgressQuery>,
    State(state): State<ExpensesPageState<C, E>>,
    Extension(user_id): Extension<UserID>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    E: ExpenseStore + Clone + Send + Sync,
{
    let category = match state.category_store.get(category_id, user_id) {
        Ok(category) => category,
        Err(error) => return error.into_alert_response(),
    };

    match state.expense_store.get_by_category(category_id, user_id) {
        Ok(expenses) => {
            let pending_amount = parse_pending_amount(query.amount.as_deref());
            progress_view(&category, &expenses, pending_amount).into_response()
        }
        Err(error) => {
            tracing::error!("Could not get expenses for category {category_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn progress_color(category: &Category) -> &str {
    if category.color.trim().is_empty() {
        FALLBACK_PROGRESS_COLOR
    } else {
        &category.color
    }
}

fn progress_view(category: &Category, expenses: &[Expense], pending_amount: f64) -> Markup {
    let spent = spent_for_category(expenses, category.id);
    let progress = projected_progress(spent, pending_amount, category.total_budget);
    let bar_style = format!(
        "width: {:.1}%; background-color: {};",
        progress * 100.0,
        progress_color(category)
    );

    html! {
        div class="space-y-1"
        {
            div class="flex justify-between text-sm text-gray-500 dark:text-gray-400"
            {
                span { (format_currency(0.0)) }
                span { (format_currency(category.total_budget)) }
            }

            div
                class="w-full h-4 rounded-full bg-gray-700 overflow-hidden"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="1"
                aria-valuenow=(format!("{progress:.3}"))
            {
                div class="h-4 rounded-full" style=(bar_style) {}
            }

            p class="text-sm text-center"
            {
                (format_currency(spent + pending_amount))
                " spent of "
                (format_currency(category.total_budget))
                " total"
            }
        }
    }
}

/// The add expense form, also re-rendered with the entered values when validation fails.
pub(super) fn expense_form_view(
    category_id: CategoryId,
    form: &ExpenseForm,
    error_message: &str,
) -> Markup {
    let create_url = format_endpoint(endpoints::CATEGORY_EXPENSES_API, category_id);
    let progress_url = format_endpoint(endpoints::CATEGORY_PROGRESS, category_id);

    html! {
        form
            hx-post=(create_url)
            hx-target-error="#alert-container"
            hx-swap="outerHTML"
            class="w-full space-y-4"
        {
            div
            {
                label for="title" class=(FORM_LABEL_STYLE) { "Expense Title" }

                input
                    id="title"
                    type="text"
                    name="title"
                    placeholder="e.g. Coffee, Groceries"
                    value=(form.title)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper"
                {
                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="0.01"
                        min="0.01"
                        placeholder="e.g. 120"
                        required
                        autofocus
                        value=(form.amount)
                        hx-get=(progress_url)
                        hx-trigger="input changed delay:200ms"
                        hx-target={"#" (PROGRESS_CONTAINER_ID)}
                        hx-swap="innerHTML"
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}

fn expense_row_view(expense: &Expense, date: &str, color: &str) -> Markup {
    let delete_url = format_endpoint(endpoints::DELETE_EXPENSE, expense.id);

    html! {
        li
            id={"expense-" (expense.id)}
            class="flex justify-between items-center gap-4 py-3"
        {
            div
            {
                p class="font-semibold" { (expense.title.as_deref().unwrap_or("Unnamed")) }
                p class="text-sm text-gray-500 dark:text-gray-400" { (date) }
            }

            div class="flex items-center gap-4"
            {
                span class="text-lg font-bold" style={"color: " (color) ";"}
                {
                    (format_currency(expense.amount))
                }

                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-confirm="Are you sure you want to delete this expense?"
                    hx-target="closest li"
                    hx-swap="delete"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

fn expenses_view(category: &Category, expenses: &[Expense], rows: &[(&Expense, String)]) -> Markup {
    let nav_bar = NavBar::new(endpoints::HOME_VIEW).into_html();
    let progress_url = format_endpoint(endpoints::CATEGORY_PROGRESS, category.id);
    let delete_all_url = format_endpoint(endpoints::CATEGORY_EXPENSES_API, category.id);
    let color = progress_color(category);

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-6"
            {
                header class="flex justify-between items-end"
                {
                    h1 class="text-xl font-bold"
                    {
                        "Add Expense to " (category.icon) " " (category.name)
                    }

                    a href=(endpoints::HOME_VIEW) class=(LINK_STYLE) { "Back" }
                }

                div
                    id=(PROGRESS_CONTAINER_ID)
                    class=(CARD_STYLE)
                    hx-get=(progress_url)
                    hx-trigger={(EXPENSES_CHANGED_EVENT) " from:body"}
                {
                    (progress_view(category, expenses, 0.0))
                }

                div class=(CARD_STYLE)
                {
                    (expense_form_view(category.id, &ExpenseForm::default(), ""))
                }

                section class=(CARD_STYLE)
                {
                    header class="flex justify-between items-center"
                    {
                        h2 class="text-lg font-semibold" { "Expenses" }

                        @if !rows.is_empty() {
                            button
                                type="button"
                                hx-delete=(delete_all_url)
                                hx-confirm="Are you sure you want to delete all expenses in this category?"
                                hx-target-error="#alert-container"
                                class=(BUTTON_DELETE_STYLE)
                            {
                                "Delete All"
                            }
                        }
                    }

                    @if rows.is_empty() {
                        p class="py-4 text-center text-gray-500 dark:text-gray-400"
                        {
                            "No expenses yet."
                        }
                    } @else {
                        ul class="divide-y divide-gray-200 dark:divide-gray-700"
                        {
                            @for (expense, date) in rows {
                                (expense_row_view(expense, date, color))
                            }
                        }
                    }
                }
            }
        }
    };

    base("Expenses", &[rupee_input_styles()], &content)
}

#[cfg(test)]
mod expenses_page_tests {
    use axum::{
        Extension,
        extract::{FromRef, Path, Query, State},
        http::StatusCode,
    };
    use scraper::{Html, Selector};

    use crate::{
        Error,
        endpoints::{self, format_endpoint},
        test_utils::{
            assert_form_input, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_valid_html, create_test_category, create_test_expense, create_test_user,
            get_test_state, must_get_form, parse_html_document, parse_html_fragment,
        },
    };

    use super::{ExpensesPageState, ProgressQuery, get_expenses_page, get_progress_partial};

    fn texts(html: &Html, selector: &str) -> Vec<String> {
        html.select(&Selector::parse(selector).unwrap())
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn page_lists_expenses_newest_first() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let category = create_test_category(&app_state, user.id, "Food", 900.0);
        create_test_expense(&app_state, &category, 120.0, Some("Lunch"));
        create_test_expense(&app_state, &category, 80.0, None);
        let state = ExpensesPageState::from_ref(&app_state);

        let response = get_expenses_page(Path(category.id), State(state), Extension(user.id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let heading = texts(&html, "h1");
        assert_eq!(heading, ["Add Expense to 🛒 Food"]);
        assert_eq!(texts(&html, "li p.font-semibold"), ["Unnamed", "Lunch"]);
        assert_eq!(texts(&html, "li span.font-bold"), ["₹80.00", "₹120.00"]);
        assert!(
            texts(&html, "#progress p")
                .contains(&"₹200.00 spent of ₹900.00 total".to_owned())
        );

        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &format_endpoint(endpoints::CATEGORY_EXPENSES_API, category.id),
            "hx-post",
        );
        assert_form_input(&form, "amount", "number");
        assert_form_submit_button_with_text(&form, "Add Expense");
        assert_eq!(texts(&html, "header button"), ["Delete All"]);
    }

    #[tokio::test]
    async fn empty_category_has_no_delete_all_button() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let category = create_test_category(&app_state, user.id, "Food", 1000.0);
        let state = ExpensesPageState::from_ref(&app_state);

        let response = get_expenses_page(Path(category.id), State(state), Extension(user.id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert!(texts(&html, "header button").is_empty());
        assert!(texts(&html, "p").contains(&"No expenses yet.".to_owned()));
    }

    #[tokio::test]
    async fn category_of_other_user_is_not_found() {
        let app_state = get_test_state();
        let owner = create_test_user(&app_state, "asha@example.com");
        let other = create_test_user(&app_state, "ravi@example.com");
        let category = create_test_category(&app_state, owner.id, "Food", 1000.0);
        let state = ExpensesPageState::from_ref(&app_state);

        let result =
            get_expenses_page(Path(category.id), State(state), Extension(other.id)).await;

        assert_eq!(result.err(), Some(Error::NotFound));
    }

    #[tokio::test]
    async fn progress_includes_pending_amount() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let category = create_test_category(&app_state, user.id, "Food", 900.0);
        create_test_expense(&app_state, &category, 200.0, None);
        let state = ExpensesPageState::from_ref(&app_state);

        let response = get_progress_partial(
            Path(category.id),
            Query(ProgressQuery {
                amount: Some("250".to_owned()),
            }),
            State(state),
            Extension(user.id),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let bar = html
            .select(&Selector::parse("[role=progressbar]").unwrap())
            .next()
            .unwrap();
        assert_eq!(bar.value().attr("aria-valuenow"), Some("0.500"));
        assert_eq!(texts(&html, "p"), ["₹450.00 spent of ₹900.00 total"]);
    }

    #[tokio::test]
    async fn progress_ignores_invalid_amount_and_caps_at_full() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let category = create_test_category(&app_state, user.id, "Food", 100.0);
        create_test_expense(&app_state, &category, 250.0, None);
        let state = ExpensesPageState::from_ref(&app_state);

        let response = get_progress_partial(
            Path(category.id),
            Query(ProgressQuery {
                amount: Some("abc".to_owned()),
            }),
            State(state),
            Extension(user.id),
        )
        .await;

        let html = parse_html_fragment(response).await;
        let bar = html
            .select(&Selector::parse("[role=progressbar]").unwrap())
            .next()
            .unwrap();
        assert_eq!(bar.value().attr("aria-valuenow"), Some("1.000"));
        assert_eq!(texts(&html, "p"), ["₹250.00 spent of ₹100.00 total"]);
    }
}
