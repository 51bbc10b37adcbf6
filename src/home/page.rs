//! The home page: the total budget card with its pie chart and one card per category.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    auth::UserID,
    budget::{
        BudgetDisplay, category_status, orphaned_expenses, portfolio_chart_data, total_budget,
        valid_categories,
    },
    category::{CATEGORIES_CHANGED_EVENT, Category},
    endpoints::{self, format_endpoint},
    expense::Expense,
    home::chart::{budget_chart, budget_chart_view},
    html::{
        BUTTON_DELETE_STYLE, CARD_STYLE, HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
        format_currency,
    },
    navigation::NavBar,
    stores::{CategoryStore, ExpenseStore},
};

const SUMMARY_CONTAINER_ID: &str = "summary";
const CATEGORY_LIST_CONTAINER_ID: &str = "category-list";

/// The state needed for the home page and the summary partial.
#[derive(Debug, Clone)]
pub struct HomePageState<C, E> {
    pub category_store: C,
    pub expense_store: E,
}

impl<C, E, U> FromRef<AppState<C, E, U>> for HomePageState<C, E>
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

/// Display the budget overview for the current user.
pub async fn get_home_page<C, E>(
    State(state): State<HomePageState<C, E>>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    E: ExpenseStore + Clone + Send + Sync,
{
    let (categories, expenses) = get_user_data(&state, user_id)?;

    Ok(home_view(&categories, &expenses).into_response())
}

/// Render the total budget card on its own.
///
/// The home page requests this whenever a category is deleted.
pub async fn get_summary_partial<C, E>(
    State(state): State<HomePageState<C, E>>,
    Extension(user_id): Extension<UserID>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    E: ExpenseStore + Clone + Send + Sync,
{
    match get_user_data(&state, user_id) {
        Ok((categories, _)) => summary_view(&categories).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// Render the category cards, or the empty state once the last one is gone.
pub async fn get_category_list_partial<C, E>(
    State(state): State<HomePageState<C, E>>,
    Extension(user_id): Extension<UserID>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    E: ExpenseStore + Clone + Send + Sync,
{
    match get_user_data(&state, user_id) {
        Ok((categories, expenses)) => category_list_view(&categories, &expenses).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn get_user_data<C, E>(
    state: &HomePageState<C, E>,
    user_id: UserID,
) -> Result<(Vec<Category>, Vec<Expense>), Error>
where
    C: CategoryStore,
    E: ExpenseStore,
{
    let categories = state
        .category_store
        .get_by_user(user_id)
        .inspect_err(|error| tracing::error!("Could not get categories: {error}"))?;
    let expenses = state
        .expense_store
        .get_by_user(user_id)
        .inspect_err(|error| tracing::error!("Could not get expenses: {error}"))?;

    let orphans = orphaned_expenses(&categories, &expenses);
    if !orphans.is_empty() {
        tracing::warn!(
            "Ignoring {} expense(s) of user {user_id} that do not belong to any category",
            orphans.len()
        );
    }

    Ok((categories, expenses))
}

fn summary_view(categories: &[Category]) -> Markup {
    let categories = valid_categories(categories);
    let slices = portfolio_chart_data(categories.iter().copied());
    let total = total_budget(categories);

    html! {
        div class="space-y-4"
        {
            h2 class="text-lg font-semibold" { "Total Budget" }

            @if slices.is_empty() {
                div
                    class="flex items-center justify-center h-48 rounded
                        text-gray-500 dark:text-gray-400 bg-gray-100 dark:bg-gray-700"
                {
                    "No data yet"
                }
            } @else {
                (budget_chart_view(&budget_chart(&slices)))
            }

            p class="text-2xl font-bold text-center" { (format_currency(total)) }
        }
    }
}

fn category_card_view(category: &Category, expenses: &[Expense]) -> Markup {
    let status = category_status(category, expenses);
    let expenses_url = format_endpoint(endpoints::CATEGORY_EXPENSES_VIEW, category.id);
    let delete_url = format_endpoint(endpoints::DELETE_CATEGORY, category.id);
    let spent_style = if status.is_over_budget() {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        article
            id={"category-" (category.id)}
            class={(CARD_STYLE) " flex justify-between items-center gap-4"}
        {
            a href=(expenses_url) class="flex items-center gap-4 grow"
            {
                span
                    class="flex items-center justify-center w-12 h-12 rounded-full text-2xl"
                    style={"background-color: " (category.color) ";"}
                {
                    (category.icon)
                }

                div
                {
                    h3 class="font-semibold" { (category.name) }

                    p class={"text-sm " (spent_style)}
                    {
                        (format_currency(status.spent))
                        " / "
                        (format_currency(category.total_budget))
                        " spent"
                    }

                    p class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        @match status.display() {
                            BudgetDisplay::OverBy(amount) => {
                                "Over budget by " (format_currency(amount))
                            }
                            BudgetDisplay::Remaining(amount) => {
                                "Remaining: " (format_currency(amount))
                            }
                        }
                    }
                }
            }

            button
                type="button"
                hx-delete=(delete_url)
                hx-confirm={"Are you sure you want to delete the category '" (category.name) "'?"}
                hx-target="closest article"
                hx-swap="delete"
                hx-target-error="#alert-container"
                class=(BUTTON_DELETE_STYLE)
            {
                "Delete"
            }
        }
    }
}

fn category_list_view(categories: &[Category], expenses: &[Expense]) -> Markup {
    html! {
        @if categories.is_empty() {
            div class="py-4 text-center space-y-2"
            {
                p class="text-gray-500 dark:text-gray-400" { "No categories to show." }

                a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE)
                {
                    "Start by adding a category"
                }
            }
        } @else {
            div class="space-y-4"
            {
                @for category in categories {
                    (category_card_view(category, expenses))
                }
            }
        }
    }
}

fn home_view(categories: &[Category], expenses: &[Expense]) -> Markup {
    let nav_bar = NavBar::new(endpoints::HOME_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-6"
            {
                div
                    id=(SUMMARY_CONTAINER_ID)
                    class=(CARD_STYLE)
                    hx-get=(endpoints::SUMMARY)
                    hx-trigger={(CATEGORIES_CHANGED_EVENT) " from:body"}
                {
                    (summary_view(categories))
                }

                header class="flex justify-between items-center"
                {
                    h2 class="text-lg font-semibold" { "Categories" }

                    a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE) { "Add Category" }
                }

                div
                    id=(CATEGORY_LIST_CONTAINER_ID)
                    hx-get=(endpoints::CATEGORY_LIST)
                    hx-trigger={(CATEGORIES_CHANGED_EVENT) " from:body"}
                {
                    (category_list_view(categories, expenses))
                }
            }
        }
    };

    base(
        "Home",
        &[HeadElement::ScriptLink(
            "/static/echarts.6.0.0.min.js".to_owned(),
        )],
        &content,
    )
}

#[cfg(test)]
mod home_page_tests {
    use axum::{
        Extension,
        extract::{FromRef, State},
        http::StatusCode,
    };
    use scraper::{Html, Selector};

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{
            assert_valid_html, create_test_category, create_test_expense, create_test_user,
            get_test_state, parse_html_document,
        },
    };

    use super::{HomePageState, get_home_page};

    const BUDGET_CHART_SELECTOR: &str = "#budget-chart";

    fn texts(html: &Html, selector: &str) -> Vec<String> {
        html.select(&Selector::parse(selector).unwrap())
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn empty_home_page_shows_placeholders() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let state = HomePageState::from_ref(&app_state);

        let response = get_home_page(State(state), Extension(user.id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let body_text = texts(&html, "main").join(" ");
        assert!(body_text.contains("No data yet"));
        assert!(body_text.contains("No categories to show."));
        assert!(body_text.contains("Start by adding a category"));
        assert!(texts(&html, BUDGET_CHART_SELECTOR).is_empty());
        assert_eq!(texts(&html, "#summary p.text-2xl"), ["₹0.00"]);
    }

    #[tokio::test]
    async fn home_page_shows_category_cards_and_chart() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let food = create_test_category(&app_state, user.id, "Food", 500.0);
        let travel = create_test_category(&app_state, user.id, "Travel", 400.0);
        create_test_expense(&app_state, &food, 700.0, Some("Feast"));
        create_test_expense(&app_state, &travel, 150.0, Some("Bus"));
        let state = HomePageState::from_ref(&app_state);

        let response = get_home_page(State(state), Extension(user.id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        assert_eq!(
            html.select(&Selector::parse(BUDGET_CHART_SELECTOR).unwrap())
                .count(),
            1
        );
        assert_eq!(texts(&html, "#summary p.text-2xl"), ["₹900.00"]);
        assert_eq!(texts(&html, "article h3"), ["Travel", "Food"]);
        assert_eq!(
            texts(&html, "article p.text-sm"),
            [
                "₹150.00 / ₹400.00 spent",
                "Remaining: ₹250.00",
                "₹700.00 / ₹500.00 spent",
                "Over budget by ₹200.00",
            ]
        );

        let over_budget = html
            .select(&Selector::parse("article p.text-red-600").unwrap())
            .count();
        assert_eq!(over_budget, 1);

        let links = html
            .select(&Selector::parse("article a").unwrap())
            .filter_map(|link| link.value().attr("href"))
            .collect::<Vec<_>>();
        assert_eq!(
            links,
            [
                format_endpoint(endpoints::CATEGORY_EXPENSES_VIEW, travel.id),
                format_endpoint(endpoints::CATEGORY_EXPENSES_VIEW, food.id),
            ]
        );

        let delete_urls = html
            .select(&Selector::parse("article button").unwrap())
            .filter_map(|button| button.value().attr("hx-delete"))
            .collect::<Vec<_>>();
        assert_eq!(
            delete_urls,
            [
                format_endpoint(endpoints::DELETE_CATEGORY, travel.id),
                format_endpoint(endpoints::DELETE_CATEGORY, food.id),
            ]
        );
    }

    #[tokio::test]
    async fn home_page_only_shows_own_categories() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let other = create_test_user(&app_state, "ravi@example.com");
        create_test_category(&app_state, other.id, "Rent", 9000.0);
        let state = HomePageState::from_ref(&app_state);

        let response = get_home_page(State(state), Extension(user.id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert!(texts(&html, "article h3").is_empty());
    }

    #[tokio::test]
    async fn category_list_refreshes_when_categories_change() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let state = HomePageState::from_ref(&app_state);

        let response = get_home_page(State(state), Extension(user.id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let list = html
            .select(&Selector::parse("#category-list").unwrap())
            .next()
            .expect("No category list container found");
        assert_eq!(list.value().attr("hx-get"), Some(endpoints::CATEGORY_LIST));
        assert_eq!(
            list.value().attr("hx-trigger"),
            Some("categories-changed from:body")
        );
    }
}

#[cfg(test)]
mod category_list_partial_tests {
    use axum::{
        Extension,
        extract::{FromRef, Path, State},
        http::StatusCode,
    };
    use scraper::Selector;

    use crate::{
        category::{DeleteCategoryState, delete_category_endpoint},
        test_utils::{
            assert_valid_html, create_test_category, create_test_user, get_test_state,
            parse_html_fragment,
        },
    };

    use super::{HomePageState, get_category_list_partial};

    #[tokio::test]
    async fn shows_remaining_category_cards() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        create_test_category(&app_state, user.id, "Food", 500.0);
        let state = HomePageState::from_ref(&app_state);

        let response = get_category_list_partial(State(state), Extension(user.id)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let names = html
            .select(&Selector::parse("article h3").unwrap())
            .map(|heading| heading.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Food"]);
    }

    #[tokio::test]
    async fn shows_empty_state_after_last_category_is_deleted() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let category = create_test_category(&app_state, user.id, "Food", 500.0);
        delete_category_endpoint(
            Path(category.id),
            State(DeleteCategoryState::from_ref(&app_state)),
            Extension(user.id),
        )
        .await;
        let state = HomePageState::from_ref(&app_state);

        let response = get_category_list_partial(State(state), Extension(user.id)).await;

        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No categories to show."));
        assert!(text.contains("Start by adding a category"));
        assert_eq!(html.select(&Selector::parse("article").unwrap()).count(), 0);
    }
}

#[cfg(test)]
mod summary_partial_tests {
    use axum::{
        Extension,
        extract::{FromRef, State},
        http::StatusCode,
    };
    use scraper::Selector;

    use crate::test_utils::{
        assert_valid_html, create_test_category, create_test_user, get_test_state,
        parse_html_fragment,
    };

    use super::{HomePageState, get_summary_partial};

    const BUDGET_CHART_SELECTOR: &str = "#budget-chart";

    #[tokio::test]
    async fn summary_includes_chart_and_total() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        create_test_category(&app_state, user.id, "Food", 500.0);
        create_test_category(&app_state, user.id, "Travel", 250.0);
        let state = HomePageState::from_ref(&app_state);

        let response = get_summary_partial(State(state), Extension(user.id)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        assert_eq!(
            html.select(&Selector::parse(BUDGET_CHART_SELECTOR).unwrap())
                .count(),
            1
        );
        let total = html
            .select(&Selector::parse("p.text-2xl").unwrap())
            .next()
            .unwrap()
            .text()
            .collect::<String>();
        assert_eq!(total.trim(), "₹750.00");
        assert_eq!(
            html.select(&Selector::parse("article").unwrap()).count(),
            0
        );
    }
}
