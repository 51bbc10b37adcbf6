//! Category creation page and endpoint.

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState,
    auth::UserID,
    category::{COLORS, CategoryForm, DEFAULT_COLOR, DEFAULT_ICON, ICONS},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        rupee_input_styles,
    },
    navigation::NavBar,
    stores::CategoryStore,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState<C> {
    pub category_store: C,
}

impl<C, E, U> FromRef<AppState<C, E, U>> for CreateCategoryState<C>
where
    C: Clone,
{
    fn from_ref(state: &AppState<C, E, U>) -> Self {
        Self {
            category_store: state.category_store.clone(),
        }
    }
}

/// Render the category creation page.
pub async fn get_new_category_page() -> Response {
    new_category_view().into_response()
}

/// Handle category creation form submission.
///
/// Validation errors re-render the form with the values the user entered,
/// a stored category redirects the client to the home page.
pub async fn create_category_endpoint<C>(
    State(state): State<CreateCategoryState<C>>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<CategoryForm>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
{
    let new_category = match form.validate(user_id) {
        Ok(new_category) => new_category,
        Err(error) => {
            return new_category_form_view(&form, &format!("Error: {error}")).into_response();
        }
    };

    match state.category_store.create(new_category) {
        Ok(_) => (
            HxRedirect(endpoints::HOME_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");

            error.into_alert_response()
        }
    }
}

fn new_category_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CATEGORY_VIEW).into_html();
    let form = new_category_form_view(&CategoryForm::default(), "");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Category", &[rupee_input_styles()], &content)
}

/// Radio buttons for picking one of `choices`, rendered by `label_content`.
fn radio_group(
    name: &str,
    legend: &str,
    choices: &[&str],
    selected: &str,
    label_content: impl Fn(&str) -> Markup,
) -> Markup {
    html! {
        fieldset
        {
            legend class=(FORM_LABEL_STYLE) { (legend) }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for (index, choice) in choices.iter().enumerate() {
                    @let id = format!("{name}-{index}");

                    div
                    {
                        input
                            type="radio"
                            name=(name)
                            id=(id)
                            value=(choice)
                            checked[*choice == selected]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for=(id) class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (label_content(choice))
                        }
                    }
                }
            }
        }
    }
}

fn selected_or<'a>(raw: &'a str, choices: &[&'a str], default: &'a str) -> &'a str {
    choices
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(raw.trim()))
        .copied()
        .unwrap_or(default)
}

fn new_category_form_view(form: &CategoryForm, error_message: &str) -> Markup {
    let selected_icon = selected_or(&form.icon, &ICONS, DEFAULT_ICON);
    let selected_color = selected_or(&form.color, &COLORS, DEFAULT_COLOR);

    html! {
        form
            hx-post=(endpoints::POST_CATEGORY)
            hx-target-error="#alert-container"
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            (radio_group("icon", "Icon", &ICONS, selected_icon, |icon| html! { (icon) }))

            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Category Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="e.g. Groceries"
                    required
                    autofocus
                    value=(form.name)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="total_budget" class=(FORM_LABEL_STYLE) { "Monthly Budget" }

                div class="input-wrapper"
                {
                    input
                        id="total_budget"
                        type="number"
                        name="total_budget"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        value=(form.total_budget)
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            (radio_group("color", "Colour", &COLORS, selected_color, |color| html! {
                span
                    class="block w-6 h-6 rounded-full"
                    style={"background-color: " (color) ";"}
                    title=(color)
                {}
            }))

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Category" }
        }
    }
}

#[cfg(test)]
mod new_category_page_tests {
    use scraper::Selector;

    use crate::{
        category::{COLORS, DEFAULT_COLOR, DEFAULT_ICON, ICONS},
        endpoints,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_submit_button, assert_hx_endpoint,
            assert_status_ok, assert_valid_html, must_get_form, parse_html_document,
        },
    };

    use super::get_new_category_page;

    #[tokio::test]
    async fn render_page() {
        let response = get_new_category_page().await;

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_CATEGORY, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "total_budget", "number");
        assert_form_submit_button(&form);

        let icons = form
            .select(&Selector::parse("input[type=radio][name=icon]").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(icons.len(), ICONS.len());
        let colors = form
            .select(&Selector::parse("input[type=radio][name=color]").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(colors.len(), COLORS.len());

        let checked = form
            .select(&Selector::parse("input[type=radio][checked]").unwrap())
            .filter_map(|input| input.value().attr("value"))
            .collect::<Vec<_>>();
        assert_eq!(checked, [DEFAULT_ICON, DEFAULT_COLOR]);
    }
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use axum::{
        Extension, Form,
        extract::{FromRef, State},
        http::{StatusCode, header::CONTENT_TYPE},
    };
    use scraper::Selector;

    use crate::{
        category::CategoryForm,
        endpoints,
        stores::CategoryStore,
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, create_test_user,
            get_header, get_test_state, must_get_form, parse_html_fragment,
        },
    };

    use super::{CreateCategoryState, create_category_endpoint};

    fn form(name: &str, total_budget: &str) -> CategoryForm {
        CategoryForm {
            name: name.to_owned(),
            total_budget: total_budget.to_owned(),
            icon: "🏠".to_owned(),
            color: "#FFD36E".to_owned(),
        }
    }

    #[tokio::test]
    async fn can_create_category() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let state = CreateCategoryState::from_ref(&app_state);

        let response = create_category_endpoint(
            State(state.clone()),
            Extension(user.id),
            Form(form(" Rent ", "12000")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::HOME_VIEW);

        let categories = state.category_store.get_by_user(user.id).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name.as_ref(), "Rent");
        assert_eq!(categories[0].total_budget, 12000.0);
        assert_eq!(categories[0].icon, "🏠");
        assert_eq!(categories[0].color, "#FFD36E");
    }

    #[tokio::test]
    async fn create_category_fails_on_empty_name() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let state = CreateCategoryState::from_ref(&app_state);

        let response = create_category_endpoint(
            State(state.clone()),
            Extension(user.id),
            Form(form("  ", "12000")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_header(&response, CONTENT_TYPE.as_str()),
            "text/html; charset=utf-8"
        );
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Category name cannot be empty");
        assert_eq!(state.category_store.get_by_user(user.id), Ok(vec![]));
    }

    #[tokio::test]
    async fn invalid_budget_keeps_entered_values() {
        let app_state = get_test_state();
        let user = create_test_user(&app_state, "asha@example.com");
        let state = CreateCategoryState::from_ref(&app_state);

        let response = create_category_endpoint(
            State(state.clone()),
            Extension(user.id),
            Form(form("Rent", "0")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(
            &form,
            "Error: \"0\" is not a valid budget, enter a number greater than 0",
        );

        let name = form
            .select(&Selector::parse("input[name=name]").unwrap())
            .next()
            .unwrap();
        assert_eq!(name.value().attr("value"), Some("Rent"));
        let checked_icon = form
            .select(&Selector::parse("input[name=icon][checked]").unwrap())
            .next()
            .unwrap();
        assert_eq!(checked_icon.value().attr("value"), Some("🏠"));
        assert_eq!(state.category_store.get_by_user(user.id), Ok(vec![]));
    }
}
