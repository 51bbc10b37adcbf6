//! The registration page for creating an account with an email and password.

use std::str::FromStr;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use email_address::EmailAddress;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    auth::{PasswordHash, ValidatedPassword, set_auth_cookie},
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base, email_input, loading_spinner,
        log_in_register, password_input,
    },
    stores::UserStore,
};

/// The minimum number of characters the password should have to be considered valid on the client side (server-side validation is done on top of this validation).
const PASSWORD_INPUT_MIN_LENGTH: u8 = 14;

fn confirm_password_input(min_length: u8, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="confirm-password"
                class=(FORM_LABEL_STYLE)
            {
                "Confirm Password"
            }

            input
                type="password"
                name="confirm_password"
                id="confirm-password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                minlength=(min_length)
                autofocus[error_message.is_some()]
            ;

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }
    }
}

/// Error messages to show next to the fields of the registration form.
#[derive(Debug, Default)]
struct RegistrationErrors<'a> {
    email: Option<&'a str>,
    password: Option<&'a str>,
    confirm_password: Option<&'a str>,
}

fn registration_form(email: &str, password: &str, errors: RegistrationErrors) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #confirm-password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            (email_input(email, errors.email))
            (password_input("password", "Password", password, PASSWORD_INPUT_MIN_LENGTH, errors.password))
            (confirm_password_input(PASSWORD_INPUT_MIN_LENGTH, errors.confirm_password))

            button
                type="submit" id="submit-button" tabindex="0"
                class="w-full px-4 py-2 bg-blue-500 dark:bg-blue-600 disabled:bg-blue-700
                    hover:enabled:bg-blue-600 hover:enabled:dark:bg-blue-700 text-white rounded"
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Create Account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "

                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let registration_form = registration_form("", "", RegistrationErrors::default());
    let content = log_in_register("Create an account", &registration_form);
    base("Register", &[], &content).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState<U> {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    pub user_store: U,
}

impl<C, E, U> FromRef<AppState<C, E, U>> for RegistrationState<U>
where
    U: Clone,
{
    fn from_ref(state: &AppState<C, E, U>) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            user_store: state.user_store.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl<U> FromRef<RegistrationState<U>> for Key {
    fn from_ref(state: &RegistrationState<U>) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Default, Serialize, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

pub const MISSING_FIELDS_ERROR_MSG: &str = "Missing Fields: please enter email and password.";
pub const PASSWORDS_DO_NOT_MATCH_ERROR_MSG: &str = "Passwords do not match";
pub const DUPLICATE_EMAIL_ERROR_MSG: &str =
    "An account with this email already exists, please log in instead.";

fn internal_server_error_redirect() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
    )
        .into_response()
}

/// Create a user from the registration form, log them in and redirect to the home page.
///
/// Validation problems are shown next to the offending field, checked in
/// order: missing fields, email, password strength, password confirmation,
/// then whether the email is already taken.
pub async fn register_user<U>(
    State(state): State<RegistrationState<U>>,
    jar: PrivateCookieJar,
    Form(user_data): Form<RegisterForm>,
) -> Response
where
    U: UserStore + Clone + Send + Sync,
{
    let raw_email = user_data.email.trim();

    if raw_email.is_empty() || user_data.password.is_empty() {
        return registration_form(
            raw_email,
            &user_data.password,
            RegistrationErrors {
                password: Some(MISSING_FIELDS_ERROR_MSG),
                ..Default::default()
            },
        )
        .into_response();
    }

    let email = match EmailAddress::from_str(raw_email) {
        Ok(email) => email,
        Err(error) => {
            let message = Error::InvalidEmail(error.to_string()).to_string();
            return registration_form(
                raw_email,
                &user_data.password,
                RegistrationErrors {
                    email: Some(&message),
                    ..Default::default()
                },
            )
            .into_response();
        }
    };

    let validated_password = match ValidatedPassword::new(&user_data.password) {
        Ok(password) => password,
        Err(error) => {
            let message = error.to_string();
            return registration_form(
                raw_email,
                &user_data.password,
                RegistrationErrors {
                    password: Some(&message),
                    ..Default::default()
                },
            )
            .into_response();
        }
    };

    if user_data.password != user_data.confirm_password {
        return registration_form(
            raw_email,
            &user_data.password,
            RegistrationErrors {
                confirm_password: Some(PASSWORDS_DO_NOT_MATCH_ERROR_MSG),
                ..Default::default()
            },
        )
        .into_response();
    }

    let password_hash = match PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("an error occurred while hashing a password: {e}");

            return internal_server_error_redirect();
        }
    };

    let user = match state.user_store.create(email, password_hash) {
        Ok(user) => user,
        Err(Error::DuplicateEmail) => {
            return registration_form(
                raw_email,
                "",
                RegistrationErrors {
                    email: Some(DUPLICATE_EMAIL_ERROR_MSG),
                    ..Default::default()
                },
            )
            .into_response();
        }
        Err(e) => {
            tracing::error!("An unhandled error occurred while inserting a new user: {e}");

            return internal_server_error_redirect();
        }
    };

    match set_auth_cookie(jar, user.id, state.cookie_duration) {
        Ok(jar) => (
            StatusCode::SEE_OTHER,
            HxRedirect(endpoints::HOME_VIEW.to_owned()),
            jar,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("An error occurred while setting the auth cookie: {e}");

            internal_server_error_redirect()
        }
    }
}
