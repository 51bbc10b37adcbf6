//! Alert system for displaying success and error messages to users.
//!
//! Error alerts are returned as the body of failed htmx requests, which the
//! page swaps into `#alert-container` via `hx-target-error`. Success alerts are
//! sent as out-of-band swaps so that they can accompany a response whose main
//! content goes elsewhere (or nowhere, e.g. `hx-swap="delete"`).

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// The container that alerts are swapped into.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// A message to show the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action succeeded and the message says all there is to say.
    SuccessSimple { message: String },
    /// The action failed, `details` should tell the user what to do about it.
    Error { message: String, details: String },
}

impl Alert {
    fn view(&self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::SuccessSimple { message } => (
                "text-green-800 border-green-300 bg-green-50 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                message.as_str(),
                "",
            ),
            Alert::Error { message, details } => (
                "text-red-800 border-red-300 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                message.as_str(),
                details.as_str(),
            ),
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/#border-accent
        html! {
            div
                role="alert"
                class={"flex items-start justify-between gap-4 p-4 mb-4 border rounded-lg " (container_style)}
            {
                div
                {
                    p class="font-semibold" { (message) }

                    @if !details.is_empty() {
                        p class="text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="text-lg leading-none cursor-pointer"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }

    /// Render the alert.
    ///
    /// Success alerts are wrapped in an out-of-band swap of the alert container.
    pub fn into_html(self) -> Markup {
        match self {
            Alert::Error { .. } => self.view(),
            Alert::SuccessSimple { .. } => html! {
                div
                    id=(ALERT_CONTAINER_ID)
                    hx-swap-oob="true"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {
                    (self.view())
                }
            },
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}
