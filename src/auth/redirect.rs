//! Where to send the user after they log in.
//!
//! The target is carried as a `redirect_url` query parameter on the log-in
//! page. Only same-origin paths are accepted.

use axum::{extract::Request, http::Uri};
use tracing::{error, warn};

use crate::endpoints;

fn is_safe_redirect_url(redirect_url: &str) -> bool {
    if !redirect_url.starts_with('/') || redirect_url.starts_with("//") {
        return false;
    }

    let path = redirect_url
        .split_once('?')
        .map_or(redirect_url, |(path, _)| path);

    path != endpoints::LOG_IN_VIEW && path != endpoints::REGISTER_VIEW
}

fn path_and_query(uri: &Uri) -> Option<String> {
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

/// Reduce `raw_url` to a same-origin path and query, or `None` if it points
/// somewhere else.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }

    path_and_query(&uri)
}

/// Build the log-in URL that returns the user to the page `request` came from.
///
/// Page requests return to their own URI. htmx requests to `/api` routes
/// return to the page that issued them, taken from `HX-Current-URL`.
pub fn build_log_in_redirect_url(request: &Request) -> Option<String> {
    let target = if request.uri().path().starts_with("/api") {
        redirect_target_from_hx_request(request)?
    } else {
        normalize_redirect_url(request.uri().path_and_query()?.as_str())?
    };

    build_log_in_redirect_url_from_target(&target)
}

pub(super) fn build_log_in_redirect_url_from_target(target: &str) -> Option<String> {
    match serde_urlencoded::to_string([("redirect_url", target)]) {
        Ok(query) => Some(format!("{}?{query}", endpoints::LOG_IN_VIEW)),
        Err(err) => {
            error!("Could not encode redirect URL {target}: {err}");
            None
        }
    }
}

fn redirect_target_from_hx_request(request: &Request) -> Option<String> {
    let headers = request.headers();
    let is_hx_request = headers
        .get("hx-request")
        .and_then(|header| header.to_str().ok())
        .is_some_and(|header| header.eq_ignore_ascii_case("true"));

    if !is_hx_request {
        warn!("Missing HX-Request header for /api request.");
        return None;
    }

    let Some(current_url) = headers
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())
    else {
        warn!("Missing HX-Current-URL header for /api request.");
        return None;
    };

    // HX-Current-URL is absolute, so only the path and query are kept.
    let target = current_url.parse::<Uri>().ok().and_then(|uri| path_and_query(&uri));
    if target.is_none() {
        warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    target
}

#[cfg(test)]
mod redirect_tests {
    use axum::{body::Body, extract::Request};

    use crate::endpoints;

    use super::{build_log_in_redirect_url, normalize_redirect_url};

    #[test]
    fn keeps_local_path_and_query() {
        assert_eq!(
            normalize_redirect_url("/categories/3/expenses?amount=12"),
            Some("/categories/3/expenses?amount=12".to_owned())
        );
    }

    #[test]
    fn rejects_other_origins() {
        assert_eq!(normalize_redirect_url("https://example.com/home"), None);
        assert_eq!(normalize_redirect_url("//example.com/home"), None);
        assert_eq!(normalize_redirect_url("home"), None);
    }

    #[test]
    fn rejects_auth_pages() {
        assert_eq!(normalize_redirect_url(endpoints::LOG_IN_VIEW), None);
        assert_eq!(normalize_redirect_url(endpoints::REGISTER_VIEW), None);
    }

    #[test]
    fn page_request_redirects_back_to_itself() {
        let request = Request::get("/categories/3/expenses")
            .body(Body::empty())
            .unwrap();

        let url = build_log_in_redirect_url(&request);

        assert_eq!(
            url,
            Some("/log_in?redirect_url=%2Fcategories%2F3%2Fexpenses".to_owned())
        );
    }

    #[test]
    fn api_request_redirects_to_current_page() {
        let request = Request::delete("/api/expenses/1")
            .header("HX-Request", "true")
            .header("HX-Current-URL", "http://localhost:3000/home")
            .body(Body::empty())
            .unwrap();

        let url = build_log_in_redirect_url(&request);

        assert_eq!(url, Some("/log_in?redirect_url=%2Fhome".to_owned()));
    }

    #[test]
    fn api_request_without_htmx_has_no_target() {
        let request = Request::delete("/api/expenses/1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(build_log_in_redirect_url(&request), None);
    }
}
