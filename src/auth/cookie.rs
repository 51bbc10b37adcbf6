//! Reading and writing the encrypted session cookie.

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    auth::{Token, UserID},
};

/// The name of the cookie holding the session [Token].
pub(crate) const COOKIE_TOKEN: &str = "token";
/// How long a session lasts without activity.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(5);

fn build_token_cookie(value: String, expires_at: OffsetDateTime) -> Cookie<'static> {
    Cookie::build((COOKIE_TOKEN, value))
        .expires(expires_at)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .build()
}

/// Log in `user_id` by adding a session cookie that expires `duration` from now.
///
/// # Errors
///
/// Returns [Error::DateError] if the expiry overflows, or
/// [Error::JSONSerializationError] if the token cannot be encoded.
pub fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let token = Token::new(user_id, duration)?;
    let cookie = build_token_cookie(token.to_json()?, token.expires_at);

    Ok(jar.add(cookie))
}

/// Overwrite the session cookie with an expired placeholder so the browser drops it.
pub fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    let mut cookie = build_token_cookie("deleted".to_owned(), OffsetDateTime::UNIX_EPOCH);
    cookie.set_max_age(Duration::ZERO);

    jar.add(cookie)
}

/// Decode and check the session token in `jar`.
///
/// # Errors
///
/// - [Error::CookieMissing] if there is no session cookie.
/// - [Error::InvalidToken] if the cookie does not hold a token, or the token has expired.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::CookieMissing)?;
    let token = Token::from_json(cookie.value_trimmed())?;

    if token.is_expired() {
        return Err(Error::InvalidToken("token has expired".to_owned()));
    }

    Ok(token)
}

/// Push the session expiry out to `duration` from now, unless it already
/// expires later than that (e.g. a "remember me" session).
///
/// # Errors
///
/// The jar is not modified if an error is returned. See
/// [get_token_from_cookies] and [Token::new] for the error cases.
pub(crate) fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let token = get_token_from_cookies(&jar)?;
    let extended = Token::new(token.user_id, duration)?;

    let expires_at = max(token.expires_at, extended.expires_at);
    let token = Token {
        user_id: token.user_id,
        expires_at,
    };

    Ok(jar.add(build_token_cookie(token.to_json()?, expires_at)))
}
