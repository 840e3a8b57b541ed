//! Token cookies: setting them after signin/refresh and clearing them on logout.
//!
//! Each token travels in an HttpOnly cookie. When CSRF protection is on, the
//! token's `csrf` claim is also written to a readable cookie so the browser
//! client can echo it back in the `X-CSRF-TOKEN` header.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::jwt::{IssuedToken, JwtConfig, TokenKind};

pub const ACCESS_COOKIE: &str = "access_token_cookie";
pub const REFRESH_COOKIE: &str = "refresh_token_cookie";
pub const ACCESS_CSRF_COOKIE: &str = "csrf_access_token";
pub const REFRESH_CSRF_COOKIE: &str = "csrf_refresh_token";

/// Header the client uses to echo the CSRF cookie value.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Name of the cookie carrying a token of the given kind.
pub fn token_cookie_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Access => ACCESS_COOKIE,
        TokenKind::Refresh => REFRESH_COOKIE,
    }
}

fn csrf_cookie_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Access => ACCESS_CSRF_COOKIE,
        TokenKind::Refresh => REFRESH_CSRF_COOKIE,
    }
}

/// Add the cookies for `issued` (and its CSRF companion) to `jar`.
pub fn set_token_cookies(
    jar: CookieJar,
    kind: TokenKind,
    issued: &IssuedToken,
    config: &JwtConfig,
) -> CookieJar {
    let max_age = time::Duration::seconds(issued.max_age_secs);

    let token_cookie = Cookie::build((token_cookie_name(kind), issued.token.clone()))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build();
    let jar = jar.add(token_cookie);

    if !config.csrf_protect {
        return jar;
    }

    let csrf_cookie = Cookie::build((csrf_cookie_name(kind), issued.csrf.clone()))
        .path("/")
        .http_only(false)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build();
    jar.add(csrf_cookie)
}

/// Expire every token and CSRF cookie.
///
/// Removal cookies are added outright rather than through `CookieJar::remove`,
/// which only emits them for cookies the request itself carried.
pub fn unset_token_cookies(jar: CookieJar) -> CookieJar {
    [
        ACCESS_COOKIE,
        REFRESH_COOKIE,
        ACCESS_CSRF_COOKIE,
        REFRESH_CSRF_COOKIE,
    ]
    .into_iter()
    .fold(jar, |jar, name| {
        let mut cookie = Cookie::build((name, "")).path("/").build();
        cookie.make_removal();
        jar.add(cookie)
    })
}
