//! JWT-based authentication extractors for Axum handlers.
//!
//! Tokens are looked up in the configured locations, in order: the
//! `Authorization: Bearer` header and/or the token cookie. A token read from a
//! cookie on a state-changing request must be accompanied by a matching
//! `X-CSRF-TOKEN` header when CSRF protection is enabled.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Method;
use axum_extra::extract::cookie::CookieJar;
use stagehand_core::error::CoreError;
use stagehand_core::types::DbId;

use crate::auth::cookies::{token_cookie_name, CSRF_HEADER};
use crate::auth::jwt::{validate_token, Claims, TokenKind, TokenLocation};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a valid access token.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, state, TokenKind::Access)?;
        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

/// User identity extracted from a valid refresh token. Only the refresh
/// endpoint accepts this.
#[derive(Debug, Clone)]
pub struct RefreshUser {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for RefreshUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, state, TokenKind::Refresh)?;
        Ok(RefreshUser {
            user_id: claims.sub,
        })
    }
}

fn unauthorized(msg: impl Into<String>) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Find, validate, and CSRF-check a token of the given kind.
fn claims_from_parts(
    parts: &Parts,
    state: &AppState,
    kind: TokenKind,
) -> Result<Claims, AppError> {
    let jwt = &state.config.jwt;
    let mut malformed_header = false;

    for location in &jwt.token_locations {
        match location {
            TokenLocation::Headers => {
                let Some(header) = parts.headers.get("authorization") else {
                    continue;
                };
                // A non-Bearer scheme leaves the remaining locations to try.
                let Some(token) = header.to_str().ok().and_then(|v| v.strip_prefix("Bearer "))
                else {
                    malformed_header = true;
                    continue;
                };
                return validate(token, kind, state);
            }
            TokenLocation::Cookies => {
                let jar = CookieJar::from_headers(&parts.headers);
                let Some(cookie) = jar.get(token_cookie_name(kind)) else {
                    continue;
                };
                let claims = validate(cookie.value(), kind, state)?;
                if jwt.csrf_protect && !is_safe_method(&parts.method) {
                    check_csrf(parts, &claims)?;
                }
                return Ok(claims);
            }
        }
    }

    if malformed_header {
        return Err(unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>",
        ));
    }
    Err(unauthorized(format!("Missing {} token", kind.as_str())))
}

fn validate(token: &str, kind: TokenKind, state: &AppState) -> Result<Claims, AppError> {
    validate_token(token, kind, &state.config.jwt).map_err(|e| {
        tracing::debug!(error = %e, kind = kind.as_str(), "Token rejected");
        unauthorized("Invalid or expired token")
    })
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE)
}

fn check_csrf(parts: &Parts, claims: &Claims) -> Result<(), AppError> {
    let presented = parts
        .headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing CSRF token"))?;
    if presented != claims.csrf {
        return Err(unauthorized("CSRF token does not match"));
    }
    Ok(())
}
