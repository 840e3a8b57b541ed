//! Route definitions for account and session endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted directly under `/api/v1`.
///
/// ```text
/// POST   /signup         -> signup
/// POST   /signin         -> signin
/// POST   /refresh_token  -> refresh (requires refresh token)
/// DELETE /logout         -> logout
/// GET    /me             -> me (requires access token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/refresh_token", post(auth::refresh))
        .route("/logout", delete(auth::logout))
        .route("/me", get(auth::me))
}
