pub mod auth;
pub mod crew_member;
pub mod health;
pub mod production;

use axum::extract::OriginalUri;
use axum::http::header::{ALLOW, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /signup                     create account, start session (public)
/// /signin                     start session (public)
/// /refresh_token              new access token (refresh token)
/// /logout                     clear session cookies (public)
/// /me                         current user (access token)
///
/// /productions                list, create
/// /productions/{id}           get, update, delete
///
/// /crew-members               list, create
/// /crew-members/{id}          get, update, delete
/// ```
///
/// Unknown paths under the prefix answer with a JSON 404, and a known path
/// hit with the wrong method answers with a JSON 405.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/productions", production::router(state))
        .nest("/crew-members", crew_member::router(state))
        .fallback(api_not_found)
        .layer(map_response(json_method_not_allowed))
}

async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

/// Give the router's bare 405 a JSON body, keeping its `Allow` header.
async fn json_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED
        || response.headers().contains_key(CONTENT_TYPE)
    {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    let mut json = AppError::MethodNotAllowed.into_response();
    if let Some(allow) = parts.headers.remove(ALLOW) {
        json.headers_mut().insert(ALLOW, allow);
    }
    json
}
