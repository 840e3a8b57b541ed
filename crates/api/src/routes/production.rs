//! Route definitions for the `/productions` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use stagehand_db::models::production::Production;

use crate::handlers::production;
use crate::middleware::preload::preload;
use crate::state::AppState;

/// Routes mounted at `/productions`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
///
/// The preload layer sits on the `/{id}` method router, so an unknown id is a
/// 404 before any handler runs while unsupported methods still get a 405.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(production::list).post(production::create))
        .route(
            "/{id}",
            get(production::get_by_id)
                .patch(production::update)
                .delete(production::delete)
                .route_layer(from_fn_with_state(state.clone(), preload::<Production>)),
        )
}
