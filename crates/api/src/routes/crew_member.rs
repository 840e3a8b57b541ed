//! Route definitions for the `/crew-members` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use stagehand_db::models::crew_member::CrewMember;

use crate::handlers::crew_member;
use crate::middleware::preload::preload;
use crate::state::AppState;

/// Routes mounted at `/crew-members`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(crew_member::list).post(crew_member::create))
        .route(
            "/{id}",
            get(crew_member::get_by_id)
                .patch(crew_member::update)
                .delete(crew_member::delete)
                .route_layer(from_fn_with_state(state.clone(), preload::<CrewMember>)),
        )
}
