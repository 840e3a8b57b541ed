//! Entity preloading for `/{id}` routes.
//!
//! [`preload`] is composed onto a route group with `route_layer`, once per
//! entity type. It resolves the path id before the handler runs and stores the
//! row in the request extensions, so handlers take `Extension<T>` instead of
//! repeating the lookup. Unknown ids never reach the handler.

use std::future::Future;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use stagehand_core::error::CoreError;
use stagehand_core::types::DbId;
use stagehand_db::models::crew_member::CrewMember;
use stagehand_db::models::production::Production;
use stagehand_db::repositories::{CrewMemberRepo, ProductionRepo};
use stagehand_db::DbPool;

use crate::error::AppError;
use crate::state::AppState;

/// An entity that can be loaded by primary key for a single-item route.
pub trait Preload: Clone + Send + Sync + 'static {
    /// Display name used in the 404 message.
    const ENTITY: &'static str;

    fn find(
        pool: &DbPool,
        id: DbId,
    ) -> impl Future<Output = Result<Option<Self>, sqlx::Error>> + Send;
}

impl Preload for Production {
    const ENTITY: &'static str = "Production";

    fn find(
        pool: &DbPool,
        id: DbId,
    ) -> impl Future<Output = Result<Option<Self>, sqlx::Error>> + Send {
        ProductionRepo::find_by_id(pool, id)
    }
}

impl Preload for CrewMember {
    const ENTITY: &'static str = "CrewMember";

    fn find(
        pool: &DbPool,
        id: DbId,
    ) -> impl Future<Output = Result<Option<Self>, sqlx::Error>> + Send {
        CrewMemberRepo::find_by_id(pool, id)
    }
}

/// Load the `T` named by the `{id}` path segment, or short-circuit with 404.
pub async fn preload<T: Preload>(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Path(id) = path.map_err(|_| {
        AppError::BadRequest(format!("{} id must be an integer", T::ENTITY))
    })?;

    let entity = T::find(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: T::ENTITY,
            id,
        }))?;

    tracing::debug!(entity = T::ENTITY, id, "Preloaded entity");
    request.extensions_mut().insert(entity);
    Ok(next.run(request).await)
}
