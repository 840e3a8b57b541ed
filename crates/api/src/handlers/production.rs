//! Handlers for the `/productions` resource.
//!
//! Single-item handlers receive the row through `Extension<Production>`,
//! placed there by the preload middleware.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use stagehand_core::error::CoreError;
use stagehand_core::production;
use stagehand_core::types::DbId;
use stagehand_db::models::crew_member::CrewMember;
use stagehand_db::models::production::{
    CreateProduction, Production, ProductionDetail, UpdateProduction,
};
use stagehand_db::repositories::{CrewMemberRepo, ProductionRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::state::AppState;

fn validate_create_input(input: &CreateProduction) -> AppResult<()> {
    production::validate_title(&input.title)?;
    production::validate_genre(&input.genre)?;
    production::validate_budget(input.budget)?;
    production::validate_image(&input.image)?;
    production::validate_director(&input.director)?;
    production::validate_description(&input.description)?;
    Ok(())
}

/// Only fields present in the patch are checked.
fn validate_update_input(input: &UpdateProduction) -> AppResult<()> {
    if let Some(ref title) = input.title {
        production::validate_title(title)?;
    }
    if let Some(ref genre) = input.genre {
        production::validate_genre(genre)?;
    }
    if let Some(budget) = input.budget {
        production::validate_budget(budget)?;
    }
    if let Some(ref image) = input.image {
        production::validate_image(image)?;
    }
    if let Some(ref director) = input.director {
        production::validate_director(director)?;
    }
    if let Some(ref description) = input.description {
        production::validate_description(description)?;
    }
    Ok(())
}

/// GET /api/v1/productions
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProductionDetail>>> {
    let productions = ProductionRepo::list(&state.pool).await?;

    let mut crew_by_production: HashMap<DbId, Vec<CrewMember>> = HashMap::new();
    for member in CrewMemberRepo::list(&state.pool).await? {
        crew_by_production
            .entry(member.production_id)
            .or_default()
            .push(member);
    }

    let details = productions
        .into_iter()
        .map(|production| ProductionDetail {
            crew_members: crew_by_production.remove(&production.id).unwrap_or_default(),
            production,
        })
        .collect();
    Ok(Json(details))
}

/// POST /api/v1/productions
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateProduction>,
) -> AppResult<(StatusCode, Json<ProductionDetail>)> {
    validate_create_input(&input)?;

    let production = ProductionRepo::create(&state.pool, &input).await?;
    tracing::info!(production_id = production.id, title = %production.title, "Production created");

    Ok((
        StatusCode::CREATED,
        Json(ProductionDetail {
            production,
            crew_members: Vec::new(),
        }),
    ))
}

/// GET /api/v1/productions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(production): Extension<Production>,
) -> AppResult<Json<ProductionDetail>> {
    let crew_members = CrewMemberRepo::list_by_production(&state.pool, production.id).await?;
    Ok(Json(ProductionDetail {
        production,
        crew_members,
    }))
}

/// PATCH /api/v1/productions/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(production): Extension<Production>,
    ValidJson(input): ValidJson<UpdateProduction>,
) -> AppResult<Json<ProductionDetail>> {
    validate_update_input(&input)?;

    let id = production.id;
    let updated = ProductionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Production",
            id,
        }))?;
    tracing::info!(production_id = id, "Production updated");

    let crew_members = CrewMemberRepo::list_by_production(&state.pool, id).await?;
    Ok(Json(ProductionDetail {
        production: updated,
        crew_members,
    }))
}

/// DELETE /api/v1/productions/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(production): Extension<Production>,
) -> AppResult<StatusCode> {
    let deleted = ProductionRepo::delete(&state.pool, production.id).await?;
    if deleted {
        tracing::info!(production_id = production.id, "Production deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Production",
            id: production.id,
        }))
    }
}
