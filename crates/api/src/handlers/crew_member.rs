//! Handlers for the `/crew-members` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use stagehand_core::crew_member;
use stagehand_core::error::CoreError;
use stagehand_db::models::crew_member::{CreateCrewMember, CrewMember, UpdateCrewMember};
use stagehand_db::repositories::CrewMemberRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::state::AppState;

fn validate_create_input(input: &CreateCrewMember) -> AppResult<()> {
    crew_member::validate_name(&input.name)?;
    crew_member::validate_role(&input.role)?;
    crew_member::validate_production_id(input.production_id)?;
    Ok(())
}

fn validate_update_input(input: &UpdateCrewMember) -> AppResult<()> {
    if let Some(ref name) = input.name {
        crew_member::validate_name(name)?;
    }
    if let Some(ref role) = input.role {
        crew_member::validate_role(role)?;
    }
    if let Some(production_id) = input.production_id {
        crew_member::validate_production_id(production_id)?;
    }
    Ok(())
}

/// GET /api/v1/crew-members
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CrewMember>>> {
    let members = CrewMemberRepo::list(&state.pool).await?;
    Ok(Json(members))
}

/// POST /api/v1/crew-members
///
/// A `production_id` that names no production is rejected by the store's
/// foreign key and surfaces as 422.
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateCrewMember>,
) -> AppResult<(StatusCode, Json<CrewMember>)> {
    validate_create_input(&input)?;

    let member = CrewMemberRepo::create(&state.pool, &input).await?;
    tracing::info!(
        crew_member_id = member.id,
        production_id = member.production_id,
        "Crew member created",
    );
    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /api/v1/crew-members/{id}
pub async fn get_by_id(Extension(member): Extension<CrewMember>) -> Json<CrewMember> {
    Json(member)
}

/// PATCH /api/v1/crew-members/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(member): Extension<CrewMember>,
    ValidJson(input): ValidJson<UpdateCrewMember>,
) -> AppResult<Json<CrewMember>> {
    validate_update_input(&input)?;

    let updated = CrewMemberRepo::update(&state.pool, member.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CrewMember",
            id: member.id,
        }))?;
    tracing::info!(crew_member_id = member.id, "Crew member updated");
    Ok(Json(updated))
}

/// DELETE /api/v1/crew-members/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(member): Extension<CrewMember>,
) -> AppResult<StatusCode> {
    if CrewMemberRepo::delete(&state.pool, member.id).await? {
        tracing::info!(crew_member_id = member.id, "Crew member deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "CrewMember",
            id: member.id,
        }))
    }
}
