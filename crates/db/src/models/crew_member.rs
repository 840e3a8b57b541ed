//! Crew member entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stagehand_core::types::{DbId, Timestamp};

/// A crew member row from the `crew_members` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CrewMember {
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub production_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new crew member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCrewMember {
    pub name: String,
    pub role: String,
    pub production_id: DbId,
}

/// DTO for updating an existing crew member. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCrewMember {
    pub name: Option<String>,
    pub role: Option<String>,
    pub production_id: Option<DbId>,
}
