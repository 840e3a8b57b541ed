//! Production entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stagehand_core::types::{DbId, Timestamp};

use crate::models::crew_member::CrewMember;

/// A production row from the `productions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Production {
    pub id: DbId,
    pub title: String,
    pub genre: String,
    pub budget: f64,
    pub image: String,
    pub director: String,
    pub description: String,
    pub ongoing: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A production together with its crew, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProductionDetail {
    #[serde(flatten)]
    pub production: Production,
    pub crew_members: Vec<CrewMember>,
}

/// DTO for creating a new production.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduction {
    pub title: String,
    pub genre: String,
    pub budget: f64,
    pub image: String,
    pub director: String,
    pub description: String,
    /// Defaults to `true` if omitted.
    pub ongoing: Option<bool>,
}

/// DTO for updating an existing production. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduction {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub budget: Option<f64>,
    pub image: Option<String>,
    pub director: Option<String>,
    pub description: Option<String>,
    pub ongoing: Option<bool>,
}
