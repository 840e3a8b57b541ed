//! `GET /health`: liveness plus a database round-trip, mounted at the root.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    /// The process is up but SQLite did not answer.
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthReport {
    fn from_db_check(result: Result<(), sqlx::Error>) -> Self {
        let db_healthy = match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Health check could not reach the database");
                false
            }
        };
        Self {
            status: if db_healthy {
                HealthStatus::Ok
            } else {
                HealthStatus::Degraded
            },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport::from_db_check(
        stagehand_db::health_check(&state.pool).await,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
