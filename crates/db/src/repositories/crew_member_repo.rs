//! Repository for the `crew_members` table.

use sqlx::SqlitePool;
use stagehand_core::types::DbId;

use super::NOW;
use crate::models::crew_member::{CreateCrewMember, CrewMember, UpdateCrewMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, role, production_id, created_at, updated_at";

/// Provides CRUD operations for crew members.
pub struct CrewMemberRepo;

impl CrewMemberRepo {
    /// Insert a new crew member, returning the created row.
    ///
    /// Fails with a foreign-key violation if `production_id` does not exist.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateCrewMember,
    ) -> Result<CrewMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO crew_members (name, role, production_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CrewMember>(&query)
            .bind(&input.name)
            .bind(&input.role)
            .bind(input.production_id)
            .fetch_one(pool)
            .await
    }

    /// Find a crew member by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<CrewMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM crew_members WHERE id = $1");
        sqlx::query_as::<_, CrewMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all crew members in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<CrewMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM crew_members ORDER BY id");
        sqlx::query_as::<_, CrewMember>(&query).fetch_all(pool).await
    }

    /// List the crew of one production in insertion order.
    pub async fn list_by_production(
        pool: &SqlitePool,
        production_id: DbId,
    ) -> Result<Vec<CrewMember>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM crew_members WHERE production_id = $1 ORDER BY id");
        sqlx::query_as::<_, CrewMember>(&query)
            .bind(production_id)
            .fetch_all(pool)
            .await
    }

    /// Update a crew member. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateCrewMember,
    ) -> Result<Option<CrewMember>, sqlx::Error> {
        let query = format!(
            "UPDATE crew_members SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                production_id = COALESCE($4, production_id),
                updated_at = {NOW}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CrewMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(input.production_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a crew member by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM crew_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
