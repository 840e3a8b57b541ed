//! Repository for the `productions` table.

use sqlx::SqlitePool;
use stagehand_core::types::DbId;

use super::NOW;
use crate::models::production::{CreateProduction, Production, UpdateProduction};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, genre, budget, image, director, description, ongoing, created_at, updated_at";

/// Provides CRUD operations for productions.
pub struct ProductionRepo;

impl ProductionRepo {
    /// Insert a new production, returning the created row.
    ///
    /// If `ongoing` is `None` in the input, defaults to `true`.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateProduction,
    ) -> Result<Production, sqlx::Error> {
        let query = format!(
            "INSERT INTO productions (title, genre, budget, image, director, description, ongoing)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Production>(&query)
            .bind(&input.title)
            .bind(&input.genre)
            .bind(input.budget)
            .bind(&input.image)
            .bind(&input.director)
            .bind(&input.description)
            .bind(input.ongoing)
            .fetch_one(pool)
            .await
    }

    /// Find a production by its internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Production>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM productions WHERE id = $1");
        sqlx::query_as::<_, Production>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all productions in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Production>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM productions ORDER BY id");
        sqlx::query_as::<_, Production>(&query).fetch_all(pool).await
    }

    /// Update a production. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateProduction,
    ) -> Result<Option<Production>, sqlx::Error> {
        let query = format!(
            "UPDATE productions SET
                title = COALESCE($2, title),
                genre = COALESCE($3, genre),
                budget = COALESCE($4, budget),
                image = COALESCE($5, image),
                director = COALESCE($6, director),
                description = COALESCE($7, description),
                ongoing = COALESCE($8, ongoing),
                updated_at = {NOW}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Production>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.genre)
            .bind(input.budget)
            .bind(&input.image)
            .bind(&input.director)
            .bind(&input.description)
            .bind(input.ongoing)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a production by ID. Returns `true` if a row was removed.
    ///
    /// Crew members referencing the production are removed by the
    /// `ON DELETE CASCADE` foreign key.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM productions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
