//! Shelves repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::shelf::{CreateShelf, Shelf, ShelfQuery, UpdateShelf},
};

#[derive(Clone)]
pub struct ShelvesRepository {
    pool: Pool<Postgres>,
}

impl ShelvesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get shelf by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Shelf> {
        sqlx::query_as::<_, Shelf>("SELECT id, name FROM shelves WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shelf with id {} not found", id)))
    }

    /// Search shelves with pagination
    pub async fn search(&self, query: &ShelfQuery) -> AppResult<(Vec<Shelf>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM shelves WHERE $1::text IS NULL OR LOWER(name) LIKE '%' || LOWER($1) || '%'",
        )
        .bind(&query.name)
        .fetch_one(&self.pool)
        .await?;

        let shelves = sqlx::query_as::<_, Shelf>(
            r#"
            SELECT id, name FROM shelves
            WHERE $1::text IS NULL OR LOWER(name) LIKE '%' || LOWER($1) || '%'
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&query.name)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((shelves, total))
    }

    /// Create a new shelf
    pub async fn create(&self, shelf: &CreateShelf) -> AppResult<Shelf> {
        let created = sqlx::query_as::<_, Shelf>(
            "INSERT INTO shelves (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&shelf.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing shelf
    pub async fn update(&self, id: i32, shelf: &UpdateShelf) -> AppResult<Shelf> {
        sqlx::query_as::<_, Shelf>(
            "UPDATE shelves SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(&shelf.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shelf with id {} not found", id)))
    }

    /// Delete a shelf. Copies on it keep existing with a null shelf reference.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM shelves WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Shelf with id {} not found", id)));
        }
        Ok(())
    }
}
