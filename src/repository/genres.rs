//! Genres repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::genre::{CreateGenre, Genre, GenreQuery, UpdateGenre},
};

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get genre by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre with id {} not found", id)))
    }

    /// Search genres with pagination
    pub async fn search(&self, query: &GenreQuery) -> AppResult<(Vec<Genre>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM genres WHERE $1::text IS NULL OR LOWER(name) LIKE '%' || LOWER($1) || '%'",
        )
        .bind(&query.name)
        .fetch_one(&self.pool)
        .await?;

        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT id, name FROM genres
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

        Ok((genres, total))
    }

    /// Create a new genre
    pub async fn create(&self, genre: &CreateGenre) -> AppResult<Genre> {
        let created = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&genre.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing genre
    pub async fn update(&self, id: i32, genre: &UpdateGenre) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(&genre.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Genre with id {} not found", id)))
    }

    /// Delete a genre. Junction rows to books go with it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Genre with id {} not found", id)));
        }
        Ok(())
    }
}
