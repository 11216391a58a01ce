//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT id, first_name, last_name FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Search authors with pagination, ordered by (last_name, first_name)
    pub async fn search(&self, query: &AuthorQuery) -> AppResult<(Vec<Author>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM authors
            WHERE $1::text IS NULL
               OR LOWER(first_name) LIKE '%' || LOWER($1) || '%'
               OR LOWER(last_name) LIKE '%' || LOWER($1) || '%'
            "#,
        )
        .bind(&query.name)
        .fetch_one(&self.pool)
        .await?;

        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name FROM authors
            WHERE $1::text IS NULL
               OR LOWER(first_name) LIKE '%' || LOWER($1) || '%'
               OR LOWER(last_name) LIKE '%' || LOWER($1) || '%'
            ORDER BY last_name, first_name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&query.name)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((authors, total))
    }

    /// Create a new author
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name)
            VALUES ($1, $2)
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing author
    pub async fn update(&self, id: i32, author: &UpdateAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name)
            WHERE id = $3
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Delete an author. Junction rows to books go with it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }
        Ok(())
    }
}
