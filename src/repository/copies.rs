//! Book copies repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::copy::{BookCopy, CopyQuery, CopyStatus, CreateCopy, UpdateCopy},
};

const COPY_SELECT: &str = r#"
    SELECT c.id, c.uid, c.book_id, c.due_back, c.shelf_id, c.issued_to, c.status,
           b.title as book_title, s.name as shelf_name
    FROM copies c
    LEFT JOIN books b ON b.id = c.book_id
    LEFT JOIN shelves s ON s.id = c.shelf_id
"#;

#[derive(Clone)]
pub struct CopiesRepository {
    pool: Pool<Postgres>,
}

impl CopiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get copy by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BookCopy> {
        sqlx::query_as::<_, BookCopy>(&format!("{} WHERE c.id = $1", COPY_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copy with id {} not found", id)))
    }

    /// Get copy by its library-wide unique id
    pub async fn get_by_uid(&self, uid: &str) -> AppResult<BookCopy> {
        sqlx::query_as::<_, BookCopy>(&format!("{} WHERE c.uid = $1", COPY_SELECT))
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copy with uid {} not found", uid)))
    }

    /// Search copies with pagination, ordered by due date
    pub async fn search(&self, query: &CopyQuery) -> AppResult<(Vec<BookCopy>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let where_clause = r#"
            ($1::text IS NULL OR c.status = $1)
            AND ($2::date IS NULL OR c.due_back = $2)
            AND ($3::text IS NULL OR LOWER(b.title) LIKE '%' || LOWER($3) || '%')
        "#;

        let count_query = format!(
            "SELECT COUNT(*) FROM copies c LEFT JOIN books b ON b.id = c.book_id WHERE {}",
            where_clause
        );
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&query.status)
            .bind(query.due_back)
            .bind(&query.book)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "{} WHERE {} ORDER BY c.due_back LIMIT $4 OFFSET $5",
            COPY_SELECT, where_clause
        );
        let copies = sqlx::query_as::<_, BookCopy>(&select_query)
            .bind(&query.status)
            .bind(query.due_back)
            .bind(&query.book)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((copies, total))
    }

    /// List all copies of a book, ordered by due date
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<BookCopy>> {
        let copies = sqlx::query_as::<_, BookCopy>(&format!(
            "{} WHERE c.book_id = $1 ORDER BY c.due_back",
            COPY_SELECT
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(copies)
    }

    /// Create a new copy of a book. A duplicate uid surfaces as Conflict.
    pub async fn create(&self, book_id: i32, uid: &str, copy: &CreateCopy) -> AppResult<BookCopy> {
        let status = copy.status.unwrap_or_default();

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO copies (uid, book_id, due_back, shelf_id, issued_to, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(uid)
        .bind(book_id)
        .bind(copy.due_back)
        .bind(copy.shelf_id)
        .bind(copy.issued_to)
        .bind(status.as_code())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "A copy with this uid already exists"))?;

        self.get_by_id(id).await
    }

    /// Update an existing copy
    pub async fn update(&self, id: i32, copy: &UpdateCopy) -> AppResult<BookCopy> {
        let status = copy.status.map(|s| s.as_code());

        let updated = sqlx::query(
            r#"
            UPDATE copies
            SET book_id = COALESCE($1, book_id),
                due_back = COALESCE($2, due_back),
                shelf_id = COALESCE($3, shelf_id),
                issued_to = COALESCE($4, issued_to),
                status = COALESCE($5, status)
            WHERE id = $6
            "#,
        )
        .bind(copy.book_id)
        .bind(copy.due_back)
        .bind(copy.shelf_id)
        .bind(copy.issued_to)
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Copy with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Persist a status change
    pub async fn set_status(&self, id: i32, status: CopyStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE copies SET status = $1 WHERE id = $2")
            .bind(status.as_code())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Copy with id {} not found", id)));
        }
        Ok(())
    }

    /// Titles of the books whose copies are issued to a student
    pub async fn borrowed_titles(&self, student_id: i32) -> AppResult<Vec<String>> {
        let titles: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT b.title
            FROM copies c
            JOIN books b ON b.id = c.book_id
            WHERE c.issued_to = $1
            ORDER BY c.due_back
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(titles)
    }

    /// Delete a copy
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM copies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Copy with id {} not found", id)));
        }
        Ok(())
    }
}
