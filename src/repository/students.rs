//! Students repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::student::{Student, StudentQuery},
};

const STUDENT_SELECT: &str = r#"
    SELECT st.id, st.user_id, u.username, u.email
    FROM students st
    JOIN users u ON u.id = st.user_id
"#;

#[derive(Clone)]
pub struct StudentsRepository {
    pool: Pool<Postgres>,
}

impl StudentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get student by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Student> {
        sqlx::query_as::<_, Student>(&format!("{} WHERE st.id = $1", STUDENT_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id {} not found", id)))
    }

    /// Get the profile linked to a user account, if any
    pub async fn get_by_user_id(&self, user_id: i32) -> AppResult<Option<Student>> {
        let student =
            sqlx::query_as::<_, Student>(&format!("{} WHERE st.user_id = $1", STUDENT_SELECT))
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(student)
    }

    /// Create the profile for a freshly created user account.
    ///
    /// Idempotent on `user_id`: if a profile already exists it is returned
    /// unchanged, so invoking the hook twice never duplicates a profile.
    pub async fn create_for_user(&self, user_id: i32) -> AppResult<Student> {
        sqlx::query("INSERT INTO students (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        self.get_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Profile for user {} missing after insert", user_id)))
    }

    /// Search students with pagination
    pub async fn search(&self, query: &StudentQuery) -> AppResult<(Vec<Student>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM students st JOIN users u ON u.id = st.user_id
            WHERE $1::text IS NULL OR LOWER(u.username) LIKE '%' || LOWER($1) || '%'
            "#,
        )
        .bind(&query.username)
        .fetch_one(&self.pool)
        .await?;

        let students = sqlx::query_as::<_, Student>(&format!(
            r#"
            {}
            WHERE $1::text IS NULL OR LOWER(u.username) LIKE '%' || LOWER($1) || '%'
            ORDER BY u.username
            LIMIT $2 OFFSET $3
            "#,
            STUDENT_SELECT
        ))
        .bind(&query.username)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((students, total))
    }

    /// Delete a student profile. Copies issued to them keep existing with a
    /// null borrower reference.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Student with id {} not found", id)));
        }
        Ok(())
    }
}
