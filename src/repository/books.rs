//! Books repository for database operations.
//!
//! Author and genre relations go through the `book_authors` / `book_genres`
//! junction tables, which carry a `position` column recording creation order.
//! Reads always `ORDER BY position` so list-view display helpers see a stable
//! ordering.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookQuery, BookShort, CreateBook, UpdateBook},
        genre::Genre,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID with authors and genres loaded
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let mut book = sqlx::query_as::<_, Book>(
            "SELECT id, title, isbn FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        book.authors = self.get_book_authors(id).await?;
        book.genres = self.get_book_genres(id).await?;

        Ok(book)
    }

    /// Load all authors for a book via the book_authors junction table
    async fn get_book_authors(&self, book_id: i32) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.first_name, a.last_name
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = $1
            ORDER BY ba.position
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Load all genres for a book via the book_genres junction table
    async fn get_book_genres(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = $1
            ORDER BY bg.position
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    /// Search books with pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let where_clause = r#"
            ($1::text IS NULL OR LOWER(b.title) LIKE '%' || LOWER($1) || '%')
            AND ($2::text IS NULL OR b.isbn = $2)
            AND ($3::text IS NULL OR EXISTS (
                SELECT 1 FROM book_authors ba JOIN authors a ON a.id = ba.author_id
                WHERE ba.book_id = b.id
                  AND (LOWER(a.first_name) LIKE '%' || LOWER($3) || '%'
                       OR LOWER(a.last_name) LIKE '%' || LOWER($3) || '%')
            ))
            AND ($4::int IS NULL OR EXISTS (
                SELECT 1 FROM book_authors ba WHERE ba.book_id = b.id AND ba.author_id = $4
            ))
            AND ($5::int IS NULL OR EXISTS (
                SELECT 1 FROM book_genres bg WHERE bg.book_id = b.id AND bg.genre_id = $5
            ))
            AND ($6::text IS NULL
                 OR LOWER(b.title) LIKE '%' || LOWER($6) || '%'
                 OR LOWER(b.isbn) LIKE '%' || LOWER($6) || '%'
                 OR EXISTS (
                     SELECT 1 FROM book_authors ba JOIN authors a ON a.id = ba.author_id
                     WHERE ba.book_id = b.id
                       AND (LOWER(a.first_name) LIKE '%' || LOWER($6) || '%'
                            OR LOWER(a.last_name) LIKE '%' || LOWER($6) || '%')
                 ))
        "#;

        let count_query = format!("SELECT COUNT(*) FROM books b WHERE {}", where_clause);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&query.title)
            .bind(&query.isbn)
            .bind(&query.author)
            .bind(query.author_id)
            .bind(query.genre_id)
            .bind(&query.search)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            r#"
            SELECT b.id, b.title, b.isbn,
                   (SELECT COUNT(*) FROM copies c WHERE c.book_id = b.id) as nb_copies
            FROM books b
            WHERE {}
            ORDER BY b.title
            LIMIT $7 OFFSET $8
            "#,
            where_clause
        );

        let books = sqlx::query_as::<_, BookShort>(&select_query)
            .bind(&query.title)
            .bind(&query.isbn)
            .bind(&query.author)
            .bind(query.author_id)
            .bind(query.genre_id)
            .bind(&query.search)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// Create a new book with its author and genre relations
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book_id: i32 = sqlx::query_scalar(
            "INSERT INTO books (title, isbn) VALUES ($1, $2) RETURNING id",
        )
        .bind(&book.title)
        .bind(&book.isbn)
        .fetch_one(&mut *tx)
        .await?;

        for (position, author_id) in book.author_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO book_authors (book_id, author_id, position) VALUES ($1, $2, $3)",
            )
            .bind(book_id)
            .bind(author_id)
            .bind(position as i16)
            .execute(&mut *tx)
            .await?;
        }

        for (position, genre_id) in book.genre_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO book_genres (book_id, genre_id, position) VALUES ($1, $2, $3)",
            )
            .bind(book_id)
            .bind(genre_id)
            .bind(position as i16)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_by_id(book_id).await
    }

    /// Update an existing book. Relation lists, when provided, replace the
    /// previous junction rows wholesale (positions renumbered from zero).
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE books
            SET title = COALESCE($1, title),
                isbn = COALESCE($2, isbn)
            WHERE id = $3
            "#,
        )
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        if let Some(ref author_ids) = book.author_ids {
            sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for (position, author_id) in author_ids.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO book_authors (book_id, author_id, position) VALUES ($1, $2, $3)",
                )
                .bind(id)
                .bind(author_id)
                .bind(position as i16)
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(ref genre_ids) = book.genre_ids {
            sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for (position, genre_id) in genre_ids.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO book_genres (book_id, genre_id, position) VALUES ($1, $2, $3)",
                )
                .bind(id)
                .bind(genre_id)
                .bind(position as i16)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a book. Copies of it keep existing with a null book reference.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }
}
