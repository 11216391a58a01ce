//! Catalog management service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
        book::{Book, BookQuery, BookShort, CreateBook, UpdateBook},
        copy::{is_due_for_return, BookCopy, CopyQuery, CopyStatus, CreateCopy, UpdateCopy},
        genre::{CreateGenre, Genre, GenreQuery, UpdateGenre},
        shelf::{CreateShelf, Shelf, ShelfQuery, UpdateShelf},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// Search books with filters
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        self.repository.books.search(query).await
    }

    /// Get book by ID with authors and genres
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.create(&book).await
    }

    /// Update an existing book
    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.update(id, &book).await
    }

    /// Delete a book. Its copies survive with a null book reference.
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    // =========================================================================
    // Copies
    // =========================================================================

    /// Search copies with filters, ordered by due date
    pub async fn search_copies(&self, query: &CopyQuery) -> AppResult<(Vec<BookCopy>, i64)> {
        self.repository.copies.search(query).await
    }

    /// Get copies of a book
    pub async fn get_copies(&self, book_id: i32) -> AppResult<Vec<BookCopy>> {
        // Verify book exists
        self.repository.books.get_by_id(book_id).await?;
        self.repository.copies.list_for_book(book_id).await
    }

    /// Get copy by its library-wide unique id
    pub async fn get_copy_by_uid(&self, uid: &str) -> AppResult<BookCopy> {
        self.repository.copies.get_by_uid(uid).await
    }

    /// Create a copy of a book. When no uid is supplied a fresh v4 UUID is
    /// assigned.
    pub async fn create_copy(&self, book_id: i32, copy: CreateCopy) -> AppResult<BookCopy> {
        self.repository.books.get_by_id(book_id).await?;

        let uid = match copy.uid {
            Some(ref uid) if !uid.trim().is_empty() => {
                if uid.len() > 250 {
                    return Err(AppError::Validation(
                        "Copy uid must be at most 250 characters".to_string(),
                    ));
                }
                uid.clone()
            }
            _ => uuid::Uuid::new_v4().to_string(),
        };

        self.repository.copies.create(book_id, &uid, &copy).await
    }

    /// Update an existing copy
    pub async fn update_copy(&self, id: i32, copy: UpdateCopy) -> AppResult<BookCopy> {
        self.repository.copies.update(id, &copy).await
    }

    /// Delete a copy
    pub async fn delete_copy(&self, id: i32) -> AppResult<()> {
        self.repository.copies.delete(id).await
    }

    /// Re-evaluate the due status of a copy.
    ///
    /// Marks the copy Due and persists the change once fifteen or more whole
    /// days have elapsed since its `due_back` date. A copy without a due date
    /// is rejected with a Validation error.
    pub async fn refresh_copy_status(&self, id: i32) -> AppResult<BookCopy> {
        let copy = self.repository.copies.get_by_id(id).await?;

        let due_back = copy.due_back.ok_or_else(|| {
            AppError::Validation(format!("Copy {} has no due date set", copy.uid))
        })?;

        let today = Utc::now().date_naive();
        if is_due_for_return(due_back, today) {
            tracing::info!(uid = %copy.uid, %due_back, "copy is due for return");
            self.repository.copies.set_status(copy.id, CopyStatus::Due).await?;
            return self.repository.copies.get_by_id(copy.id).await;
        }

        Ok(copy)
    }

    // =========================================================================
    // Authors
    // =========================================================================

    pub async fn search_authors(&self, query: &AuthorQuery) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.search(query).await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        author
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.authors.create(&author).await
    }

    pub async fn update_author(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        author
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.authors.update(id, &author).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    // =========================================================================
    // Genres
    // =========================================================================

    pub async fn search_genres(&self, query: &GenreQuery) -> AppResult<(Vec<Genre>, i64)> {
        self.repository.genres.search(query).await
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create_genre(&self, genre: CreateGenre) -> AppResult<Genre> {
        genre
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.genres.create(&genre).await
    }

    pub async fn update_genre(&self, id: i32, genre: UpdateGenre) -> AppResult<Genre> {
        genre
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.genres.update(id, &genre).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await
    }

    // =========================================================================
    // Shelves
    // =========================================================================

    pub async fn search_shelves(&self, query: &ShelfQuery) -> AppResult<(Vec<Shelf>, i64)> {
        self.repository.shelves.search(query).await
    }

    pub async fn get_shelf(&self, id: i32) -> AppResult<Shelf> {
        self.repository.shelves.get_by_id(id).await
    }

    pub async fn create_shelf(&self, shelf: CreateShelf) -> AppResult<Shelf> {
        shelf
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.shelves.create(&shelf).await
    }

    pub async fn update_shelf(&self, id: i32, shelf: UpdateShelf) -> AppResult<Shelf> {
        shelf
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.shelves.update(id, &shelf).await
    }

    /// Delete a shelf. Copies on it survive with a null shelf reference.
    pub async fn delete_shelf(&self, id: i32) -> AppResult<()> {
        self.repository.shelves.delete(id).await
    }
}
