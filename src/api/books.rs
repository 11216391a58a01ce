//! Book and book-copy endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookQuery, BookShort, CreateBook, UpdateBook},
        copy::{BookCopy, CopyQuery, CreateCopy, UpdateCopy},
    },
};

use super::{AuthenticatedUser, PaginatedResponse};

/// List books with search and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("title" = Option<String>, Query, description = "Search in title"),
        ("isbn" = Option<String>, Query, description = "Exact ISBN"),
        ("author" = Option<String>, Query, description = "Search by author name"),
        ("author_id" = Option<i32>, Query, description = "Filter by author"),
        ("genre_id" = Option<i32>, Query, description = "Filter by genre"),
        ("search" = Option<String>, Query, description = "One term over title, isbn, author"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of books", body = PaginatedResponse<BookShort>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<PaginatedResponse<BookShort>>> {
    let (items, total) = state.services.catalog.search_books(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(book): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.catalog.update_book(id, book).await?;
    Ok(Json(updated))
}

/// Delete a book. Its copies survive with a null book reference.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all copies, ordered by due date
#[utoipa::path(
    get,
    path = "/copies",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("status" = Option<String>, Query, description = "One-character status code"),
        ("due_back" = Option<String>, Query, description = "Exact due date (YYYY-MM-DD)"),
        ("book" = Option<String>, Query, description = "Search in book title"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of copies", body = PaginatedResponse<BookCopy>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_copies(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<CopyQuery>,
) -> AppResult<Json<PaginatedResponse<BookCopy>>> {
    let (items, total) = state.services.catalog.search_copies(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// List copies of a book
#[utoipa::path(
    get,
    path = "/books/{id}/copies",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Copies of the book", body = Vec<BookCopy>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_book_copies(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
) -> AppResult<Json<Vec<BookCopy>>> {
    let copies = state.services.catalog.get_copies(book_id).await?;
    Ok(Json(copies))
}

/// Create a new copy of a book
#[utoipa::path(
    post,
    path = "/books/{id}/copies",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = CreateCopy,
    responses(
        (status = 201, description = "Copy created", body = BookCopy),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Copy uid already exists")
    )
)]
pub async fn create_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
    Json(copy): Json<CreateCopy>,
) -> AppResult<(StatusCode, Json<BookCopy>)> {
    let created = state.services.catalog.create_copy(book_id, copy).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a copy by its library-wide unique id
#[utoipa::path(
    get,
    path = "/copies/by-uid/{uid}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("uid" = String, Path, description = "Copy uid")),
    responses(
        (status = 200, description = "Copy details", body = BookCopy),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(uid): Path<String>,
) -> AppResult<Json<BookCopy>> {
    let copy = state.services.catalog.get_copy_by_uid(&uid).await?;
    Ok(Json(copy))
}

/// Update an existing copy
#[utoipa::path(
    put,
    path = "/copies/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Copy ID")),
    request_body = UpdateCopy,
    responses(
        (status = 200, description = "Copy updated", body = BookCopy),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(copy): Json<UpdateCopy>,
) -> AppResult<Json<BookCopy>> {
    let updated = state.services.catalog.update_copy(id, copy).await?;
    Ok(Json(updated))
}

/// Re-evaluate the due status of a copy
#[utoipa::path(
    post,
    path = "/copies/{id}/refresh-status",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy with refreshed status", body = BookCopy),
        (status = 400, description = "Copy has no due date"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn refresh_copy_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookCopy>> {
    let copy = state.services.catalog.refresh_copy_status(id).await?;
    Ok(Json(copy))
}

/// Delete a copy
#[utoipa::path(
    delete,
    path = "/copies/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 204, description = "Copy deleted"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn delete_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_copy(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
