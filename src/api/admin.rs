//! Admin console endpoints.
//!
//! `list_records` is a generic listing driven entirely by the facade registry
//! in [`crate::admin`]: the search term runs against the entity's configured
//! search fields, filter parameters map onto its configured filters, and the
//! response rows carry exactly the configured list columns (plus `id`).

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};

use crate::{
    admin::{self, AdminEntity},
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorQuery},
        book::{Book, BookQuery},
        copy::{BookCopy, CopyQuery},
        genre::{Genre, GenreQuery},
    },
};

use super::{AuthenticatedUser, PaginatedResponse};

/// Query parameters accepted by the generic records listing. Parameters that
/// do not apply to the requested entity are ignored.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AdminRecordsQuery {
    /// Term matched against the entity's configured search fields
    pub search: Option<String>,
    /// Copy status filter (one-character code)
    pub status: Option<String>,
    /// Copy due date filter (YYYY-MM-DD)
    pub due_back: Option<NaiveDate>,
    /// Book author filter (author id)
    pub author: Option<i32>,
    /// Book genre filter (genre id)
    pub genre: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// List the registered admin entities and their console configuration
#[utoipa::path(
    get,
    path = "/admin/entities",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Registered entities", body = Vec<AdminEntity>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_entities(
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Json<Vec<AdminEntity>> {
    Json(admin::REGISTRY.to_vec())
}

/// Generic list view for a registered entity
#[utoipa::path(
    get,
    path = "/admin/{entity}/records",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("entity" = String, Path, description = "Entity slug from /admin/entities"),
        AdminRecordsQuery
    ),
    responses(
        (status = 200, description = "Projected record rows", body = PaginatedResponse<Value>),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such entity")
    )
)]
pub async fn list_records(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(slug): Path<String>,
    Query(query): Query<AdminRecordsQuery>,
) -> AppResult<Json<PaginatedResponse<Value>>> {
    let entity = admin::get(&slug)
        .ok_or_else(|| AppError::NotFound(format!("No admin entity named {}", slug)))?;

    let (rows, total) = match entity.slug {
        "author" => {
            let q = AuthorQuery {
                name: query.search.clone(),
                page: query.page,
                per_page: query.per_page,
            };
            let (authors, total) = state.services.catalog.search_authors(&q).await?;
            (authors.iter().map(author_row).collect(), total)
        }
        "genre" => {
            let q = GenreQuery {
                name: query.search.clone(),
                page: query.page,
                per_page: query.per_page,
            };
            let (genres, total) = state.services.catalog.search_genres(&q).await?;
            (genres.iter().map(genre_row).collect(), total)
        }
        "book" => {
            let q = BookQuery {
                search: query.search.clone(),
                author_id: query.author,
                genre_id: query.genre,
                page: query.page,
                per_page: query.per_page,
                ..Default::default()
            };
            let (books, total) = state.services.catalog.search_books(&q).await?;
            // The list view shows relation-derived columns, so load each row in full
            let mut rows = Vec::with_capacity(books.len());
            for short in &books {
                let book = state.services.catalog.get_book(short.id).await?;
                rows.push(book_row(&book));
            }
            (rows, total)
        }
        "book_copy" => {
            let q = CopyQuery {
                status: query.status.clone(),
                due_back: query.due_back,
                book: query.search.clone(),
                page: query.page,
                per_page: query.per_page,
            };
            let (copies, total) = state.services.catalog.search_copies(&q).await?;
            (copies.iter().map(copy_row).collect(), total)
        }
        other => {
            return Err(AppError::Internal(format!(
                "Admin entity {} has no list implementation",
                other
            )))
        }
    };

    let items = rows.into_iter().map(|row| project(row, entity)).collect();

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

fn author_row(author: &Author) -> Value {
    json!({
        "id": author.id,
        "first_name": author.first_name,
        "last_name": author.last_name,
    })
}

fn genre_row(genre: &Genre) -> Value {
    json!({
        "id": genre.id,
        "name": genre.name,
    })
}

fn book_row(book: &Book) -> Value {
    json!({
        "id": book.id,
        "title": book.title,
        "isbn": book.isbn,
        "display_author": book.display_author(),
        "display_genre": book.display_genre(),
    })
}

fn copy_row(copy: &BookCopy) -> Value {
    json!({
        "id": copy.id,
        "book": copy.book_title,
        "status": copy.status().to_string(),
        "due_back": copy.due_back,
    })
}

/// Keep only `id` and the configured list columns, in registry order
fn project(row: Value, entity: &AdminEntity) -> Value {
    let mut out = serde_json::Map::new();
    if let Value::Object(fields) = row {
        if let Some(id) = fields.get("id") {
            out.insert("id".to_string(), id.clone());
        }
        for column in entity.list_display {
            let value = fields.get(*column).cloned().unwrap_or(Value::Null);
            out.insert((*column).to_string(), value);
        }
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_keeps_configured_columns_only() {
        let entity = admin::get("book").unwrap();
        let row = json!({
            "id": 3,
            "title": "Dune",
            "isbn": "9780441172719",
            "display_author": "Frank Herbert",
            "display_genre": "Science Fiction",
            "internal": "dropped",
        });
        let projected = project(row, entity);
        let obj = projected.as_object().unwrap();
        assert_eq!(obj.len(), 1 + entity.list_display.len());
        assert!(obj.get("internal").is_none());
        assert_eq!(obj.get("title").unwrap(), "Dune");
    }

    #[test]
    fn test_project_missing_column_is_null() {
        let entity = admin::get("author").unwrap();
        let projected = project(json!({"id": 1, "first_name": "Ursula"}), entity);
        assert_eq!(projected["last_name"], Value::Null);
    }
}
