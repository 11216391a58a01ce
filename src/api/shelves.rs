//! Shelf endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::shelf::{CreateShelf, Shelf, ShelfQuery, UpdateShelf},
};

use super::{AuthenticatedUser, PaginatedResponse};

/// List shelves
#[utoipa::path(
    get,
    path = "/shelves",
    tag = "shelves",
    security(("bearer_auth" = [])),
    params(
        ("name" = Option<String>, Query, description = "Search in name"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of shelves", body = PaginatedResponse<Shelf>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_shelves(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ShelfQuery>,
) -> AppResult<Json<PaginatedResponse<Shelf>>> {
    let (items, total) = state.services.catalog.search_shelves(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get shelf by ID
#[utoipa::path(
    get,
    path = "/shelves/{id}",
    tag = "shelves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shelf ID")),
    responses(
        (status = 200, description = "Shelf details", body = Shelf),
        (status = 404, description = "Shelf not found")
    )
)]
pub async fn get_shelf(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Shelf>> {
    let shelf = state.services.catalog.get_shelf(id).await?;
    Ok(Json(shelf))
}

/// Create a new shelf
#[utoipa::path(
    post,
    path = "/shelves",
    tag = "shelves",
    security(("bearer_auth" = [])),
    request_body = CreateShelf,
    responses(
        (status = 201, description = "Shelf created", body = Shelf),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_shelf(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(shelf): Json<CreateShelf>,
) -> AppResult<(StatusCode, Json<Shelf>)> {
    let created = state.services.catalog.create_shelf(shelf).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing shelf
#[utoipa::path(
    put,
    path = "/shelves/{id}",
    tag = "shelves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shelf ID")),
    request_body = UpdateShelf,
    responses(
        (status = 200, description = "Shelf updated", body = Shelf),
        (status = 404, description = "Shelf not found")
    )
)]
pub async fn update_shelf(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(shelf): Json<UpdateShelf>,
) -> AppResult<Json<Shelf>> {
    let updated = state.services.catalog.update_shelf(id, shelf).await?;
    Ok(Json(updated))
}

/// Delete a shelf. Copies on it are left in place with no shelf reference.
#[utoipa::path(
    delete,
    path = "/shelves/{id}",
    tag = "shelves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shelf ID")),
    responses(
        (status = 204, description = "Shelf deleted"),
        (status = 404, description = "Shelf not found")
    )
)]
pub async fn delete_shelf(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_shelf(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
