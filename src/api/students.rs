//! Student borrower profile endpoints.
//!
//! Read-and-delete only: profiles come into existence through account
//! registration, never through this surface.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::student::{Student, StudentQuery},
};

use super::{AuthenticatedUser, PaginatedResponse};

/// List student profiles
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    security(("bearer_auth" = [])),
    params(
        ("username" = Option<String>, Query, description = "Search in account username"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of students", body = PaginatedResponse<Student>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_students(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<StudentQuery>,
) -> AppResult<Json<PaginatedResponse<Student>>> {
    let (items, total) = state.services.accounts.search_students(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get a student with their currently borrowed titles
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Student>> {
    let student = state.services.accounts.get_student(id).await?;
    Ok(Json(student))
}

/// Delete a student profile. Copies issued to them are unlinked, not deleted.
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.accounts.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
