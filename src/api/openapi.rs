//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, auth, authors, books, genres, health, shelves, students};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark API",
        version = "0.3.0",
        description = "Library Catalog Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Shelves
        shelves::list_shelves,
        shelves::get_shelf,
        shelves::create_shelf,
        shelves::update_shelf,
        shelves::delete_shelf,
        // Books and copies
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::list_copies,
        books::list_book_copies,
        books::create_copy,
        books::get_copy,
        books::update_copy,
        books::refresh_copy_status,
        books::delete_copy,
        // Students
        students::list_students,
        students::get_student,
        students::delete_student,
        // Admin
        admin::list_entities,
        admin::list_records,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::User,
            crate::models::user::RegisterRequest,
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            auth::RegisterResponse,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Genres
            crate::models::genre::Genre,
            crate::models::genre::CreateGenre,
            crate::models::genre::UpdateGenre,
            // Shelves
            crate::models::shelf::Shelf,
            crate::models::shelf::CreateShelf,
            crate::models::shelf::UpdateShelf,
            // Books and copies
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::copy::BookCopy,
            crate::models::copy::CopyStatus,
            crate::models::copy::CreateCopy,
            crate::models::copy::UpdateCopy,
            // Students
            crate::models::student::Student,
            // Admin
            crate::admin::AdminEntity,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication and registration"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre taxonomy"),
        (name = "shelves", description = "Shelf locations"),
        (name = "books", description = "Books and physical copies"),
        (name = "students", description = "Student borrower profiles"),
        (name = "admin", description = "Admin console configuration and listings")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
