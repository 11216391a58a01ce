//! Shelf model (physical location tag for book copies)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Shelf {
    pub id: i32,
    pub name: String,
}

impl Shelf {
    pub const COLUMNS: &'static [&'static str] = &["id", "name"];
}

/// Create shelf request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShelf {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// Update shelf request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateShelf {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// Shelf query parameters (API)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ShelfQuery {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
