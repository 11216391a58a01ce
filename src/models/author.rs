//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Author {
    /// Column names as stored, used by the admin facade registry check
    pub const COLUMNS: &'static [&'static str] = &["id", "first_name", "last_name"];

    /// "first last" label used in book listings
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}

/// Update author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}

/// Author query parameters (API)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AuthorQuery {
    /// Substring match against first or last name
    pub name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
