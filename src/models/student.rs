//! Student borrower profile, one-to-one with a user account.
//!
//! Profiles are only ever created by the account-creation hook in
//! `AccountsService::register`; no catalog endpoint creates one directly.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i32,
    pub user_id: i32,
    // Computed fields (populated when queried with JOINs, None otherwise)
    #[sqlx(default)]
    #[serde(default)]
    pub username: Option<String>,
    #[sqlx(default)]
    #[serde(default)]
    pub email: Option<String>,
    /// Titles of books whose copies are currently issued to this student
    #[sqlx(skip)]
    #[serde(default)]
    pub borrowed_titles: Vec<String>,
}

impl Student {
    pub const COLUMNS: &'static [&'static str] = &["id", "user_id"];
}

/// Student query parameters (API)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct StudentQuery {
    /// Substring match against the linked account's username
    pub username: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
