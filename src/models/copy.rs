//! Book copy (physical instance) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Days after `due_back` at which a copy is marked Due
pub const OVERDUE_THRESHOLD_DAYS: i64 = 15;

/// Copy availability status. DB stores the one-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CopyStatus {
    Maintenance,
    OnLoan,
    Available,
    Reserved,
    Due,
}

impl CopyStatus {
    /// One-character code as stored in the database
    pub fn as_code(&self) -> &'static str {
        match self {
            CopyStatus::Maintenance => "m",
            CopyStatus::OnLoan => "o",
            CopyStatus::Available => "a",
            CopyStatus::Reserved => "r",
            CopyStatus::Due => "d",
        }
    }
}

impl From<&str> for CopyStatus {
    fn from(s: &str) -> Self {
        match s {
            "m" => CopyStatus::Maintenance,
            "o" => CopyStatus::OnLoan,
            "r" => CopyStatus::Reserved,
            "d" => CopyStatus::Due,
            _ => CopyStatus::Available,
        }
    }
}

impl Default for CopyStatus {
    fn default() -> Self {
        CopyStatus::Available
    }
}

impl std::fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CopyStatus::Maintenance => "Maintenance",
            CopyStatus::OnLoan => "On Loan",
            CopyStatus::Available => "Available",
            CopyStatus::Reserved => "Reserved",
            CopyStatus::Due => "Due",
        };
        write!(f, "{}", label)
    }
}

/// True once `due_back` lies `OVERDUE_THRESHOLD_DAYS` or more whole days in
/// the past relative to `today`.
pub fn is_due_for_return(due_back: NaiveDate, today: NaiveDate) -> bool {
    (today - due_back).num_days() >= OVERDUE_THRESHOLD_DAYS
}

/// Full copy model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookCopy {
    pub id: i32,
    /// Unique id across the whole library for this copy
    pub uid: String,
    /// Nullable: survives deletion of the book record
    pub book_id: Option<i32>,
    pub due_back: Option<NaiveDate>,
    pub shelf_id: Option<i32>,
    /// Borrowing student, nullable
    pub issued_to: Option<i32>,
    /// One-character status code, see [`CopyStatus`]
    pub status: String,
    // Computed fields (populated when queried with JOINs, None otherwise)
    #[sqlx(default)]
    #[serde(default)]
    pub book_title: Option<String>,
    #[sqlx(default)]
    #[serde(default)]
    pub shelf_name: Option<String>,
}

impl BookCopy {
    /// Column names as stored, used by the admin facade registry check
    pub const COLUMNS: &'static [&'static str] =
        &["id", "uid", "book_id", "due_back", "shelf_id", "issued_to", "status"];
    /// Computed list-view columns
    pub const COMPUTED: &'static [&'static str] = &["book"];

    pub fn status(&self) -> CopyStatus {
        CopyStatus::from(self.status.as_str())
    }
}

/// Create copy request. `uid` defaults to a fresh v4 UUID when omitted.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCopy {
    pub uid: Option<String>,
    pub due_back: Option<NaiveDate>,
    pub shelf_id: Option<i32>,
    pub issued_to: Option<i32>,
    pub status: Option<CopyStatus>,
}

/// Update copy request. `None` leaves a field unchanged.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCopy {
    pub book_id: Option<i32>,
    pub due_back: Option<NaiveDate>,
    pub shelf_id: Option<i32>,
    pub issued_to: Option<i32>,
    pub status: Option<CopyStatus>,
}

/// Copy query parameters (API)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct CopyQuery {
    /// One-character status code filter
    pub status: Option<String>,
    pub due_back: Option<NaiveDate>,
    /// Substring match against the book title
    pub book: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_codes_round_trip() {
        for status in [
            CopyStatus::Maintenance,
            CopyStatus::OnLoan,
            CopyStatus::Available,
            CopyStatus::Reserved,
            CopyStatus::Due,
        ] {
            assert_eq!(CopyStatus::from(status.as_code()), status);
        }
    }

    #[test]
    fn test_unknown_code_defaults_to_available() {
        assert_eq!(CopyStatus::from("x"), CopyStatus::Available);
        assert_eq!(CopyStatus::default(), CopyStatus::Available);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(CopyStatus::OnLoan.to_string(), "On Loan");
        assert_eq!(CopyStatus::Due.to_string(), "Due");
    }

    #[test]
    fn test_due_boundary_fifteen_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert!(is_due_for_return(today - Duration::days(15), today));
    }

    #[test]
    fn test_due_boundary_fourteen_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert!(!is_due_for_return(today - Duration::days(14), today));
    }

    #[test]
    fn test_due_well_past() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert!(is_due_for_return(NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(), today));
    }

    #[test]
    fn test_due_in_future() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert!(!is_due_for_return(today + Duration::days(7), today));
    }
}
