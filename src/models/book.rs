//! Book (catalog title) model and related types.
//!
//! A `Book` is the abstract work; physical, individually tracked copies live in
//! [`super::copy::BookCopy`]. Authors and genres are many-to-many relations
//! read back in junction `position` order (creation order).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;
use super::genre::Genre;

/// How many related names the list-view display helpers show
pub const DISPLAY_LIMIT: usize = 3;

/// Full book model (relations loaded separately)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    /// Nominally a 13-character ISBN; stored as-is, not validated
    pub isbn: Option<String>,
    #[sqlx(skip)]
    #[serde(default)]
    pub authors: Vec<Author>,
    #[sqlx(skip)]
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Book {
    /// Column names as stored, used by the admin facade registry check
    pub const COLUMNS: &'static [&'static str] = &["id", "title", "isbn"];
    /// Computed list-view columns
    pub const COMPUTED: &'static [&'static str] = &["display_author", "display_genre"];
    /// Many-to-many relation fields
    pub const RELATIONS: &'static [&'static str] = &["authors", "genres"];

    /// Up to the first three authors as "first last", comma-joined.
    pub fn display_author(&self) -> String {
        self.authors
            .iter()
            .take(DISPLAY_LIMIT)
            .map(Author::display_name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Up to the first three genre names, comma-joined.
    pub fn display_genre(&self) -> String {
        self.genres
            .iter()
            .take(DISPLAY_LIMIT)
            .map(|g| g.name.clone())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub isbn: Option<String>,
    pub nb_copies: Option<i64>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub isbn: Option<String>,
    #[serde(default)]
    pub author_ids: Vec<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book request. `None` leaves a field unchanged; relation lists
/// replace the existing junction rows wholesale.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub author_ids: Option<Vec<i32>>,
    pub genre_ids: Option<Vec<i32>>,
}

/// Book query parameters (API)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub title: Option<String>,
    pub isbn: Option<String>,
    /// Substring match against author first or last name
    pub author: Option<String>,
    /// Filter by related author id
    pub author_id: Option<i32>,
    /// Filter by related genre id
    pub genre_id: Option<i32>,
    /// One term matched against title, isbn, and author names
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: i32, first: Option<&str>, last: Option<&str>) -> Author {
        Author {
            id,
            first_name: first.map(String::from),
            last_name: last.map(String::from),
        }
    }

    fn book_with(authors: Vec<Author>, genres: Vec<Genre>) -> Book {
        Book {
            id: 1,
            title: "The Test".to_string(),
            isbn: None,
            authors,
            genres,
        }
    }

    #[test]
    fn test_display_author_caps_at_three() {
        let authors = (1..=5)
            .map(|i| author(i, Some("A"), Some(&format!("L{}", i))))
            .collect();
        let book = book_with(authors, Vec::new());
        assert_eq!(book.display_author(), "A L1, A L2, A L3");
    }

    #[test]
    fn test_display_author_fewer_than_three() {
        let book = book_with(vec![author(1, Some("Jane"), Some("Doe"))], Vec::new());
        assert_eq!(book.display_author(), "Jane Doe");
    }

    #[test]
    fn test_display_author_partial_names() {
        let book = book_with(vec![author(1, None, Some("Homer"))], Vec::new());
        assert_eq!(book.display_author(), "Homer");
    }

    #[test]
    fn test_display_genre_caps_at_three() {
        let genres = (1..=4)
            .map(|i| Genre {
                id: i,
                name: format!("G{}", i),
            })
            .collect();
        let book = book_with(Vec::new(), genres);
        assert_eq!(book.display_genre(), "G1, G2, G3");
    }

    #[test]
    fn test_display_empty_relations() {
        let book = book_with(Vec::new(), Vec::new());
        assert_eq!(book.display_author(), "");
        assert_eq!(book.display_genre(), "");
    }
}
