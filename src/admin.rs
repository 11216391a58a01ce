//! Admin facade: declarative list/search/filter configuration per entity.
//!
//! Pure configuration — which columns the administrative console lists, which
//! fields a search term runs against, which filters are offered, and which
//! many-to-many relations get a dual-list widget. The generic listing endpoint
//! in `api::admin` consumes this registry; nothing here touches the database.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Per-entity admin console configuration
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminEntity {
    /// Path segment under `/admin/{slug}/records`
    #[schema(value_type = String)]
    pub slug: &'static str,
    #[schema(value_type = String)]
    pub title: &'static str,
    /// Columns shown in the list view, in order
    #[schema(value_type = Vec<String>)]
    pub list_display: &'static [&'static str],
    /// Fields a search term is matched against
    #[schema(value_type = Vec<String>)]
    pub search_fields: &'static [&'static str],
    /// Fields offered as list filters
    #[schema(value_type = Vec<String>)]
    pub list_filter: &'static [&'static str],
    /// Many-to-many relations edited with a dual-list widget
    #[schema(value_type = Vec<String>)]
    pub dual_list: &'static [&'static str],
}

/// Registered entities, in console display order
pub static REGISTRY: &[AdminEntity] = &[
    AdminEntity {
        slug: "author",
        title: "Authors",
        list_display: &["first_name", "last_name"],
        search_fields: &["first_name", "last_name"],
        list_filter: &[],
        dual_list: &[],
    },
    AdminEntity {
        slug: "genre",
        title: "Genres",
        list_display: &["name"],
        search_fields: &["name"],
        list_filter: &[],
        dual_list: &[],
    },
    AdminEntity {
        slug: "book",
        title: "Books",
        list_display: &["title", "display_author", "display_genre", "isbn"],
        search_fields: &["title", "isbn", "authors"],
        list_filter: &["genres", "authors"],
        dual_list: &["authors", "genres"],
    },
    AdminEntity {
        slug: "book_copy",
        title: "Book Copies",
        list_display: &["book", "status", "due_back"],
        search_fields: &["book"],
        list_filter: &["status", "due_back"],
        dual_list: &[],
    },
];

static BY_SLUG: Lazy<HashMap<&'static str, &'static AdminEntity>> =
    Lazy::new(|| REGISTRY.iter().map(|e| (e.slug, e)).collect());

/// Look up an entity configuration by its slug
pub fn get(slug: &str) -> Option<&'static AdminEntity> {
    BY_SLUG.get(slug).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{author::Author, book::Book, copy::BookCopy, genre::Genre};

    /// Names that exist on the model backing an entity: structural columns,
    /// computed display columns, and relation fields.
    fn model_names(slug: &str) -> Vec<&'static str> {
        match slug {
            "author" => Author::COLUMNS.to_vec(),
            "genre" => Genre::COLUMNS.to_vec(),
            "book" => {
                let mut names = Book::COLUMNS.to_vec();
                names.extend_from_slice(Book::COMPUTED);
                names.extend_from_slice(Book::RELATIONS);
                names
            }
            "book_copy" => {
                let mut names = BookCopy::COLUMNS.to_vec();
                names.extend_from_slice(BookCopy::COMPUTED);
                names
            }
            other => panic!("unregistered entity {}", other),
        }
    }

    #[test]
    fn test_every_configured_name_exists_on_model() {
        for entity in REGISTRY {
            let names = model_names(entity.slug);
            for field in entity
                .list_display
                .iter()
                .chain(entity.search_fields)
                .chain(entity.list_filter)
                .chain(entity.dual_list)
            {
                assert!(
                    names.contains(field),
                    "admin config for {} references unknown field {}",
                    entity.slug,
                    field
                );
            }
        }
    }

    #[test]
    fn test_slug_lookup() {
        assert_eq!(get("book").unwrap().title, "Books");
        assert!(get("loan").is_none());
    }

    #[test]
    fn test_registry_slugs_unique() {
        let mut slugs: Vec<_> = REGISTRY.iter().map(|e| e.slug).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), REGISTRY.len());
    }
}
