//! Shelfmark Library Catalog Server
//!
//! A Rust implementation of a library-catalog management server: books,
//! authors, genres, physical copies, shelves, and student borrower profiles,
//! exposed through an administrative REST interface.

use std::sync::Arc;

pub mod admin;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
