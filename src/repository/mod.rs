//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod copies;
pub mod genres;
pub mod shelves;
pub mod students;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub copies: copies::CopiesRepository,
    pub genres: genres::GenresRepository,
    pub shelves: shelves::ShelvesRepository,
    pub students: students::StudentsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            pool: pool.clone(),
            books: books::BooksRepository::new(pool.clone()),
            copies: copies::CopiesRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            shelves: shelves::ShelvesRepository::new(pool.clone()),
            students: students::StudentsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
        }
    }
}
