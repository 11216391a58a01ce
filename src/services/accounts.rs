//! Account and borrower-profile management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        student::{Student, StudentQuery},
        user::{RegisterRequest, User, UserClaims},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AccountsService {
    repository: Repository,
    config: AuthConfig,
}

impl AccountsService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Create a new user account and its borrower profile.
    ///
    /// The profile is created here, by the component that creates the
    /// account, right after the account is persisted — once per account,
    /// never on later updates. Profile creation is idempotent on the user id,
    /// so an account can never end up with two profiles.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<(User, Student)> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.username_exists(&request.username).await? {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;
        let user = self
            .repository
            .users
            .create(&request.username, request.email.as_deref(), &password_hash)
            .await?;

        let student = self.repository.students.create_for_user(user.id).await?;
        tracing::info!(username = %user.username, student_id = student.id, "created borrower profile for new account");

        Ok((user, student))
    }

    /// Authenticate by username and password, returning a JWT token
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            exp,
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok((token, user))
    }

    /// Get user by ID
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Search student profiles
    pub async fn search_students(&self, query: &StudentQuery) -> AppResult<(Vec<Student>, i64)> {
        self.repository.students.search(query).await
    }

    /// Get a student with the titles currently issued to them
    pub async fn get_student(&self, id: i32) -> AppResult<Student> {
        let mut student = self.repository.students.get_by_id(id).await?;
        student.borrowed_titles = self.repository.copies.borrowed_titles(id).await?;
        Ok(student)
    }

    /// Delete a student profile. Copies issued to them are unlinked, not
    /// deleted.
    pub async fn delete_student(&self, id: i32) -> AppResult<()> {
        self.repository.students.delete(id).await
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        if let Some(ref hash) = user.password {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        Ok(false)
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
