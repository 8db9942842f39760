// Database repositories for user and admin accounts

use sqlx::PgPool;

use crate::auth::{
    error::AuthError,
    models::{Admin, User},
};

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user; the email is normalized to lowercase on write.
    /// Email and username are both unique keys; a violation of either
    /// surfaces as the same already-exists error.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, LOWER($2), $3)
             RETURNING id, username, email, password_hash, created_at",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::EmailAlreadyExists;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    /// Find a user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at
             FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    /// Check if an email is already registered
    pub async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(exists.0)
    }

    /// Fetch all users
    pub async fn find_all(&self) -> Result<Vec<User>, AuthError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(users)
    }

    /// Delete a user by id; returns false when the id does not resolve
    pub async fn delete(&self, id: i32) -> Result<bool, AuthError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Admin repository for database operations
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an admin by email or username, whichever is supplied
    pub async fn find_by_email_or_username(
        &self,
        email: Option<&str>,
        username: Option<&str>,
    ) -> Result<Option<Admin>, AuthError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, email, username, password_hash, role, site_title, site_description, theme
             FROM admins WHERE LOWER(email) = LOWER($1) OR username = $2",
        )
        .bind(email.unwrap_or(""))
        .bind(username.unwrap_or(""))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(admin)
    }

    /// Find an admin by id
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Admin>, AuthError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, email, username, password_hash, role, site_title, site_description, theme
             FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(admin)
    }

    /// Overwrite the stored password hash
    pub async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), AuthError> {
        sqlx::query("UPDATE admins SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Update settings fields; only supplied values overwrite existing ones
    pub async fn update_settings(
        &self,
        id: i32,
        site_title: Option<&str>,
        site_description: Option<&str>,
        theme: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), AuthError> {
        sqlx::query(
            "UPDATE admins SET
                site_title = COALESCE($1, site_title),
                site_description = COALESCE($2, site_description),
                theme = COALESCE($3, theme),
                email = COALESCE(LOWER($4), email)
             WHERE id = $5",
        )
        .bind(site_title)
        .bind(site_description)
        .bind(theme)
        .bind(email)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
