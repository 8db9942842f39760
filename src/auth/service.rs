// Authentication service - business logic layer

use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::{
    error::AuthError,
    models::{Role, UpdateSettingsRequest, UserResponse},
    password::PasswordService,
    repository::{AdminRepository, UserRepository},
    token::TokenService,
};

/// Authentication service coordinating signup, login and admin account
/// management
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    admins: AdminRepository,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: UserRepository, admins: AdminRepository, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            admins,
            tokens,
        }
    }

    /// Register a new customer account
    ///
    /// Rejects with a conflict when the email is taken. The plaintext
    /// password is hashed before it touches the repository and is never
    /// logged.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserResponse, AuthError> {
        if self.users.email_exists(email).await? {
            debug!("Signup rejected, email already registered");
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = PasswordService::hash_password(password)?;
        let user = self.users.create_user(username, email, &password_hash).await?;

        info!("Registered new user with id {}", user.id);
        Ok(user.into())
    }

    /// Authenticate a customer and issue a token
    ///
    /// Unknown email and wrong password produce the identical error so
    /// the response cannot distinguish the two cases.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.tokens.issue(user.id, Role::User)
    }

    /// Authenticate an admin by email or username and issue a token
    pub async fn admin_login(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        password: &str,
    ) -> Result<String, AuthError> {
        let admin = self
            .admins
            .find_by_email_or_username(email, username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &admin.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.tokens.issue(admin.id, admin.role)
    }

    /// Reissue a fresh token from a still-valid one
    pub async fn refresh(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.tokens.verify(token)?;
        self.tokens.issue(claims.sub, claims.role)
    }

    /// Change an admin password after verifying the current one
    ///
    /// The stored hash is recomputed only because a new plaintext was
    /// supplied; nothing is rehashed otherwise.
    pub async fn change_admin_password(
        &self,
        admin_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let admin = self
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or_else(|| AuthError::NotFound("Admin".to_string()))?;

        if !PasswordService::verify_password(current_password, &admin.password_hash)? {
            return Err(AuthError::WrongCurrentPassword);
        }

        let new_hash = PasswordService::hash_password(new_password)?;
        self.admins.update_password(admin.id, &new_hash).await?;

        info!("Password changed for admin {}", admin.id);
        Ok(())
    }

    /// Update admin site settings; only supplied fields overwrite
    pub async fn update_admin_settings(
        &self,
        admin_id: i32,
        request: &UpdateSettingsRequest,
    ) -> Result<(), AuthError> {
        self.admins
            .find_by_id(admin_id)
            .await?
            .ok_or_else(|| AuthError::NotFound("Admin".to_string()))?;

        self.admins
            .update_settings(
                admin_id,
                request.site_title.as_deref(),
                request.site_description.as_deref(),
                request.theme.as_deref(),
                request.email.as_deref(),
            )
            .await
    }
}
