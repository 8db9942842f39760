// Authentication module
// Provides JWT-based authentication for customers and admins, with
// role-gated access to administrative routes

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use middleware::{require_admin, AuthenticatedIdentity};
pub use models::{Admin, LoginRequest, Role, SignupRequest, TokenResponse, User, UserResponse};
pub use repository::{AdminRepository, UserRepository};
pub use service::AuthService;
pub use token::TokenService;
