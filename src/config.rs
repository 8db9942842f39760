// Application configuration loaded from environment variables

/// Configuration collected once at startup and threaded through the app.
/// The JWT secret is injected into the token service at construction
/// rather than read from the environment at verification time.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: String,
    pub jwt_secret: String,
    pub upload_dir: String,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the environment.
    /// DATABASE_URL and JWT_SECRET are required; everything else has a default.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in environment".to_string())?;
        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set in environment".to_string())?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT").unwrap_or_else(|_| "4000".to_string());
        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        // Comma-separated origin allow-list for CORS
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            upload_dir,
            allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn origins_are_split_and_trimmed() {
        let raw = "http://localhost:5173, http://localhost:3000";
        let origins: Vec<String> = raw
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        assert_eq!(
            origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
    }
}
