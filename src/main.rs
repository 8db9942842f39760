mod auth;
mod config;
mod db;
mod error;
mod orders;
mod products;
mod uploads;
mod users;
mod validation;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{AdminRepository, AuthService, TokenService, UserRepository};
use config::AppConfig;
use orders::OrdersRepository;
use products::ProductRepository;
use uploads::UploadStore;

/// Request bodies may carry one main image and four thumbnails at 5 MB
/// each, so the body cap sits comfortably above that
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::signup_handler,
        auth::handlers::login_handler,
        products::handlers::create_product,
        products::handlers::get_all_products,
        products::handlers::get_product_by_id,
    ),
    components(
        schemas(
            auth::models::SignupRequest,
            auth::models::LoginRequest,
            auth::models::TokenResponse,
            auth::models::MessageResponse,
            auth::models::UserResponse,
            auth::models::Role,
            products::models::Product,
            products::models::CreateProduct,
            products::models::SizesInput,
        )
    ),
    tags(
        (name = "auth", description = "Customer and admin authentication"),
        (name = "products", description = "Product catalog management")
    ),
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = "RESTful API for a small e-commerce storefront"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: Arc<TokenService>,
    pub uploads: UploadStore,
    pub auth: AuthService,
    pub users: UserRepository,
    pub products: ProductRepository,
    pub orders: OrdersRepository,
}

impl AppState {
    fn new(db: PgPool, config: &AppConfig) -> Self {
        let tokens = Arc::new(TokenService::new(config.jwt_secret.clone()));
        let users = UserRepository::new(db.clone());
        let admins = AdminRepository::new(db.clone());

        Self {
            auth: AuthService::new(users.clone(), admins, tokens.clone()),
            users,
            products: ProductRepository::new(db.clone()),
            orders: OrdersRepository::new(db.clone()),
            uploads: UploadStore::new(config.upload_dir.clone()),
            tokens,
            db,
        }
    }
}

/// Creates and configures the application router
///
/// Routes follow the storefront client contract: /api/auth for customer
/// accounts, /api/admin for administrative access, and CRUD surfaces for
/// products, orders and users. Uploaded images are served back as static
/// files under /uploads.
fn create_router(state: AppState, config: &AppConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Admin routes beyond login sit behind the role gate; identity
    // extraction always runs before the role comparison
    let admin_routes = Router::new()
        .route("/login", post(auth::handlers::admin_login_handler))
        .merge(
            Router::new()
                .route(
                    "/change-password",
                    put(auth::handlers::change_password_handler),
                )
                .route("/settings", put(auth::handlers::update_settings_handler))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::middleware::require_admin,
                )),
        );

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Auth routes
        .route("/api/auth/signup", post(auth::handlers::signup_handler))
        .route("/api/auth/login", post(auth::handlers::login_handler))
        .route(
            "/api/auth/refresh-token",
            post(auth::handlers::refresh_handler),
        )
        .nest("/api/admin", admin_routes)
        // Product routes
        .route(
            "/api/products",
            get(products::handlers::get_all_products).post(products::handlers::create_product),
        )
        .route("/api/products/add", post(products::handlers::add_product))
        .route(
            "/api/products/:id",
            get(products::handlers::get_product_by_id)
                .put(products::handlers::update_product)
                .delete(products::handlers::delete_product),
        )
        // Order routes
        .route(
            "/api/orders",
            post(orders::handlers::place_order).get(orders::handlers::get_all_orders),
        )
        .route(
            "/api/orders/:id",
            get(orders::handlers::get_order_by_id)
                .put(orders::handlers::update_order_status)
                .delete(orders::handlers::delete_order),
        )
        // User administration routes
        .route("/api/users", get(users::handlers::get_all_users))
        .route("/api/users/:id", delete(users::handlers::delete_user))
        // Serve uploaded images back as static files
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        // Outermost first: tracing wraps CORS wraps the body cap
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    tracing::info!("Storefront API - starting...");

    let config = AppConfig::from_env().unwrap_or_else(|err| {
        tracing::error!("{}", err);
        std::process::exit(1);
    });

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Make sure the upload directory exists before the first write
    let state = AppState::new(db_pool, &config);
    state
        .uploads
        .ensure_dir()
        .await
        .expect("Failed to create upload directory");

    let app = create_router(state, &config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Storefront API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
