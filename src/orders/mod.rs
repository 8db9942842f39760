pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

pub use error::OrderError;
pub use handlers::*;
pub use models::*;
pub use repository::OrdersRepository;
