pub mod auth;
pub mod cors;

pub use auth::{AuthMiddleware, current_auth};
pub use cors::create_cors;
