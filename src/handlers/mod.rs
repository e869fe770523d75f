pub mod graphql;
pub mod health;

pub use graphql::graphql_config;
pub use health::health_config;
