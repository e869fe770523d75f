pub mod auth_service;
pub mod invoice_service;
pub mod menu_service;
pub mod order_service;
pub mod restaurant_service;
pub mod signup_service;
pub mod signup_store;
pub mod team_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::*;
pub use invoice_service::*;
pub use menu_service::*;
pub use order_service::*;
pub use restaurant_service::*;
pub use signup_service::*;
pub use signup_store::*;
pub use team_service::*;
