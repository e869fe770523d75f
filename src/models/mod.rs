pub mod auth;
pub mod common;
pub mod identity;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod restaurant;
pub mod signup;
pub mod table;
pub mod team;

pub use auth::*;
pub use common::*;
pub use identity::*;
pub use invoice::*;
pub use menu::*;
pub use order::*;
pub use restaurant::*;
pub use signup::*;
pub use table::*;
pub use team::*;
