pub mod categories;
pub mod invoices;
pub mod items;
pub mod order_items;
pub mod orders;
pub mod restaurant_team;
pub mod restaurants;
pub mod rtables;

pub use categories as category_entity;
pub use invoices as invoice_entity;
pub use items as item_entity;
pub use order_items as order_item_entity;
pub use orders as order_entity;
pub use restaurant_team as team_entity;
pub use restaurants as restaurant_entity;
pub use rtables as rtable_entity;

pub use order_items::OrderItemState;
pub use restaurant_team::{IdentitySource, JobType};
