pub mod dispatcher;
pub mod identity;
pub mod supabase;

pub use dispatcher::*;
pub use identity::*;
pub use supabase::*;
