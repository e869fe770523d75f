pub mod auth;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod restaurant;
pub mod signup;
pub mod table;
pub mod team;

use crate::models::AuthContext;
use crate::services::*;
use async_graphql::{Context, EmptySubscription, MergedObject, Schema};

pub use auth::{AuthMutation, AuthQuery};
pub use invoice::{InvoiceMutation, InvoiceQuery};
pub use menu::{MenuMutation, MenuQuery};
pub use order::{OrderMutation, OrderQuery};
pub use restaurant::{RestaurantMutation, RestaurantQuery};
pub use signup::SignupMutation;
pub use table::{TableMutation, TableQuery};
pub use team::{TeamMutation, TeamQuery};

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    RestaurantQuery,
    TableQuery,
    MenuQuery,
    OrderQuery,
    InvoiceQuery,
    TeamQuery,
    AuthQuery,
);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    SignupMutation,
    RestaurantMutation,
    TableMutation,
    MenuMutation,
    OrderMutation,
    InvoiceMutation,
    TeamMutation,
    AuthMutation,
);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Everything the resolvers read from the schema data.
#[derive(Clone)]
pub struct Services {
    pub restaurants: RestaurantService,
    pub tables: TableService,
    pub menu: MenuService,
    pub orders: OrderService,
    pub invoices: InvoiceService,
    pub team: TeamService,
    pub auth: AuthService,
    pub signup: SignupService,
}

pub fn build_schema(services: Services) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(services.restaurants)
        .data(services.tables)
        .data(services.menu)
        .data(services.orders)
        .data(services.invoices)
        .data(services.team)
        .data(services.auth)
        .data(services.signup)
        .finish()
}

/// Caller identity for this request; anonymous when the middleware attached none.
pub(crate) fn auth_context(ctx: &Context<'_>) -> AuthContext {
    ctx.data_opt::<AuthContext>().cloned().unwrap_or_default()
}
