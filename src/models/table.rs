use crate::entities::rtable_entity as rtables;
use async_graphql::{InputObject, SimpleObject};

/// A physical table in the dining room.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex, name = "RTable")]
pub struct RTable {
    pub id: i32,
    pub name: String,
    pub restaurant_id: i32,
}

impl From<rtables::Model> for RTable {
    fn from(m: rtables::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            restaurant_id: m.restaurant_id,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "CreateRTableInput")]
pub struct CreateRTableInput {
    pub name: String,
    pub restaurant_id: i32,
}
