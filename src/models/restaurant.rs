use crate::entities::restaurant_entity as restaurants;
use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub restaurant_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<restaurants::Model> for Restaurant {
    fn from(m: restaurants::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            address: m.address,
            phone: m.phone,
            restaurant_code: m.restaurant_code,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateRestaurantInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}
