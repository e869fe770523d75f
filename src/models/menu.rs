use crate::entities::{category_entity as categories, item_entity as items};
use async_graphql::{InputObject, SimpleObject};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub restaurant_id: i32,
}

impl From<categories::Model> for Category {
    fn from(m: categories::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            restaurant_id: m.restaurant_id,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateCategoryInput {
    pub name: String,
    pub restaurant_id: i32,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Price in cents.
    pub price: i64,
    pub category_id: i32,
}

impl From<items::Model> for Item {
    fn from(m: items::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            image: m.image,
            price: m.price,
            category_id: m.category_id,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateItemInput {
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: i64,
    pub category_id: i32,
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<i64>,
}
