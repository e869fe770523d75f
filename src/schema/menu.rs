use crate::models::*;
use crate::services::{MenuService, OrderService, RestaurantService};
use async_graphql::{ComplexObject, Context, Object, Result, ResultExt};

#[derive(Default)]
pub struct MenuQuery;

#[Object]
impl MenuQuery {
    async fn categories(&self, ctx: &Context<'_>, restaurant_id: i32) -> Result<Vec<Category>> {
        let service = ctx.data::<MenuService>()?;
        let rows = service.list_categories(restaurant_id).await.extend()?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn items(&self, ctx: &Context<'_>, category_id: i32) -> Result<Vec<Item>> {
        let service = ctx.data::<MenuService>()?;
        let rows = service.list_items(category_id).await.extend()?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn item(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Item>> {
        let service = ctx.data::<MenuService>()?;
        Ok(service.get_item(id).await.extend()?.map(Item::from))
    }
}

#[derive(Default)]
pub struct MenuMutation;

#[Object]
impl MenuMutation {
    async fn create_category(
        &self,
        ctx: &Context<'_>,
        input: CreateCategoryInput,
    ) -> Result<Category> {
        let service = ctx.data::<MenuService>()?;
        Ok(service.create_category(input).await.extend()?.into())
    }

    async fn delete_category(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let service = ctx.data::<MenuService>()?;
        service.delete_category(id).await.extend()
    }

    async fn create_item(&self, ctx: &Context<'_>, input: CreateItemInput) -> Result<Item> {
        let service = ctx.data::<MenuService>()?;
        Ok(service.create_item(input).await.extend()?.into())
    }

    async fn update_item(
        &self,
        ctx: &Context<'_>,
        id: i32,
        input: UpdateItemInput,
    ) -> Result<Item> {
        let service = ctx.data::<MenuService>()?;
        Ok(service.update_item(id, input).await.extend()?.into())
    }

    async fn delete_item(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let service = ctx.data::<MenuService>()?;
        service.delete_item(id).await.extend()
    }
}

#[ComplexObject]
impl Category {
    async fn items(&self, ctx: &Context<'_>) -> Result<Vec<Item>> {
        let service = ctx.data::<MenuService>()?;
        let rows = service.list_items(self.id).await.extend()?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn restaurant(&self, ctx: &Context<'_>) -> Result<Option<Restaurant>> {
        let service = ctx.data::<RestaurantService>()?;
        Ok(service.get(self.restaurant_id).await.extend()?.map(Restaurant::from))
    }
}

#[ComplexObject]
impl Item {
    async fn order_items(&self, ctx: &Context<'_>) -> Result<Vec<OrderItem>> {
        let service = ctx.data::<OrderService>()?;
        let rows = service.list_order_items_by_item(self.id).await.extend()?;
        Ok(rows.into_iter().map(OrderItem::from).collect())
    }

    async fn category(&self, ctx: &Context<'_>) -> Result<Option<Category>> {
        let service = ctx.data::<MenuService>()?;
        Ok(service.get_category(self.category_id).await.extend()?.map(Category::from))
    }
}
