use crate::entities::product;
use crate::error::{Result, StoreError};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info, instrument};

/// A validated listing ready to be stored.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub user_id: i32,
    pub name: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[instrument(skip(db, new_product), fields(user_id = new_product.user_id, name = %new_product.name))]
pub async fn insert<C>(db: &C, new_product: NewProduct) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let active = product::ActiveModel {
        user_id: Set(new_product.user_id),
        name: Set(new_product.name),
        category: Set(new_product.category),
        price: Set(new_product.price.round_dp(2)),
        quantity: Set(new_product.quantity),
        description: Set(new_product.description),
        image_url: Set(new_product.image_url),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let model = active.insert(db).await.map_err(StoreError::from_write)?;
    info!("Product created with ID: {}", model.id);
    Ok(model)
}

#[instrument(skip(db))]
pub async fn find_by_id<C>(db: &C, id: i32) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Ok(product::Entity::find_by_id(id).one(db).await?)
}

/// Every listing in the marketplace, oldest first.
#[instrument(skip(db))]
pub async fn list_all<C>(db: &C) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    let products = product::Entity::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;
    debug!("Retrieved {} products", products.len());
    Ok(products)
}

/// Listings owned by a single farmer, oldest first.
#[instrument(skip(db))]
pub async fn list_for_owner<C>(db: &C, user_id: i32) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    let products = product::Entity::find()
        .filter(product::Column::UserId.eq(user_id))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;
    debug!("Retrieved {} products for owner {}", products.len(), user_id);
    Ok(products)
}
