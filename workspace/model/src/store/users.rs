use crate::entities::user::{self, Role};
use crate::error::{Result, StoreError};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::{debug, info, instrument, trace};

/// Fields required to create a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Insert a new user, reporting a duplicate email as [`StoreError::Conflict`].
#[instrument(skip(db, new_user), fields(email = %new_user.email, role = %new_user.role))]
pub async fn insert<C>(db: &C, new_user: NewUser) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    trace!("Inserting user");
    let active = user::ActiveModel {
        name: Set(new_user.name),
        phone: Set(new_user.phone),
        email: Set(new_user.email),
        password: Set(new_user.password_hash),
        role: Set(new_user.role),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let model = active.insert(db).await.map_err(StoreError::from_write)?;
    info!("User created with ID: {}", model.id);
    Ok(model)
}

#[instrument(skip(db))]
pub async fn find_by_id<C>(db: &C, id: i32) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    Ok(user::Entity::find_by_id(id).one(db).await?)
}

#[instrument(skip(db))]
pub async fn find_by_email<C>(db: &C, email: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    let found = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?;
    debug!("User with email lookup found: {}", found.is_some());
    Ok(found)
}
