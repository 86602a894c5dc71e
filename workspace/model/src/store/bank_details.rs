use crate::entities::bank_detail;
use crate::error::{Result, StoreError};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use tracing::{info, instrument, trace};

/// Payout fields submitted by a user.
#[derive(Debug, Clone)]
pub struct BankDetailInput {
    pub account_holder_name: String,
    pub account_number: String,
    pub ifsc_code: String,
}

#[instrument(skip(db))]
pub async fn find_for_user<C>(db: &C, user_id: i32) -> Result<Option<bank_detail::Model>>
where
    C: ConnectionTrait,
{
    Ok(bank_detail::Entity::find()
        .filter(bank_detail::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

/// Create the user's bank record or overwrite the existing one.
///
/// Issued as a single `INSERT ... ON CONFLICT (user_id) DO UPDATE`, so two
/// concurrent saves for the same user can never produce a second row.
#[instrument(skip(db, input))]
pub async fn upsert<C>(db: &C, user_id: i32, input: BankDetailInput) -> Result<bank_detail::Model>
where
    C: ConnectionTrait,
{
    trace!("Upserting bank details");
    let active = bank_detail::ActiveModel {
        user_id: Set(user_id),
        account_holder_name: Set(input.account_holder_name),
        account_number: Set(input.account_number),
        ifsc_code: Set(input.ifsc_code),
        ..Default::default()
    };

    bank_detail::Entity::insert(active)
        .on_conflict(
            OnConflict::column(bank_detail::Column::UserId)
                .update_columns([
                    bank_detail::Column::AccountHolderName,
                    bank_detail::Column::AccountNumber,
                    bank_detail::Column::IfscCode,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(StoreError::from_write)?;

    let saved = find_for_user(db, user_id).await?.ok_or_else(|| {
        StoreError::Database(DbErr::RecordNotFound(format!(
            "bank details for user {} after upsert",
            user_id
        )))
    })?;
    info!("Bank details saved with ID: {}", saved.id);
    Ok(saved)
}
