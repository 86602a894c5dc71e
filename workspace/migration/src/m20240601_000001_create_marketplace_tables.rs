use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Name, 100))
                    .col(string_len_null(Users::Phone, 20))
                    .col(string_len(Users::Email, 100).unique_key())
                    .col(string_len(Users::Password, 255))
                    .col(string_len(Users::Role, 20))
                    .col(
                        timestamp_with_time_zone(Users::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create bank_details table, one row per user
        manager
            .create_table(
                Table::create()
                    .table(BankDetails::Table)
                    .if_not_exists()
                    .col(pk_auto(BankDetails::Id))
                    .col(integer(BankDetails::UserId).unique_key())
                    .col(string_len(BankDetails::AccountHolderName, 100))
                    .col(string_len(BankDetails::AccountNumber, 50))
                    .col(string_len(BankDetails::IfscCode, 20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bank_details_user")
                            .from(BankDetails::Table, BankDetails::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create products table
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(integer(Products::UserId))
                    .col(string_len(Products::Name, 100))
                    .col(string_len_null(Products::Category, 50))
                    .col(decimal_len(Products::Price, 10, 2))
                    .col(integer(Products::Quantity))
                    .col(text_null(Products::Description))
                    .col(text_null(Products::ImageUrl))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_user")
                            .from(Products::Table, Products::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Dashboards filter listings by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_products_user_id")
                    .table(Products::Table)
                    .col(Products::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to respect foreign key constraints
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BankDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Phone,
    Email,
    Password,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BankDetails {
    Table,
    Id,
    UserId,
    AccountHolderName,
    AccountNumber,
    IfscCode,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    UserId,
    Name,
    Category,
    Price,
    Quantity,
    Description,
    ImageUrl,
    CreatedAt,
}
