use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The closed set of roles a marketplace account can hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Lists products and sees only their own listings.
    #[sea_orm(string_value = "farmer")]
    Farmer,
    /// Browses every listing in the marketplace.
    #[sea_orm(string_value = "customer")]
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "farmer" => Ok(Role::Farmer),
            "customer" => Ok(Role::Customer),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// A registered marketplace account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string. Never the plaintext.
    pub password: String,
    pub role: Role,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // Payout details, at most one per user.
    #[sea_orm(has_one = "super::bank_detail::Entity")]
    BankDetail,
    // Listings owned by a farmer.
    #[sea_orm(has_many = "super::product::Entity")]
    Product,
}

impl Related<super::bank_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankDetail.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
