//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the marketplace here: accounts, their
//! payout details, and the products farmers list.

pub mod bank_detail;
pub mod product;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::bank_detail::Entity as BankDetail;
    pub use super::product::Entity as Product;
    pub use super::user::Entity as User;
    pub use super::user::Role;
}
