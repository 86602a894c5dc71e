//! Per-entity persistence operations.
//!
//! Every function issues a single statement against the connection it is
//! given, so each write is its own atomic unit.

pub mod bank_details;
pub mod products;
pub mod users;

#[cfg(test)]
mod tests {
    use super::bank_details::{self, BankDetailInput};
    use super::products::{self, NewProduct};
    use super::users::{self, NewUser};
    use crate::entities::prelude::*;
    use crate::error::StoreError;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{Database, DatabaseConnection, EntityTrait, PaginatorTrait};

    async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");
        Migrator::up(&db, None).await.expect("Migrations failed.");
        db
    }

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            name: "Test".to_string(),
            phone: None,
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            role,
        }
    }

    fn new_product(user_id: i32, name: &str) -> NewProduct {
        NewProduct {
            user_id,
            name: name.to_string(),
            category: None,
            price: Decimal::new(999, 2),
            quantity: 3,
            description: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let db = setup_db().await;
        users::insert(&db, new_user("a@x.com", Role::Farmer))
            .await
            .unwrap();

        let err = users::insert(&db, new_user("a@x.com", Role::Customer))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(User::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_by_email_matches_exactly() {
        let db = setup_db().await;
        let created = users::insert(&db, new_user("a@x.com", Role::Farmer))
            .await
            .unwrap();

        let found = users::find_by_email(&db, "a@x.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));
        assert!(users::find_by_email(&db, "b@x.com").await.unwrap().is_none());
        assert!(users::find_by_id(&db, created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn products_are_listed_per_owner() {
        let db = setup_db().await;
        let alice = users::insert(&db, new_user("a@x.com", Role::Farmer))
            .await
            .unwrap();
        let carol = users::insert(&db, new_user("c@x.com", Role::Farmer))
            .await
            .unwrap();

        products::insert(&db, new_product(alice.id, "Corn")).await.unwrap();
        products::insert(&db, new_product(carol.id, "Rice")).await.unwrap();
        products::insert(&db, new_product(alice.id, "Beans")).await.unwrap();

        let mine = products::list_for_owner(&db, alice.id).await.unwrap();
        let names: Vec<_> = mine.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Corn", "Beans"]);

        let all = products::list_all(&db).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn price_is_stored_with_two_fraction_digits() {
        let db = setup_db().await;
        let alice = users::insert(&db, new_user("a@x.com", Role::Farmer))
            .await
            .unwrap();

        let mut product = new_product(alice.id, "Honey");
        product.price = Decimal::new(12344, 3); // 12.344
        let created = products::insert(&db, product).await.unwrap();

        let stored = products::find_by_id(&db, created.id).await.unwrap().unwrap();
        assert_eq!(stored.price, Decimal::new(1234, 2));
    }

    #[tokio::test]
    async fn bank_upsert_overwrites_in_place() {
        let db = setup_db().await;
        let alice = users::insert(&db, new_user("a@x.com", Role::Farmer))
            .await
            .unwrap();

        let first = bank_details::upsert(
            &db,
            alice.id,
            BankDetailInput {
                account_holder_name: "Alice".to_string(),
                account_number: "111".to_string(),
                ifsc_code: "SBIN0000001".to_string(),
            },
        )
        .await
        .unwrap();

        let second = bank_details::upsert(
            &db,
            alice.id,
            BankDetailInput {
                account_holder_name: "Alice A.".to_string(),
                account_number: "222".to_string(),
                ifsc_code: "HDFC0000002".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(BankDetail::find().count(&db).await.unwrap(), 1);

        let stored = bank_details::find_for_user(&db, alice.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.account_holder_name, "Alice A.");
        assert_eq!(stored.account_number, "222");
        assert_eq!(stored.ifsc_code, "HDFC0000002");
    }
}
