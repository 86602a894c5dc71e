use crate::error::AppError;
use crate::handlers::{non_empty, render};
use crate::schemas::{AppState, Empty};
use crate::session::{FlashLevel, SessionContext, SessionUser};
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use model::entities::user::Role;
use model::store::products::{self, NewProduct};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Product form fields. Price and quantity arrive as text and are parsed
/// by [`ProductForm::parse`].
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct ProductForm {
    #[serde(default)]
    #[validate(custom(function = "crate::handlers::not_blank"))]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Decimal price, e.g. `3.50`
    #[serde(default)]
    #[validate(custom(function = "crate::handlers::not_blank"))]
    pub price: String,
    /// Whole number of units
    #[serde(default)]
    #[validate(custom(function = "crate::handlers::not_blank"))]
    pub quantity: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Free text, not checked to be a URL
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Largest price the `DECIMAL(10, 2)` column holds.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Why a submitted product could not be turned into a listing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductInputError {
    #[error("price '{0}' is not a valid number")]
    InvalidPrice(String),

    #[error("quantity '{0}' is not a whole number")]
    InvalidQuantity(String),

    #[error("price cannot be negative")]
    NegativePrice,

    #[error("price {0} exceeds the maximum of {}", MAX_PRICE)]
    PriceOutOfRange(Decimal),

    #[error("quantity cannot be negative")]
    NegativeQuantity,
}

impl ProductForm {
    /// Parse the textual fields into a listing owned by `user_id`.
    pub fn parse(self, user_id: i32) -> Result<NewProduct, ProductInputError> {
        let price_text = self.price.trim();
        let price = Decimal::from_str(price_text)
            .map_err(|_| ProductInputError::InvalidPrice(price_text.to_string()))?
            .round_dp(2);
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ProductInputError::NegativePrice);
        }
        if price > MAX_PRICE {
            return Err(ProductInputError::PriceOutOfRange(price));
        }

        let quantity_text = self.quantity.trim();
        let quantity = quantity_text
            .parse::<i32>()
            .map_err(|_| ProductInputError::InvalidQuantity(quantity_text.to_string()))?;
        if quantity < 0 {
            return Err(ProductInputError::NegativeQuantity);
        }

        Ok(NewProduct {
            user_id,
            name: self.name.trim().to_string(),
            category: non_empty(self.category),
            price,
            quantity,
            description: non_empty(self.description),
            image_url: non_empty(self.image_url),
        })
    }
}

/// Run both gates for the product routes, returning the farmer on success
/// or the redirect to send otherwise.
async fn require_farmer(session: &SessionContext) -> Result<Result<SessionUser, Response>, AppError> {
    let Some(user) = session.require_login("Please login to add products.").await? else {
        return Ok(Err(Redirect::to("/login").into_response()));
    };
    if !session
        .require_role(&user, Role::Farmer, "Only farmers can add products.")
        .await?
    {
        return Ok(Err(Redirect::to("/dashboard").into_response()));
    }
    Ok(Ok(user))
}

/// Product form
#[utoipa::path(
    get,
    path = "/product",
    tag = "products",
    responses(
        (status = 200, description = "Product form", body = crate::schemas::EmptyPage),
        (status = 303, description = "Not logged in or not a farmer, redirect away")
    )
)]
#[instrument(skip(session))]
pub async fn product_page(session: SessionContext) -> Result<Response, AppError> {
    if let Err(redirect) = require_farmer(&session).await? {
        return Ok(redirect);
    }
    render(&session, "product_form", Empty::default()).await
}

/// Create a product listing
#[utoipa::path(
    post,
    path = "/product",
    tag = "products",
    request_body(content = ProductForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Product created, redirect to /dashboard; or not permitted, redirect away"),
        (status = 200, description = "Invalid input, product form re-rendered", body = crate::schemas::EmptyPage),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, session, form), fields(name = %form.name))]
pub async fn create_product(
    State(state): State<AppState>,
    session: SessionContext,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    trace!("Entering create_product function");
    let user = match require_farmer(&session).await? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };

    if let Err(errors) = form.validate() {
        debug!("Product form incomplete: {}", errors);
        session
            .flash(FlashLevel::Warning, "Please fill in all required fields!")
            .await?;
        return render(&session, "product_form", Empty::default()).await;
    }

    let new_product = match form.parse(user.id) {
        Ok(new_product) => new_product,
        Err(input_err) => {
            warn!("Product rejected: {}", input_err);
            session
                .flash(FlashLevel::Danger, format!("Error adding product: {}", input_err))
                .await?;
            return render(&session, "product_form", Empty::default()).await;
        }
    };

    match products::insert(&state.db, new_product).await {
        Ok(product) => {
            info!("Product ID: {} added by user ID: {}", product.id, user.id);
            session
                .flash(FlashLevel::Success, "Product added successfully!")
                .await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(store_err) => {
            // The insert is a single statement, so nothing was written.
            error!("Failed to store product for user ID {}: {}", user.id, store_err);
            session
                .flash(
                    FlashLevel::Danger,
                    format!("Error adding product: could not be saved ({})", store_err),
                )
                .await?;
            render(&session, "product_form", Empty::default()).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: &str, quantity: &str) -> ProductForm {
        ProductForm {
            name: "Corn".to_string(),
            category: Some(String::new()),
            price: price.to_string(),
            quantity: quantity.to_string(),
            description: None,
            image_url: Some("http://img".to_string()),
        }
    }

    #[test]
    fn parses_valid_input() {
        let product = form("3.50", "10").parse(1).unwrap();

        assert_eq!(product.user_id, 1);
        assert_eq!(product.price, Decimal::new(350, 2));
        assert_eq!(product.quantity, 10);
        assert_eq!(product.category, None);
        assert_eq!(product.image_url.as_deref(), Some("http://img"));
    }

    #[test]
    fn distinguishes_each_parse_failure() {
        assert_eq!(
            form("abc", "10").parse(1).unwrap_err(),
            ProductInputError::InvalidPrice("abc".to_string())
        );
        assert_eq!(
            form("3.50", "ten").parse(1).unwrap_err(),
            ProductInputError::InvalidQuantity("ten".to_string())
        );
        assert_eq!(
            form("3.50", "1.5").parse(1).unwrap_err(),
            ProductInputError::InvalidQuantity("1.5".to_string())
        );
        assert_eq!(form("-1", "10").parse(1).unwrap_err(), ProductInputError::NegativePrice);
        assert_eq!(form("1", "-10").parse(1).unwrap_err(), ProductInputError::NegativeQuantity);
    }

    #[test]
    fn prices_beyond_the_column_range_are_rejected() {
        assert_eq!(
            form("123456789012345.67", "1").parse(1).unwrap_err(),
            ProductInputError::PriceOutOfRange(Decimal::new(12345678901234567, 2))
        );
        assert_eq!(
            form("100000000", "1").parse(1).unwrap_err(),
            ProductInputError::PriceOutOfRange(Decimal::new(100000000, 0))
        );

        let largest = form("99999999.99", "1").parse(1).unwrap();
        assert_eq!(largest.price, MAX_PRICE);
        // Rounds to two places before the range check
        let rounded = form("99999999.994", "1").parse(1).unwrap();
        assert_eq!(rounded.price, MAX_PRICE);
    }

    #[test]
    fn blank_required_fields_fail_validation() {
        let mut blank_name = form("3.50", "10");
        blank_name.name = "   ".to_string();
        assert!(blank_name.validate().is_err());

        let blank_price = form(" ", "10");
        assert!(blank_price.validate().is_err());
    }

    #[test]
    fn zero_values_are_allowed() {
        let product = form("0", "0").parse(1).unwrap();
        assert!(product.price.is_zero());
        assert_eq!(product.quantity, 0);
    }

    #[test]
    fn missing_required_fields_fail_validation() {
        let mut incomplete = form("3.50", "10");
        incomplete.price = String::new();
        assert!(incomplete.validate().is_err());
        assert!(form("3.50", "10").validate().is_ok());
    }
}
