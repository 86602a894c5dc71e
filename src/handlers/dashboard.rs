use crate::error::AppError;
use crate::handlers::render;
use crate::schemas::AppState;
use crate::session::SessionContext;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use model::entities::{product, user::Role};
use model::store::products;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

/// Product response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    /// Owning farmer's user ID
    pub user_id: i32,
    pub name: String,
    pub category: Option<String>,
    #[schema(value_type = String, example = "3.50")]
    pub price: Decimal,
    pub quantity: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            category: model.category,
            price: model.price,
            quantity: model.quantity,
            description: model.description,
            image_url: model.image_url,
            created_at: model.created_at,
        }
    }
}

/// Data for both dashboard views
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardData {
    /// Role the listing was scoped for
    pub role: String,
    pub products: Vec<ProductResponse>,
}

/// Role-specific product listing
///
/// Farmers see only their own products; customers see every product.
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard for the signed-in user", body = crate::schemas::DashboardView),
        (status = 303, description = "Not logged in, redirect to /login"),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, session))]
pub async fn dashboard(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Response, AppError> {
    let Some(user) = session
        .require_login("Please login to access dashboard.")
        .await?
    else {
        return Ok(Redirect::to("/login").into_response());
    };

    let (page, listing) = match user.role {
        Role::Farmer => (
            "farmer_dashboard",
            products::list_for_owner(&state.db, user.id).await?,
        ),
        Role::Customer => ("customer_dashboard", products::list_all(&state.db).await?),
    };
    debug!("Dashboard for user ID {} lists {} products", user.id, listing.len());

    let data = DashboardData {
        role: user.role.to_string(),
        products: listing.into_iter().map(ProductResponse::from).collect(),
    };
    info!("Rendering {} for user ID: {}", page, user.id);
    render(&session, page, data).await
}
