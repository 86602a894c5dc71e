use crate::handlers::auth::{LoginForm, RegisterForm, RegisterPage};
use crate::handlers::bank::{BankDetailForm, BankDetailResponse, BankPage};
use crate::handlers::dashboard::{DashboardData, ProductResponse};
use crate::handlers::products::ProductForm;
use crate::session::{Flash, FlashLevel, SessionSettings};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cookie signing settings for the session layer
    pub sessions: SessionSettings,
}

/// A rendered page: which view to show, who is signed in, pending flash
/// messages, and the view's own data.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[aliases(
    EmptyPage = PageView<Empty>,
    RegisterView = PageView<RegisterPage>,
    DashboardView = PageView<DashboardData>,
    BankView = PageView<BankPage>
)]
pub struct PageView<T> {
    /// View name, e.g. `farmer_dashboard`
    pub page: String,
    /// Display name of the signed-in user
    pub user: Option<String>,
    /// Flash messages queued since the last rendered page
    pub flashes: Vec<Flash>,
    /// View-specific payload
    pub data: T,
}

/// Payload for views that carry no data
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Empty {}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::home::home,
        crate::handlers::auth::register_page,
        crate::handlers::auth::register,
        crate::handlers::auth::login_page,
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::dashboard::dashboard,
        crate::handlers::products::product_page,
        crate::handlers::products::create_product,
        crate::handlers::bank::bank_page,
        crate::handlers::bank::save_bank_details,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            Empty,
            EmptyPage,
            RegisterView,
            DashboardView,
            BankView,
            Flash,
            FlashLevel,
            RegisterForm,
            RegisterPage,
            LoginForm,
            ProductForm,
            ProductResponse,
            DashboardData,
            BankDetailForm,
            BankDetailResponse,
            BankPage,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "pages", description = "Public pages"),
        (name = "auth", description = "Registration, login and logout"),
        (name = "dashboard", description = "Role-specific product listings"),
        (name = "products", description = "Product listing by farmers"),
        (name = "bank", description = "Bank payout details"),
    ),
    info(
        title = "AgriMart",
        description = "Marketplace connecting farmers with customers",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
