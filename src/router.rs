use crate::handlers::{
    auth::{login, login_page, logout, register, register_page},
    bank::{bank_page, save_bank_details},
    dashboard::dashboard,
    health::health_check,
    home::home,
    products::{create_product, product_page},
};
use crate::schemas::{ApiDoc, AppState};
use crate::session::COOKIE_NAME;
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tower_sessions::{cookie::SameSite, MemoryStore, SessionManagerLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(COOKIE_NAME)
        .with_same_site(SameSite::Lax)
        .with_secure(state.sessions.secure)
        .with_signed(state.sessions.key.clone());

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Public pages
        .route("/", get(home))
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        // Session-gated pages
        .route("/dashboard", get(dashboard))
        .route("/product", get(product_page).post(create_product))
        .route("/bank", get(bank_page).post(save_bank_details))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(session_layer),
        )
        .with_state(state)
}
