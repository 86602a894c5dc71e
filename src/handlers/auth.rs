use crate::credentials::{hash_password, verify_password};
use crate::error::AppError;
use crate::handlers::{non_empty, render};
use crate::schemas::{AppState, Empty};
use crate::session::{FlashLevel, SessionContext};
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use model::entities::user::Role;
use model::store::users::{self, NewUser};
use model::StoreError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Registration form fields
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct RegisterForm {
    /// Display name
    #[serde(default)]
    #[validate(custom(function = "crate::handlers::not_blank"))]
    pub name: String,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Login email (must be unique)
    #[serde(default)]
    #[validate(custom(function = "crate::handlers::not_blank"))]
    pub email: String,
    /// `farmer` or `customer`
    #[serde(default)]
    #[validate(custom(function = "crate::handlers::not_blank"))]
    pub role: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login form fields
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Data for the registration view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterPage {
    /// Roles an account can be registered with
    pub roles: Vec<String>,
}

/// Registration form
#[utoipa::path(
    get,
    path = "/register",
    tag = "auth",
    responses(
        (status = 200, description = "Registration form", body = crate::schemas::RegisterView)
    )
)]
#[instrument(skip(session))]
pub async fn register_page(session: SessionContext) -> Result<Response, AppError> {
    render_register(&session).await
}

async fn render_register(session: &SessionContext) -> Result<Response, AppError> {
    let roles = [Role::Farmer, Role::Customer]
        .iter()
        .map(|role| role.to_string())
        .collect();
    render(session, "register", RegisterPage { roles }).await
}

/// Create an account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created, redirect to /login; or email taken, redirect to /register"),
        (status = 200, description = "Incomplete form or unknown role, registration form re-rendered", body = crate::schemas::RegisterView),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: SessionContext,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    trace!("Entering register function");

    if let Err(errors) = form.validate() {
        debug!("Registration form incomplete: {}", errors);
        session
            .flash(FlashLevel::Warning, "Please fill in all required fields!")
            .await?;
        return render_register(&session).await;
    }

    let role = match form.role.parse::<Role>() {
        Ok(role) => role,
        Err(reason) => {
            warn!("Registration rejected: {}", reason);
            session
                .flash(
                    FlashLevel::Danger,
                    "Please choose a valid role (farmer or customer).",
                )
                .await?;
            return render_register(&session).await;
        }
    };

    let email = form.email.trim().to_string();
    if users::find_by_email(&state.db, &email).await?.is_some() {
        return reject_duplicate_email(&session).await;
    }

    let new_user = NewUser {
        name: form.name.trim().to_string(),
        phone: non_empty(form.phone),
        email,
        password_hash: hash_password(&form.password)?,
        role,
    };

    match users::insert(&state.db, new_user).await {
        Ok(user) => {
            info!("Registered user ID: {} as {}", user.id, user.role);
            session
                .flash(FlashLevel::Success, "Registration successful! Please log in.")
                .await?;
            Ok(Redirect::to("/login").into_response())
        }
        // A concurrent registration won the race past the lookup above.
        Err(StoreError::Conflict(_)) => reject_duplicate_email(&session).await,
        Err(err) => Err(err.into()),
    }
}

async fn reject_duplicate_email(session: &SessionContext) -> Result<Response, AppError> {
    warn!("Registration rejected: email already registered");
    session
        .flash(FlashLevel::Danger, "Email already registered!")
        .await?;
    Ok(Redirect::to("/register").into_response())
}

/// Login form
#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    responses(
        (status = 200, description = "Login form", body = crate::schemas::EmptyPage)
    )
)]
#[instrument(skip(session))]
pub async fn login_page(session: SessionContext) -> Result<Response, AppError> {
    render(&session, "login", Empty::default()).await
}

/// Authenticate and establish a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, redirect to /dashboard"),
        (status = 200, description = "Invalid credentials, login form re-rendered", body = crate::schemas::EmptyPage),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: SessionContext,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    trace!("Entering login function");

    // Unknown email and wrong password end in the same message.
    let user = users::find_by_email(&state.db, form.email.trim())
        .await?
        .filter(|user| verify_password(&form.password, &user.password));

    match user {
        Some(user) => {
            session.establish(&user).await?;
            session
                .flash(FlashLevel::Success, format!("Welcome back, {}!", user.name))
                .await?;
            info!("User ID: {} logged in", user.id);
            Ok(Redirect::to("/dashboard").into_response())
        }
        None => {
            warn!("Login failed");
            session
                .flash(FlashLevel::Danger, "Invalid credentials!")
                .await?;
            render(&session, "login", Empty::default()).await
        }
    }
}

/// Clear the session
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 303, description = "Session cleared, redirect to /")
    )
)]
#[instrument(skip(session))]
pub async fn logout(session: SessionContext) -> Result<Response, AppError> {
    session.clear().await?;
    session
        .flash(FlashLevel::Info, "Logged out successfully!")
        .await?;
    info!("User logged out");
    Ok(Redirect::to("/").into_response())
}
