use crate::error::AppError;
use crate::handlers::render;
use crate::schemas::AppState;
use crate::session::{FlashLevel, SessionContext};
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use model::entities::bank_detail;
use model::store::bank_details::{self, BankDetailInput};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

const LOGIN_REQUIRED: &str = "Please login to access bank details.";

/// Bank details form fields
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct BankDetailForm {
    #[serde(default)]
    #[validate(custom(function = "crate::handlers::not_blank"))]
    pub account_holder_name: String,
    #[serde(default)]
    #[validate(custom(function = "crate::handlers::not_blank"))]
    pub account_number: String,
    /// Bank routing code
    #[serde(default)]
    #[validate(custom(function = "crate::handlers::not_blank"))]
    pub ifsc_code: String,
}

/// Bank details response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BankDetailResponse {
    pub id: i32,
    pub user_id: i32,
    pub account_holder_name: String,
    pub account_number: String,
    pub ifsc_code: String,
}

impl From<bank_detail::Model> for BankDetailResponse {
    fn from(model: bank_detail::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            account_holder_name: model.account_holder_name,
            account_number: model.account_number,
            ifsc_code: model.ifsc_code,
        }
    }
}

/// Data for the bank details view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BankPage {
    /// The saved record used to pre-fill the form, if any
    pub bank: Option<BankDetailResponse>,
}

/// Bank details form, pre-filled when a record exists
#[utoipa::path(
    get,
    path = "/bank",
    tag = "bank",
    responses(
        (status = 200, description = "Bank details form", body = crate::schemas::BankView),
        (status = 303, description = "Not logged in, redirect to /login")
    )
)]
#[instrument(skip(state, session))]
pub async fn bank_page(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Response, AppError> {
    let Some(user) = session.require_login(LOGIN_REQUIRED).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let bank = bank_details::find_for_user(&state.db, user.id).await?;
    debug!("Existing bank details for user ID {}: {}", user.id, bank.is_some());
    render(
        &session,
        "bank_details",
        BankPage {
            bank: bank.map(BankDetailResponse::from),
        },
    )
    .await
}

/// Create or overwrite the signed-in user's bank details
#[utoipa::path(
    post,
    path = "/bank",
    tag = "bank",
    request_body(content = BankDetailForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Saved, redirect to /dashboard; or not logged in, redirect to /login"),
        (status = 200, description = "Incomplete form re-rendered", body = crate::schemas::BankView),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, session, form))]
pub async fn save_bank_details(
    State(state): State<AppState>,
    session: SessionContext,
    Form(form): Form<BankDetailForm>,
) -> Result<Response, AppError> {
    trace!("Entering save_bank_details function");
    let Some(user) = session.require_login(LOGIN_REQUIRED).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    if let Err(errors) = form.validate() {
        debug!("Bank details form incomplete: {}", errors);
        session
            .flash(FlashLevel::Warning, "Please fill in all bank detail fields!")
            .await?;
        let bank = bank_details::find_for_user(&state.db, user.id).await?;
        return render(
            &session,
            "bank_details",
            BankPage {
                bank: bank.map(BankDetailResponse::from),
            },
        )
        .await;
    }

    let input = BankDetailInput {
        account_holder_name: form.account_holder_name.trim().to_string(),
        account_number: form.account_number.trim().to_string(),
        ifsc_code: form.ifsc_code.trim().to_string(),
    };
    let saved = bank_details::upsert(&state.db, user.id, input).await?;
    info!("Bank details ID: {} saved for user ID: {}", saved.id, user.id);

    session
        .flash(FlashLevel::Success, "Bank details saved successfully!")
        .await?;
    Ok(Redirect::to("/dashboard").into_response())
}
