use crate::error::AppError;
use crate::handlers::render;
use crate::schemas::Empty;
use crate::session::SessionContext;
use axum::response::Response;
use tracing::{instrument, trace};

/// Landing page
#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    responses(
        (status = 200, description = "Landing page", body = crate::schemas::EmptyPage)
    )
)]
#[instrument(skip(session))]
pub async fn home(session: SessionContext) -> Result<Response, AppError> {
    trace!("Rendering landing page");
    render(&session, "index", Empty::default()).await
}
