pub mod auth;
pub mod bank;
pub mod dashboard;
pub mod health;
pub mod home;
pub mod products;

use crate::error::AppError;
use crate::schemas::PageView;
use crate::session::SessionContext;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use validator::ValidationError;

/// Render `page` with the signed-in user's name and any queued flashes.
pub(crate) async fn render<T>(session: &SessionContext, page: &str, data: T) -> Result<Response, AppError>
where
    T: Serialize,
{
    let user = session.current_user().await?.map(|user| user.name);
    let flashes = session.take_flashes().await?;
    let view = PageView {
        page: page.to_string(),
        user,
        flashes,
        data,
    };
    Ok(Json(view).into_response())
}

/// Optional form fields arrive as empty strings when left blank.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Required text fields must hold something besides whitespace.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{non_empty, not_blank};

    #[test]
    fn whitespace_only_text_is_blank() {
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("\t\n").is_err());
        assert!(not_blank(" Corn ").is_ok());
    }

    #[test]
    fn blank_optional_fields_become_none() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(Some(" Grains ".to_string())), Some("Grains".to_string()));
    }
}
