//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps a `tower_sessions::Session` so handlers only deal with marketplace
//! operations: establishing the signed-in identity, gating routes on it, and
//! queueing flash messages for the next rendered page.

use crate::error::AppError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use model::entities::user::{self, Role};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use tower_sessions::{cookie::Key, Session};
use tracing::{debug, info, warn};
use utoipa::ToSchema;

pub(crate) const USER_KEY: &str = "user";
pub(crate) const FLASHES_KEY: &str = "_flashes";
pub(crate) const COOKIE_NAME: &str = "agrimart.sid";

/// Shortest secret accepted for signing session cookies.
pub const MIN_SECRET_LEN: usize = 32;

/// The identity carried by an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub name: String,
    pub role: Role,
}

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Cookie signing settings derived from the configured secret.
#[derive(Clone)]
pub struct SessionSettings {
    pub key: Key,
    pub secure: bool,
}

impl SessionSettings {
    /// Derive the 64-byte signing key from an arbitrary-length secret.
    pub fn from_secret(secret: &str, secure: bool) -> Result<Self, ::config::ConfigError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(::config::ConfigError::Message(format!(
                "session_secret must be at least {} bytes long",
                MIN_SECRET_LEN
            )));
        }
        let digest = Sha512::digest(secret.as_bytes());
        Ok(Self {
            key: Key::from(digest.as_slice()),
            secure,
        })
    }
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("key", &"<redacted>")
            .field("secure", &self.secure)
            .finish()
    }
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone, Debug)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record a successful login. The session id is rotated first so a
    /// pre-login cookie never carries an authenticated identity.
    pub async fn establish(&self, user: &user::Model) -> Result<(), AppError> {
        self.0.cycle_id().await?;
        let identity = SessionUser {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
        };
        self.0.insert(USER_KEY, identity).await?;
        info!("Session established for user ID: {}", user.id);
        Ok(())
    }

    /// Drop everything held in the session, flashes included.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.0.flush().await?;
        debug!("Session cleared");
        Ok(())
    }

    pub async fn current_user(&self) -> Result<Option<SessionUser>, AppError> {
        Ok(self.0.get::<SessionUser>(USER_KEY).await?)
    }

    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        Ok(self.current_user().await?.is_some())
    }

    pub async fn current_role(&self) -> Result<Option<Role>, AppError> {
        Ok(self.current_user().await?.map(|user| user.role))
    }

    /// Return the signed-in user, or queue `message` as a warning and return
    /// `None` so the caller can redirect to the login page.
    pub async fn require_login(&self, message: &str) -> Result<Option<SessionUser>, AppError> {
        match self.current_user().await? {
            Some(user) => Ok(Some(user)),
            None => {
                warn!("Unauthenticated access rejected");
                self.flash(FlashLevel::Warning, message).await?;
                Ok(None)
            }
        }
    }

    /// Check the signed-in user's role, queueing `message` as a danger flash
    /// when it does not match.
    pub async fn require_role(
        &self,
        user: &SessionUser,
        role: Role,
        message: &str,
    ) -> Result<bool, AppError> {
        if user.role == role {
            return Ok(true);
        }
        warn!(
            "User ID {} with role {} denied access requiring {}",
            user.id, user.role, role
        );
        self.flash(FlashLevel::Danger, message).await?;
        Ok(false)
    }

    pub async fn flash(&self, level: FlashLevel, message: impl Into<String>) -> Result<(), AppError> {
        let mut flashes = self
            .0
            .get::<Vec<Flash>>(FLASHES_KEY)
            .await?
            .unwrap_or_default();
        flashes.push(Flash {
            level,
            message: message.into(),
        });
        self.0.insert(FLASHES_KEY, flashes).await?;
        Ok(())
    }

    /// Drain the queued flash messages.
    pub async fn take_flashes(&self) -> Result<Vec<Flash>, AppError> {
        Ok(self
            .0
            .remove::<Vec<Flash>>(FLASHES_KEY)
            .await?
            .unwrap_or_default())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        Ok(SessionContext::new(session))
    }
}
