use crate::error::AppError;
use crate::schemas::AppState;
use crate::session::SessionSettings;
use ::config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use sea_orm::Database;
use serde::Deserialize;
use tracing::{debug, info};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://agrimart.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// The single settings object the application is configured from.
#[derive(Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    pub session_secret: String,
    /// Mark the session cookie `Secure`; enable when served over HTTPS.
    pub secure_cookies: bool,
}

/// Values given on the command line, which win over every other source.
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub database_url: Option<String>,
    pub bind_address: Option<String>,
}

impl Settings {
    /// Load settings from defaults, an optional `agrimart.toml`, the
    /// environment (after reading `.env`), and finally `overrides`.
    pub fn load(overrides: SettingsOverrides) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let builder = Self::defaults()?
            .add_source(File::with_name("agrimart").required(false))
            .add_source(Environment::default().try_parsing(true));
        Self::from_builder(builder, overrides)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, AppError> {
        Ok(Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("session_secret", "")?
            .set_default("secure_cookies", false)?)
    }

    fn from_builder(
        builder: ConfigBuilder<DefaultState>,
        overrides: SettingsOverrides,
    ) -> Result<Self, AppError> {
        let settings = builder
            .set_override_option("database_url", overrides.database_url)?
            .set_override_option("bind_address", overrides.bind_address)?
            .build()?
            .try_deserialize::<Settings>()?;
        debug!("Settings loaded: {:?}", settings);
        Ok(settings)
    }

    /// Session signing settings; fails when the secret is missing or short.
    pub fn session_settings(&self) -> Result<SessionSettings, AppError> {
        Ok(SessionSettings::from_secret(
            &self.session_secret,
            self.secure_cookies,
        )?)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url)
            .field("bind_address", &self.bind_address)
            .field("session_secret", &"<redacted>")
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

/// Connect to the database and assemble the shared handler state
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState, AppError> {
    let sessions = settings.session_settings()?;

    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;

    Ok(AppState { db, sessions })
}
