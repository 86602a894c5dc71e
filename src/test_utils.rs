#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use crate::session::SessionSettings;
    use axum_test::TestServer;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub const TEST_SESSION_SECRET: &str = "test-session-secret-with-enough-bytes-to-sign";

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;
        let sessions = SessionSettings::from_secret(TEST_SESSION_SECRET, false)
            .expect("Failed to build session settings");

        AppState { db, sessions }
    }

    /// Install a process-wide STDERR subscriber for tests, once.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set. Later calls are no-ops.
    pub fn init_test_tracing() {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        // Fails only when a global subscriber is already installed
        let _ = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    }

    /// Create a cookie-keeping test server plus a handle on its database
    pub async fn setup_test_server() -> (TestServer, DatabaseConnection) {
        init_test_tracing();

        let state = setup_test_app_state().await;
        let db = state.db.clone();
        let mut server = TestServer::new(create_router(state)).expect("Failed to start test server");
        server.do_save_cookies();
        (server, db)
    }
}
