//! HTTP server setup and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{self, ApiDoc};
use crate::config::AppConfig;
use crate::database::FormStore;
use crate::logging::OpTimer;
use crate::{log_banner, log_init_step, log_success, AppState};

/// Formdeck API version (from Cargo.toml).
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create the application with all routes and middleware.
pub async fn create_app(config: AppConfig) -> anyhow::Result<Router> {
    // Start overall timer
    let overall_timer = OpTimer::new("server", "create_app");

    // Log startup banner
    log_banner!(
        format!("Formdeck API v{VERSION}"),
        format!("Database: {}", config.database.path.display())
    );

    // [1/2] Open the form store (creates the schema on first run)
    let step_timer = OpTimer::new("server", "form_store");
    let store_result = FormStore::new(&config.database.path).await;
    step_timer.finish_with_result(store_result.as_ref());
    let store = store_result?;
    log_init_step!(
        1,
        2,
        "Form Store",
        format!("SQLite at {}", config.database.path.display())
    );

    // Create app state
    let state = AppState {
        config: Arc::new(config.clone()),
        store,
    };

    // [2/2] Build the router with middleware
    let step_timer = OpTimer::new("server", "router");
    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api::create_router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    log_init_step!(2, 2, "Router", "Routes + middleware configured");
    step_timer.finish();

    // Log success banner
    overall_timer.finish();
    log_success!("Formdeck API server created successfully");

    Ok(app)
}
