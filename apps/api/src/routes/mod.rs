pub mod health;
pub mod proxy;

use axum::{
    routing::{get, post},
    Router,
};

use crate::report;
use crate::settings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Report generation
        .route("/api/v1/reports", post(report::handlers::handle_generate_report))
        // Admin settings
        .route(
            "/api/v1/settings",
            get(settings::handlers::handle_get_settings)
                .put(settings::handlers::handle_save_settings),
        )
        .route("/api/v1/settings/meta", get(settings::handlers::handle_settings_meta))
        // Credential-injecting pass-through for browser clients
        .route("/api/openrouter", post(proxy::handle_proxy))
        .with_state(state)
}
