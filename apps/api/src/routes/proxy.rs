use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use crate::llm_client::LlmError;
use crate::state::AppState;

/// POST /api/openrouter
/// Pass-through for browser clients: accepts a chat-completion request body,
/// injects the server-side credential, and returns the upstream JSON body
/// verbatim. Pre-flight OPTIONS is answered by the CORS layer; other methods
/// get 405 from the router.
pub async fn handle_proxy(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let Some(api_key) = state.config.openrouter_api_key.as_deref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "API-Schlüssel nicht konfiguriert" })),
        )
            .into_response();
    };

    match state.llm.forward(api_key, &body).await {
        Ok(upstream) => (StatusCode::OK, Json(upstream)).into_response(),
        Err(e) => {
            error!("OpenRouter API error: {e}");
            let details = match &e {
                LlmError::Api { message, .. } => message.clone(),
                other => other.to_string(),
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Fehler bei der Kommunikation mit dem KI-Service",
                    "details": details
                })),
            )
                .into_response()
        }
    }
}
