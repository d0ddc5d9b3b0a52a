use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::settings::{ModelInfo, Settings, AVAILABLE_MODELS, DEFAULT_SYSTEM_PROMPT};
use crate::state::AppState;
use crate::template::{TemplateVariable, TEMPLATE_VARIABLES};

/// GET /api/v1/settings
/// Current record, or the built-in defaults when nothing was saved yet.
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.load().unwrap_or_default())
}

/// PUT /api/v1/settings
/// Wholesale overwrite of the admin record.
pub async fn handle_save_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<StatusCode, AppError> {
    state.settings.save(&settings)?;
    tracing::info!("admin settings saved (model: {})", settings.model);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsMeta {
    pub models: &'static [ModelInfo],
    pub variables: &'static [TemplateVariable],
    pub default_system_prompt: &'static str,
}

/// GET /api/v1/settings/meta
/// Catalogs the admin editor needs: model picker entries, template variables
/// with descriptions, and the default prompt for a reset action.
pub async fn handle_settings_meta() -> Json<SettingsMeta> {
    Json(SettingsMeta {
        models: AVAILABLE_MODELS,
        variables: TEMPLATE_VARIABLES,
        default_system_prompt: DEFAULT_SYSTEM_PROMPT,
    })
}
