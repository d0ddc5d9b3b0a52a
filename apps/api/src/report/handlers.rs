use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::form::FormRecord;
use crate::report::{self, ReportMode};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub report: String,
    pub mode: ReportMode,
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/reports
/// Validates the submission before any settings read or upstream activity,
/// then generates the report with call-time settings.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    Json(record): Json<FormRecord>,
) -> Result<Json<ReportResponse>, AppError> {
    record.validate()?;

    let settings = state.settings.load().unwrap_or_default();
    let outcome = report::generate(&record, &settings, &state.llm).await;

    Ok(Json(ReportResponse {
        report: outcome.report,
        mode: outcome.mode,
        generated_at: Utc::now(),
    }))
}
