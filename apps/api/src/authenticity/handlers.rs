use axum::{extract::State, Json};
use tracing::info;

use crate::authenticity::AuthenticityReport;
use crate::documents::ResumeInput;
use crate::errors::AppError;
use crate::parsing::handlers::resolve_resume;
use crate::state::AppState;

/// POST /api/v1/resumes/authenticity
///
/// Accepts an uploaded document, a staged `submissionId`, or inline `resumeText`.
pub async fn handle_authenticity(
    State(state): State<AppState>,
    input: ResumeInput,
) -> Result<Json<AuthenticityReport>, AppError> {
    let resume = resolve_resume(&state, input).await?;
    let report = state.checker.check(&resume).await;

    info!(
        backend = state.checker.detector_backend(),
        authenticity_score = report.authenticity_score,
        flags = report.authenticity_flags.len(),
        "Authenticity checked"
    );

    Ok(Json(report))
}
