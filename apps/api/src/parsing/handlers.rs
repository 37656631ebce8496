//! Axum route handlers for resume submission and staged-result retrieval,
//! plus the resume resolution shared by the matching and authenticity routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::documents::{extract_text, ResumeInput, ResumeReference, UploadedFile};
use crate::errors::AppError;
use crate::parsing::models::{Resume, TokenSequence};
use crate::parsing::pipeline::ParsedResume;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub submission_id: Uuid,
    pub staged_at: DateTime<Utc>,
    pub resume: Resume,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/submit
///
/// Parses an uploaded document (multipart `file`) or JSON `resumeText`,
/// stages the tokens and canonical resume, and returns the submission id.
pub async fn handle_submit(
    State(state): State<AppState>,
    input: ResumeInput,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let text = match input {
        ResumeInput::Upload(file) => document_text(&file).await?,
        ResumeInput::Reference(ResumeReference {
            resume_text: Some(text),
            ..
        }) => text,
        ResumeInput::Reference(_) => {
            return Err(AppError::Validation(
                "Provide a resume file or resumeText".to_string(),
            ))
        }
    };

    let parsed = parse_text(&state, text).await?;
    let submission_id = state.staging.store(&parsed).await?;

    info!(
        %submission_id,
        skills = parsed.resume.skills.len(),
        experience = parsed.resume.experience.len(),
        "Resume submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            submission_id,
            staged_at: Utc::now(),
            resume: parsed.resume,
        }),
    ))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(submission_id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    Ok(Json(state.staging.load_resume(submission_id).await?))
}

/// GET /api/v1/resumes/:id/tokens
///
/// The tokenized intermediate output of a submission.
pub async fn handle_get_tokens(
    State(state): State<AppState>,
    Path(submission_id): Path<Uuid>,
) -> Result<Json<TokenSequence>, AppError> {
    Ok(Json(state.staging.load_tokens(submission_id).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared resolution
// ────────────────────────────────────────────────────────────────────────────

/// Runs the CPU-bound parse on the blocking pool.
pub async fn parse_text(state: &AppState, text: String) -> Result<ParsedResume, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Resume text cannot be empty".to_string()));
    }

    let parser = state.parser.clone();
    tokio::task::spawn_blocking(move || parser.parse(&text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in resume parsing: {e}")))
}

/// Text of an uploaded document; documents with no extractable text are rejected.
pub async fn document_text(file: &UploadedFile) -> Result<String, AppError> {
    let text = extract_text(file).await?;
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "No text could be extracted from '{}'",
            file.filename
        )));
    }
    Ok(text)
}

/// A canonical resume from an upload, a staged submission or inline text.
pub async fn resolve_resume(state: &AppState, input: ResumeInput) -> Result<Resume, AppError> {
    match input {
        ResumeInput::Upload(file) => {
            let text = document_text(&file).await?;
            Ok(parse_text(state, text).await?.resume)
        }
        ResumeInput::Reference(reference) => resolve_reference(state, reference).await,
    }
}

/// A staged submission wins over inline text when both are given.
pub async fn resolve_reference(
    state: &AppState,
    reference: ResumeReference,
) -> Result<Resume, AppError> {
    match reference {
        ResumeReference {
            submission_id: Some(id),
            ..
        } => state.staging.load_resume(id).await,
        ResumeReference {
            resume_text: Some(text),
            ..
        } => Ok(parse_text(state, text).await?.resume),
        _ => Err(AppError::Validation(
            "Provide either submissionId or resumeText".to_string(),
        )),
    }
}
