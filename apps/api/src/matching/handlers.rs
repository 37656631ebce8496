//! Axum route handlers for resume / job-description comparison.

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::documents::{read_form, ResumeReference};
use crate::errors::AppError;
use crate::matching::{MatchResult, SimilarityEngine};
use crate::parsing::models::Resume;
use crate::parsing::handlers::{document_text, parse_text, resolve_reference};
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    #[serde(flatten)]
    pub resume: ResumeReference,
    #[serde(default)]
    pub job_description: String,
}

/// One row of a batch comparison. Files that could not be read carry an
/// `error` instead of match fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub filename: String,
    #[serde(flatten)]
    pub result: Option<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/compare
///
/// Scores a staged submission or inline resume text against a job description.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let job_description = require_job_description(Some(request.job_description))?;
    let resume = resolve_reference(&state, request.resume).await?;

    let result = compare_blocking(state.engine.clone(), resume, job_description).await?;

    info!(
        similarity_score = result.similarity_score,
        missing = result.missing_job_skills.len(),
        "Resume compared"
    );

    Ok(Json(result))
}

/// POST /api/v1/resumes/batch
///
/// Multipart: any number of resume files plus a `jobDescription` text field.
/// Files are processed sequentially; results keep upload order.
pub async fn handle_batch(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<BatchEntry>>, AppError> {
    let mut form = read_form(multipart).await?;
    let job_description = require_job_description(form.fields.remove(JOB_DESCRIPTION_FIELD))?;

    if form.files.is_empty() {
        return Err(AppError::Validation("No resume files provided".to_string()));
    }

    let mut entries = Vec::with_capacity(form.files.len());
    for file in &form.files {
        let outcome = match document_text(file).await {
            Ok(text) => parse_text(&state, text).await,
            Err(e) => Err(e),
        };

        let entry = match outcome {
            Ok(parsed) => {
                let result =
                    compare_blocking(state.engine.clone(), parsed.resume, job_description.clone())
                        .await?;
                BatchEntry {
                    filename: file.filename.clone(),
                    result: Some(result),
                    error: None,
                }
            }
            Err(AppError::Internal(e)) => return Err(AppError::Internal(e)),
            Err(e) => {
                warn!(filename = %file.filename, error = %e, "Skipping unreadable resume in batch");
                BatchEntry {
                    filename: file.filename.clone(),
                    result: None,
                    error: Some(e.to_string()),
                }
            }
        };
        entries.push(entry);
    }

    info!(files = entries.len(), "Batch comparison complete");

    Ok(Json(entries))
}

/// Embedding every skill pair is CPU-bound, so comparison runs off the async workers.
async fn compare_blocking(
    engine: Arc<SimilarityEngine>,
    resume: Resume,
    job_description: String,
) -> Result<MatchResult, AppError> {
    tokio::task::spawn_blocking(move || engine.compare(&resume, &job_description))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in comparison: {e}")))
}

fn require_job_description(job_description: Option<String>) -> Result<String, AppError> {
    match job_description {
        Some(jd) if !jd.trim().is_empty() => Ok(jd),
        _ => Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        )),
    }
}
