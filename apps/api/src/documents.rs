//! Document intake — multipart uploads and document-to-text extraction.
//!
//! PDFs go through `pdf-extract` on the blocking pool; anything else that is
//! not a known binary office format is decoded as UTF-8 text.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;

const UNSUPPORTED_EXTENSIONS: &[&str] = &[".doc", ".docx", ".odt", ".rtf", ".pages"];

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Could not read text from PDF '{filename}': {message}")]
    Pdf { filename: String, message: String },

    #[error("File '{0}' is not valid UTF-8 text")]
    Encoding(String),

    #[error("Unsupported document type: '{0}'")]
    UnsupportedType(String),
}

/// A file part of a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    fn is_pdf(&self) -> bool {
        self.filename.to_lowercase().ends_with(".pdf")
            || self.content_type.as_deref() == Some("application/pdf")
    }

    fn is_unsupported(&self) -> bool {
        let lower = self.filename.to_lowercase();
        UNSUPPORTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }
}

/// Plain text of an uploaded document.
pub async fn extract_text(file: &UploadedFile) -> Result<String, DocumentError> {
    if file.is_pdf() {
        let data = file.data.clone();
        let filename = file.filename.clone();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
            .await
            .map_err(|e| DocumentError::Pdf {
                filename: filename.clone(),
                message: format!("extraction task failed: {e}"),
            })?
            .map_err(|e| DocumentError::Pdf {
                filename,
                message: format!("{e:?}"),
            })?;
        debug!(filename = %file.filename, chars = text.len(), "Extracted PDF text");
        return Ok(text);
    }

    if file.is_unsupported() {
        return Err(DocumentError::UnsupportedType(file.filename.clone()));
    }

    String::from_utf8(file.data.to_vec()).map_err(|_| DocumentError::Encoding(file.filename.clone()))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart forms
// ────────────────────────────────────────────────────────────────────────────

/// File parts in upload order plus the text fields of a multipart body.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub files: Vec<UploadedFile>,
    pub fields: HashMap<String, String>,
}

pub async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        match filename {
            Some(filename) => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file '{filename}': {e}")))?;
                form.files.push(UploadedFile {
                    field: name,
                    filename,
                    content_type,
                    data,
                });
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid field '{name}': {e}")))?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

// ────────────────────────────────────────────────────────────────────────────
// Resume input: uploaded document or JSON reference
// ────────────────────────────────────────────────────────────────────────────

/// JSON form of a resume: a staged submission or inline text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeReference {
    pub submission_id: Option<Uuid>,
    pub resume_text: Option<String>,
}

#[derive(Debug)]
pub enum ResumeInput {
    Upload(UploadedFile),
    Reference(ResumeReference),
}

/// Accepts `multipart/form-data` (a `file` part, or `submissionId` /
/// `resumeText` text fields) or a JSON `ResumeReference` body.
#[async_trait]
impl<S> FromRequest<S> for ResumeInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Json(reference) = Json::<ResumeReference>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return Ok(ResumeInput::Reference(reference));
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        let mut form = read_form(multipart).await?;

        let file_index = form
            .files
            .iter()
            .position(|f| f.field == "file")
            .or(if form.files.is_empty() { None } else { Some(0) });
        if let Some(index) = file_index {
            return Ok(ResumeInput::Upload(form.files.swap_remove(index)));
        }

        let submission_id = form
            .fields
            .remove("submissionId")
            .map(|raw| {
                raw.trim()
                    .parse::<Uuid>()
                    .map_err(|_| AppError::Validation(format!("Invalid submissionId '{raw}'")))
            })
            .transpose()?;

        Ok(ResumeInput::Reference(ResumeReference {
            submission_id,
            resume_text: form.fields.remove("resumeText"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(filename: &str, content_type: Option<&str>, data: &[u8]) -> UploadedFile {
        UploadedFile {
            field: "file".to_string(),
            filename: filename.to_string(),
            content_type: content_type.map(str::to_string),
            data: Bytes::copy_from_slice(data),
        }
    }

    #[tokio::test]
    async fn test_text_file_decoded_as_utf8() {
        let file = upload("resume.txt", Some("text/plain"), "Jane Doe • Engineer".as_bytes());
        assert_eq!(extract_text(&file).await.unwrap(), "Jane Doe • Engineer");
    }

    #[tokio::test]
    async fn test_invalid_utf8_rejected() {
        let file = upload("resume.txt", None, &[0xff, 0xfe, 0x00]);
        assert!(matches!(extract_text(&file).await, Err(DocumentError::Encoding(_))));
    }

    #[tokio::test]
    async fn test_word_documents_unsupported() {
        let file = upload("Resume.DOCX", None, b"PK\x03\x04");
        assert!(matches!(
            extract_text(&file).await,
            Err(DocumentError::UnsupportedType(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_a_pdf_error() {
        let file = upload("resume.pdf", Some("application/pdf"), b"not really a pdf");
        assert!(matches!(extract_text(&file).await, Err(DocumentError::Pdf { .. })));
    }
}
