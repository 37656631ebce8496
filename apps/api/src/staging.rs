//! Staging — per-submission directories holding intermediate pipeline output.
//!
//! Layout: `<root>/<submission id>/{resume.json, tokens.json}`. Every file is
//! written to a temp file in the target directory and persisted with a rename,
//! so readers never observe a partial document.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::parsing::models::{Resume, TokenSequence};
use crate::parsing::pipeline::ParsedResume;

const RESUME_FILE: &str = "resume.json";
const TOKENS_FILE: &str = "tokens.json";

#[derive(Debug, Clone)]
pub struct Staging {
    root: PathBuf,
}

impl Staging {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stages a parse under a fresh submission id.
    pub async fn store(&self, parsed: &ParsedResume) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let dir = self.root.join(id.to_string());
        let resume = serde_json::to_vec_pretty(&parsed.resume).context("serializing resume")?;
        let tokens = serde_json::to_vec(&parsed.tokens).context("serializing tokens")?;

        tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating staging directory {}", dir.display()))?;
            write_atomic(&dir, RESUME_FILE, &resume)?;
            write_atomic(&dir, TOKENS_FILE, &tokens)?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in staging: {e}")))??;

        debug!(submission_id = %id, "Staged parsed resume");
        Ok(id)
    }

    pub async fn load_resume(&self, id: Uuid) -> Result<Resume, AppError> {
        self.load(id, RESUME_FILE).await
    }

    pub async fn load_tokens(&self, id: Uuid) -> Result<TokenSequence, AppError> {
        self.load(id, TOKENS_FILE).await
    }

    async fn load<T: DeserializeOwned>(&self, id: Uuid, file: &str) -> Result<T, AppError> {
        let path = self.root.join(id.to_string()).join(file);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!("Submission {id} not found")));
            }
            Err(e) => {
                return Err(AppError::Internal(
                    anyhow::Error::new(e).context(format!("reading {}", path.display())),
                ))
            }
        };

        let value = serde_json::from_slice(&bytes)
            .with_context(|| format!("decoding staged {}", path.display()))?;
        Ok(value)
    }
}

fn write_atomic(dir: &Path, name: &str, contents: &[u8]) -> anyhow::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(dir.join(name))
        .with_context(|| format!("persisting {name}"))?;
    Ok(())
}
