//! Document context: the full text of one PDF, read on every call.
//!
//! No caching and no chunking; the whole text goes into the prompt.

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error_handler::DocumentError;

/// Source of the document context text.
///
/// [`PdfDocument`] is the production implementation; tests plug in fixed text.
pub trait DocumentSource: Send + Sync {
    /// Loads the full plain text of the document.
    fn load_text(&self) -> impl Future<Output = Result<String, DocumentError>> + Send;
}

/// PDF file on disk, extracted with `pdf-extract`.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    path: PathBuf,
}

impl PdfDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for PdfDocument {
    async fn load_text(&self) -> Result<String, DocumentError> {
        debug!(path = %self.path.display(), "reading document");

        let bytes = tokio::fs::read(&self.path).await.map_err(|source| {
            warn!(path = %self.path.display(), error = %source, "document read failed");
            DocumentError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        // Parsing is CPU-bound; keep it off the async workers.
        let path = self.path.clone();
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| DocumentError::Extract {
                path,
                reason: e.to_string(),
            })
        })
        .await??;

        info!(
            path = %self.path.display(),
            chars = text.chars().count(),
            "document text extracted"
        );
        Ok(text)
    }
}
