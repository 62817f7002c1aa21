//! File Text Extractor — turns an uploaded resume document into plain text.
//!
//! Dispatch is by MIME type: PDF, DOCX and plain text are supported, anything
//! else is rejected before a single byte is parsed. Parsing is CPU-bound and
//! must run inside `tokio::task::spawn_blocking` (see [`extract_blocking`]).

pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod text;
pub mod upload;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TXT_MIME: &str = "text/plain";

pub const UNSUPPORTED_FILE_MESSAGE: &str =
    "Unsupported file type. Please upload a PDF, DOCX, or TXT file.";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{}", UNSUPPORTED_FILE_MESSAGE)]
    UnsupportedType { mime: String },

    #[error("This PDF is password-protected. Please upload an unprotected copy.")]
    EncryptedPdf,

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),
}

/// The document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Docx,
    Txt,
}

impl FileKind {
    /// Maps a MIME type to a kind. Parameters (`; charset=...`) and case are ignored.
    pub fn from_mime(mime: &str) -> Result<Self, ExtractError> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MIME => Ok(FileKind::Pdf),
            DOCX_MIME => Ok(FileKind::Docx),
            TXT_MIME => Ok(FileKind::Txt),
            _ => Err(ExtractError::UnsupportedType {
                mime: mime.to_string(),
            }),
        }
    }

    pub fn from_extension(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "docx" => Some(FileKind::Docx),
            "txt" => Some(FileKind::Txt),
            _ => None,
        }
    }

    /// Resolves the kind of an upload.
    ///
    /// The declared content type always wins. The file extension is only
    /// consulted when the client sent no content type at all, so an explicit
    /// `image/png` is rejected even if the file is named `resume.pdf`.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Result<Self, ExtractError> {
        match content_type.map(str::trim).filter(|ct| !ct.is_empty()) {
            Some(ct) => Self::from_mime(ct),
            None => file_name
                .and_then(Self::from_extension)
                .ok_or_else(|| ExtractError::UnsupportedType {
                    mime: String::new(),
                }),
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            FileKind::Pdf => PDF_MIME,
            FileKind::Docx => DOCX_MIME,
            FileKind::Txt => TXT_MIME,
        }
    }
}

/// Plain text pulled out of a document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedText {
    pub text: String,
    pub file_kind: FileKind,
    /// Only known for PDFs.
    pub page_count: Option<usize>,
}

impl ExtractedText {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extracts text from `bytes` according to `kind`. No retries.
pub fn extract(kind: FileKind, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
    match kind {
        FileKind::Pdf => pdf::extract_pdf(bytes),
        FileKind::Docx => docx::extract_docx(bytes),
        FileKind::Txt => Ok(text::extract_txt(bytes)),
    }
}

/// Runs [`extract`] on the blocking thread pool.
pub async fn extract_blocking(kind: FileKind, bytes: Bytes) -> Result<ExtractedText, AppError> {
    let size = bytes.len();
    let extracted = tokio::task::spawn_blocking(move || extract(kind, &bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

    if extracted.is_blank() {
        warn!(mime = kind.mime(), bytes = size, "Document contained no extractable text");
    }
    info!(
        mime = kind.mime(),
        bytes = size,
        chars = extracted.char_count(),
        pages = ?extracted.page_count,
        "Extracted resume text"
    );
    Ok(extracted)
}
