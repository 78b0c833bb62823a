//! Uploaded résumé documents → plain text.

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("document is not valid UTF-8 text")]
    NotUtf8,

    #[error("document is empty")]
    Empty,
}

/// Kind of document, decided from the declared content type or file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Self {
        let is_pdf_type = content_type
            .map(|ct| ct.eq_ignore_ascii_case("application/pdf"))
            .unwrap_or(false);
        let is_pdf_name = file_name
            .map(|n| n.to_ascii_lowercase().ends_with(".pdf"))
            .unwrap_or(false);

        if is_pdf_type || is_pdf_name {
            DocumentKind::Pdf
        } else {
            DocumentKind::Text
        }
    }
}

/// Decodes document bytes to text. PDF parsing is CPU-bound; call from a blocking task.
pub fn document_text(kind: DocumentKind, data: &Bytes) -> Result<String, DocumentError> {
    if data.is_empty() {
        return Err(DocumentError::Empty);
    }

    let text = match kind {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(data).map_err(|e| DocumentError::Pdf(e.to_string()))?
        }
        DocumentKind::Text => {
            String::from_utf8(data.to_vec()).map_err(|_| DocumentError::NotUtf8)?
        }
    };

    if text.trim().is_empty() {
        return Err(DocumentError::Empty);
    }
    Ok(text)
}
