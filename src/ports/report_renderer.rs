//! Report Renderer Port - turns a report snapshot into a document.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::report::ReportSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to render report: {0}")]
    Failed(String),
}

impl From<RenderError> for DomainError {
    fn from(err: RenderError) -> Self {
        DomainError::new(ErrorCode::RenderFailed, err.to_string())
    }
}

/// Port for rendering report documents.
pub trait ReportRenderer: Send + Sync {
    /// MIME type of the produced document.
    fn content_type(&self) -> &'static str;

    /// Renders the snapshot into document bytes.
    fn render(&self, snapshot: &ReportSnapshot) -> Result<Vec<u8>, RenderError>;
}
