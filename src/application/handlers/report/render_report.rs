//! RenderReportHandler - Builds a snapshot and hands it to the renderer.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::ReportRenderer;

use super::{BuildReportHandler, BuildReportQuery};

/// A rendered report document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct RenderReportHandler {
    builder: BuildReportHandler,
    renderer: Arc<dyn ReportRenderer>,
}

impl RenderReportHandler {
    pub fn new(builder: BuildReportHandler, renderer: Arc<dyn ReportRenderer>) -> Self {
        Self { builder, renderer }
    }

    /// # Errors
    /// Snapshot errors as for [`BuildReportHandler`], or `RenderFailed`.
    pub async fn handle(
        &self,
        query: BuildReportQuery,
        now: Timestamp,
    ) -> Result<RenderedReport, DomainError> {
        let snapshot = self.builder.handle(query, now).await?;
        let bytes = self.renderer.render(&snapshot)?;

        tracing::debug!(
            username = %snapshot.profile.username,
            bytes = bytes.len(),
            "Report rendered"
        );
        Ok(RenderedReport {
            content_type: self.renderer.content_type(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::report::MarkdownReportRenderer;
    use crate::adapters::storage::InMemoryStore;
    use crate::domain::foundation::{ErrorCode, Username};
    use crate::domain::report::ReportSnapshot;
    use crate::domain::user::UserDirectory;
    use crate::ports::{RenderError, UserStore};

    struct FailingRenderer;

    impl ReportRenderer for FailingRenderer {
        fn content_type(&self) -> &'static str {
            "application/pdf"
        }

        fn render(&self, _snapshot: &ReportSnapshot) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::Failed("font missing".to_string()))
        }
    }

    async fn builder() -> BuildReportHandler {
        let store = Arc::new(InMemoryStore::<UserDirectory>::new());
        store
            .register(Username::new("river").unwrap(), "pw", "r@example.com", Timestamp::now())
            .await
            .unwrap();
        BuildReportHandler::new(store)
    }

    fn query() -> BuildReportQuery {
        BuildReportQuery {
            username: "river".to_string(),
            from: None,
            to: None,
        }
    }

    #[tokio::test]
    async fn renders_markdown() {
        let handler = RenderReportHandler::new(builder().await, Arc::new(MarkdownReportRenderer::new()));
        let report = handler.handle(query(), Timestamp::now()).await.unwrap();
        assert_eq!(report.content_type, "text/markdown");
        assert!(String::from_utf8(report.bytes).unwrap().contains("river"));
    }

    #[tokio::test]
    async fn renderer_failure_maps_to_render_failed() {
        let handler = RenderReportHandler::new(builder().await, Arc::new(FailingRenderer));
        let err = handler.handle(query(), Timestamp::now()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::RenderFailed);
    }
}
