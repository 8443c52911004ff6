//! Report Renderer Adapters.
//!
//! - `MarkdownReportRenderer` - Markdown document for download or display

mod markdown_renderer;

pub use markdown_renderer::MarkdownReportRenderer;
