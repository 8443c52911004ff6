//! Report query handlers.

mod build_report;
mod render_report;

pub use build_report::{BuildReportHandler, BuildReportQuery};
pub use render_report::{RenderReportHandler, RenderedReport};
