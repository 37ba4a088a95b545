//! The downloadable credit improvement report.
//!
//! Content is described as blocks, laid out onto A4 pages by a pure
//! paginator, then written to PDF.

pub mod content;
pub mod layout;
pub mod pdf;

pub use content::{currency, CreditReport, REPORT_TITLE};
pub use layout::{paginate, LaidOutPage, PlacedText};

use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report has no pages to render")]
    Empty,
    #[error("pdf rendering failed: {0}")]
    Pdf(String),
}

/// Builds the personalized report and returns the PDF bytes.
pub fn render_credit_report(name: &str) -> Result<Vec<u8>, ReportError> {
    let report = CreditReport::personalized(name);
    let pages = paginate(&report.blocks);
    let bytes = pdf::render(&report.title(), &pages)?;
    debug!(pages = pages.len(), bytes = bytes.len(), "credit report rendered");
    Ok(bytes)
}
