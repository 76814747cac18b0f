pub mod layout;
pub mod orchestrator;
pub mod sanitize;
pub mod types;

pub use layout::*;
pub use orchestrator::*;
pub use sanitize::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Cannot open document: {0}")]
    DocumentOpen(String),

    #[error("Page {page} render failed: {reason}")]
    PageRender { page: usize, reason: String },

    #[error("Text recognition failed on page {page}: {reason}")]
    Recognition { page: usize, reason: String },
}
