use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// A rasterized page handed to the recognizer.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub page_index: usize,
    /// Page size in points.
    pub width: f32,
    pub height: f32,
    /// Encoded image, format agreed between renderer and recognizer.
    pub bytes: Vec<u8>,
}

/// Bounding box normalized to 0..1, origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One recognized text fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObservation {
    pub text: String,
    pub confidence: f32,
    pub bounding_box: BoundingBox,
}

/// Recognition result of one page, stored in the page-indexed slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecognition {
    pub page_index: usize,
    pub width: f32,
    pub height: f32,
    pub observations: Vec<TextObservation>,
}

impl PageRecognition {
    /// Slot of a page whose render or recognition failed.
    pub fn empty(page_index: usize) -> Self {
        Self {
            page_index,
            width: 0.0,
            height: 0.0,
            observations: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Source document: a PDF, or a single camera image exposed as one page.
pub trait PageRenderer: Send + Sync {
    fn page_count(&self) -> Result<usize, ExtractionError>;

    fn render_page(&self, page_index: usize) -> Result<PageImage, ExtractionError>;
}

/// OCR engine abstraction (allows mocking for tests).
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, page: &PageImage) -> Result<Vec<TextObservation>, ExtractionError>;
}
