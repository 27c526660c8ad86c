//! Rendering collaborator for the reader: opens the mushaf PDF, reports its
//! page geometry and rasterises single pages, inverted for dark mode.

use std::path::{Path, PathBuf};

mod lopdf_backend;
#[cfg(feature = "pdfium")]
pub mod pdfium_backend;
pub mod raster;

pub use lopdf_backend::LopdfEngine;

/// 8-bit RGBA raster of one page.
pub type RgbaImage = image::RgbaImage;

/// Opaque id of a document opened by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentHandle(u64);

impl DocumentHandle {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Page dimensions in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

/// One page raster. `page_index` is 0-based; `scale` is pixels per point;
/// `invert` produces the dark-mode rendition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub page_index: u32,
    pub scale: f32,
    pub invert: bool,
}

impl RenderRequest {
    pub fn page(page_index: u32, scale: f32, invert: bool) -> Self {
        Self { page_index, scale, invert }
    }
}

#[derive(Debug, Clone)]
pub enum OpenSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl From<&Path> for OpenSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for OpenSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for OpenSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PdfEngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF parse error: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("document handle {0} is not open")]
    InvalidHandle(u64),
    #[error("page {page} out of range (page_count={page_count})")]
    PageOutOfRange { page: u32, page_count: u32 },
    #[error("encrypted PDFs are not supported in the default backend")]
    EncryptedUnsupported,
    #[error("document has no pages")]
    NoPages,
    #[error("backend error: {0}")]
    Backend(String),
}

/// What the reader needs from a PDF library.
pub trait PdfEngine {
    fn open(&mut self, source: OpenSource) -> Result<DocumentHandle, PdfEngineError>;
    fn page_count(&self, handle: DocumentHandle) -> Result<u32, PdfEngineError>;
    fn page_size(
        &self,
        handle: DocumentHandle,
        page_index: u32,
    ) -> Result<PageSize, PdfEngineError>;
    fn render_page(
        &self,
        handle: DocumentHandle,
        request: RenderRequest,
    ) -> Result<RgbaImage, PdfEngineError>;
    fn close(&mut self, handle: DocumentHandle) -> Result<(), PdfEngineError>;
}

/// Engine for headless use: page geometry only, blank rasters.
pub fn default_engine() -> LopdfEngine {
    LopdfEngine::new()
}

/// The engine the desktop reader draws with: pdfium when compiled in,
/// otherwise the geometry-only engine.
pub fn preferred_engine() -> Result<Box<dyn PdfEngine>, PdfEngineError> {
    #[cfg(feature = "pdfium")]
    {
        Ok(Box::new(pdfium_backend::PdfiumEngine::bind()?))
    }

    #[cfg(not(feature = "pdfium"))]
    {
        tracing::warn!("built without pdfium; pages render blank");
        Ok(Box::new(default_engine()))
    }
}
