use crate::raster::{invert_colors, scaled_size};
use crate::{
    DocumentHandle, OpenSource, PageSize, PdfEngine, PdfEngineError, RenderRequest, RgbaImage,
};
use pdfium_render::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;

/// Rasterises pages with PDFium.
pub struct PdfiumEngine {
    pdfium: &'static Pdfium,
    next_handle: u64,
    docs: HashMap<DocumentHandle, PdfDocument<'static>>,
}

impl PdfiumEngine {
    /// Binds the PDFium library.
    ///
    /// Search order: the executable's directory (app bundles), the current
    /// directory, then the system library paths.
    pub fn bind() -> Result<Self, PdfEngineError> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|path| path.parent().map(|dir| dir.to_path_buf()));

        let local_dirs = exe_dir.into_iter().chain(std::iter::once(PathBuf::from("./")));

        let bindings = local_dirs
            .filter_map(|dir| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir)).ok()
            })
            .next()
            .map(Ok)
            .unwrap_or_else(Pdfium::bind_to_system_library)
            .map_err(|err| {
                PdfEngineError::Backend(format!("failed to bind pdfium library: {err}"))
            })?;

        // Documents borrow the library for their whole lifetime; the engine
        // lives as long as the process.
        let pdfium: &'static Pdfium = Box::leak(Box::new(Pdfium::new(bindings)));

        Ok(Self { pdfium, next_handle: 0, docs: HashMap::new() })
    }

    fn document(&self, handle: DocumentHandle) -> Result<&PdfDocument<'static>, PdfEngineError> {
        self.docs.get(&handle).ok_or(PdfEngineError::InvalidHandle(handle.raw()))
    }

    fn page(
        &self,
        handle: DocumentHandle,
        page_index: u32,
    ) -> Result<PdfPage<'_>, PdfEngineError> {
        let document = self.document(handle)?;
        let page_count = u32::from(document.pages().len());
        let out_of_range = || PdfEngineError::PageOutOfRange { page: page_index, page_count };

        let index = u16::try_from(page_index).map_err(|_| out_of_range())?;
        document.pages().get(index).map_err(|_| out_of_range())
    }
}

impl PdfEngine for PdfiumEngine {
    fn open(&mut self, source: OpenSource) -> Result<DocumentHandle, PdfEngineError> {
        let loaded = match source {
            OpenSource::Path(path) => self.pdfium.load_pdf_from_file(&path, None),
            OpenSource::Bytes(bytes) => self.pdfium.load_pdf_from_byte_vec(bytes, None),
        };
        let document = loaded.map_err(|err| PdfEngineError::Backend(err.to_string()))?;

        if document.pages().len() == 0 {
            return Err(PdfEngineError::NoPages);
        }
        tracing::debug!(pages = document.pages().len(), "opened document with pdfium");

        self.next_handle += 1;
        let handle = DocumentHandle(self.next_handle);
        self.docs.insert(handle, document);

        Ok(handle)
    }

    fn page_count(&self, handle: DocumentHandle) -> Result<u32, PdfEngineError> {
        Ok(u32::from(self.document(handle)?.pages().len()))
    }

    fn page_size(
        &self,
        handle: DocumentHandle,
        page_index: u32,
    ) -> Result<PageSize, PdfEngineError> {
        let page = self.page(handle, page_index)?;

        Ok(PageSize { width_pt: page.width().value, height_pt: page.height().value })
    }

    fn render_page(
        &self,
        handle: DocumentHandle,
        request: RenderRequest,
    ) -> Result<RgbaImage, PdfEngineError> {
        let page = self.page(handle, request.page_index)?;
        let (width, height) = scaled_size(page.width().value, page.height().value, request.scale);

        let config = PdfRenderConfig::new()
            .set_target_width(width as i32)
            .set_target_height(height as i32);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|err| PdfEngineError::Backend(err.to_string()))?;

        let mut image = RgbaImage::from_raw(
            bitmap.width() as u32,
            bitmap.height() as u32,
            bitmap.as_rgba_bytes().to_vec(),
        )
        .ok_or_else(|| PdfEngineError::Backend("bitmap size mismatch".to_owned()))?;

        if request.invert {
            invert_colors(&mut image);
        }

        Ok(image)
    }

    fn close(&mut self, handle: DocumentHandle) -> Result<(), PdfEngineError> {
        self.docs.remove(&handle).map(|_| ()).ok_or(PdfEngineError::InvalidHandle(handle.raw()))
    }
}
