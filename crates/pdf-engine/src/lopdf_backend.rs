use crate::raster::{invert_colors, scaled_size};
use crate::{
    DocumentHandle, OpenSource, PageSize, PdfEngine, PdfEngineError, RenderRequest, RgbaImage,
};
use image::Rgba;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use std::fs;

/// Used when neither a page nor its ancestors declare a MediaBox.
const US_LETTER: PageSize = PageSize { width_pt: 612.0, height_pt: 792.0 };

/// Bound on `/Parent` hops so a cyclic page tree cannot loop forever.
const MAX_TREE_DEPTH: usize = 32;

const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FRAME: Rgba<u8> = Rgba([220, 220, 220, 255]);

/// Reads page geometry with lopdf and draws blank, framed pages of the right
/// size. Used by the CLI and in tests, where no rasteriser is linked.
#[derive(Debug, Default)]
pub struct LopdfEngine {
    next_handle: u64,
    open: HashMap<DocumentHandle, Vec<PageSize>>,
}

impl LopdfEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn pages(&self, handle: DocumentHandle) -> Result<&[PageSize], PdfEngineError> {
        self.open
            .get(&handle)
            .map(Vec::as_slice)
            .ok_or(PdfEngineError::InvalidHandle(handle.raw()))
    }
}

fn is_encrypted(bytes: &[u8]) -> bool {
    const MARKER: &[u8] = b"/Encrypt";
    bytes.windows(MARKER.len()).any(|window| window == MARKER)
}

fn read_geometry(bytes: &[u8]) -> Result<Vec<PageSize>, PdfEngineError> {
    if is_encrypted(bytes) {
        return Err(PdfEngineError::EncryptedUnsupported);
    }

    let document = Document::load_mem(bytes)?;
    let sizes: Vec<PageSize> = document
        .get_pages()
        .into_values()
        .map(|page_id| media_box(&document, page_id).unwrap_or(US_LETTER))
        .collect();

    if sizes.is_empty() {
        return Err(PdfEngineError::NoPages);
    }

    Ok(sizes)
}

/// The page's MediaBox, inherited from the nearest page-tree ancestor when
/// the page itself has none.
fn media_box(document: &Document, page_id: ObjectId) -> Option<PageSize> {
    let mut node: &Dictionary = document.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(rect) = node.get(b"MediaBox").and_then(|value| value.as_array()) {
            return rect_size(rect);
        }

        let parent = node.get(b"Parent").and_then(|value| value.as_reference()).ok()?;
        node = document.get_dictionary(parent).ok()?;
    }

    None
}

fn rect_size(rect: &[Object]) -> Option<PageSize> {
    let [x0, y0, x1, y1] = rect else {
        return None;
    };
    let coord = |value: &Object| value.as_float().ok();

    Some(PageSize {
        width_pt: (coord(x1)? - coord(x0)?).abs(),
        height_pt: (coord(y1)? - coord(y0)?).abs(),
    })
}

fn blank_page(width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, PAPER);
    if width < 4 || height < 4 {
        return image;
    }

    for x in 0..width {
        image.put_pixel(x, 0, FRAME);
        image.put_pixel(x, height - 1, FRAME);
    }
    for y in 0..height {
        image.put_pixel(0, y, FRAME);
        image.put_pixel(width - 1, y, FRAME);
    }

    image
}

impl PdfEngine for LopdfEngine {
    fn open(&mut self, source: OpenSource) -> Result<DocumentHandle, PdfEngineError> {
        let sizes = match source {
            OpenSource::Path(path) => read_geometry(&fs::read(path)?)?,
            OpenSource::Bytes(bytes) => read_geometry(&bytes)?,
        };
        tracing::debug!(pages = sizes.len(), "read page geometry");

        self.next_handle += 1;
        let handle = DocumentHandle(self.next_handle);
        self.open.insert(handle, sizes);

        Ok(handle)
    }

    fn page_count(&self, handle: DocumentHandle) -> Result<u32, PdfEngineError> {
        Ok(self.pages(handle)?.len() as u32)
    }

    fn page_size(
        &self,
        handle: DocumentHandle,
        page_index: u32,
    ) -> Result<PageSize, PdfEngineError> {
        let pages = self.pages(handle)?;

        pages.get(page_index as usize).copied().ok_or(PdfEngineError::PageOutOfRange {
            page: page_index,
            page_count: pages.len() as u32,
        })
    }

    fn render_page(
        &self,
        handle: DocumentHandle,
        request: RenderRequest,
    ) -> Result<RgbaImage, PdfEngineError> {
        let size = self.page_size(handle, request.page_index)?;
        let (width, height) = scaled_size(size.width_pt, size.height_pt, request.scale);

        let mut image = blank_page(width, height);
        if request.invert {
            invert_colors(&mut image);
        }

        Ok(image)
    }

    fn close(&mut self, handle: DocumentHandle) -> Result<(), PdfEngineError> {
        match self.open.remove(&handle) {
            Some(_) => Ok(()),
            None => Err(PdfEngineError::InvalidHandle(handle.raw())),
        }
    }
}
