use pdf_engine::{DocumentHandle, PdfEngine, PdfEngineError, RenderRequest, RgbaImage};
use viewer_core::{prefetch_pages, PageCache, RasterKey};

/// Rasterisation scale relative to PDF points. Pages are drawn at
/// `1 / RENDER_SCALE` of their texture size at 100% zoom.
pub const RENDER_SCALE: f32 = 2.0;

const CACHE_CAPACITY: usize = 12;
const PREFETCH_RADIUS: u32 = 1;

/// Owns the open document and the textures rendered from it.
pub struct PageRenderer {
    engine: Box<dyn PdfEngine>,
    handle: DocumentHandle,
    textures: PageCache<egui::TextureHandle>,
}

impl PageRenderer {
    pub fn new(engine: Box<dyn PdfEngine>, handle: DocumentHandle) -> Self {
        Self { engine, handle, textures: PageCache::new(CACHE_CAPACITY) }
    }

    pub fn page_count(&self) -> Result<u32, PdfEngineError> {
        self.engine.page_count(self.handle)
    }

    /// Texture for the 1-based page, rendering it on a cache miss.
    pub fn texture(
        &mut self,
        ctx: &egui::Context,
        key: RasterKey,
    ) -> Result<egui::TextureHandle, PdfEngineError> {
        if let Some(texture) = self.textures.get(key) {
            return Ok(texture.clone());
        }

        let image = self.engine.render_page(
            self.handle,
            RenderRequest::page(key.page.saturating_sub(1), RENDER_SCALE, key.dark_mode),
        )?;
        tracing::debug!(
            page = key.page,
            dark_mode = key.dark_mode,
            width = image.width(),
            height = image.height(),
            "rendered page"
        );

        let texture = ctx.load_texture(
            texture_name(key),
            color_image(&image),
            egui::TextureOptions::LINEAR,
        );
        // Evicted handles free their GPU texture on drop.
        let _ = self.textures.insert(key, texture.clone());

        Ok(texture)
    }

    /// Renders at most one uncached neighbour of `current`. Returns true
    /// when one was rendered, so the caller can schedule another frame.
    pub fn prefetch_next(&mut self, ctx: &egui::Context, current: RasterKey, total: u32) -> bool {
        let missing = prefetch_pages(current.page, total, PREFETCH_RADIUS)
            .into_iter()
            .map(|page| RasterKey::new(page, current.dark_mode))
            .find(|key| !self.textures.contains(*key));

        let Some(key) = missing else {
            return false;
        };

        if let Err(err) = self.texture(ctx, key) {
            tracing::warn!(page = key.page, error = %err, "prefetch failed");
            return false;
        }

        true
    }

    pub fn close(&mut self) {
        self.textures.clear();
        if let Err(err) = self.engine.close(self.handle) {
            tracing::debug!(error = %err, "document already closed");
        }
    }
}

fn texture_name(key: RasterKey) -> String {
    let mode = if key.dark_mode { "dark" } else { "light" };
    format!("page_{}_{mode}", key.page)
}

fn color_image(image: &RgbaImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.as_raw(),
    )
}

/// On-screen size in points of a texture rendered at [`RENDER_SCALE`].
pub fn display_size(texture_size: egui::Vec2, zoom_factor: f32) -> egui::Vec2 {
    texture_size * (zoom_factor / RENDER_SCALE)
}
