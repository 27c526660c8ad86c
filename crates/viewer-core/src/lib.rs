pub mod cache;
pub mod navigation;
pub mod zoom;

pub use cache::{prefetch_pages, PageCache, RasterKey};
pub use navigation::{EffectQueue, NavigationAction, NavigationSink, NavigationState};
pub use zoom::{format_zoom_percent, MAX_ZOOM, MIN_ZOOM, ZOOM_IN_STEP, ZOOM_OUT_STEP};
