use crate::zoom::{zoomed_in, zoomed_out, DEFAULT_ZOOM};
use mushaf_model::{ChapterRecord, Settings};

/// Receives the side effects of navigation.
///
/// Both requests are fire-and-forget: a sink must not report failure back to
/// the operation that triggered it.
pub trait NavigationSink {
    fn request_render(&mut self, page: u32, dark_mode: bool);
    fn request_persist(&mut self, settings: Settings);
}

/// Sink that keeps only the latest request of each kind until drained.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EffectQueue {
    render: Option<(u32, bool)>,
    persist: Option<Settings>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_render(&mut self) -> Option<(u32, bool)> {
        self.render.take()
    }

    pub fn take_persist(&mut self) -> Option<Settings> {
        self.persist.take()
    }

    pub fn is_empty(&self) -> bool {
        self.render.is_none() && self.persist.is_none()
    }
}

impl NavigationSink for EffectQueue {
    fn request_render(&mut self, page: u32, dark_mode: bool) {
        self.render = Some((page, dark_mode));
    }

    fn request_persist(&mut self, settings: Settings) {
        self.persist = Some(settings);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationAction {
    Next,
    Previous,
    GoTo(u32),
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ToggleDarkMode,
}

#[derive(Debug)]
pub struct NavigationState<S> {
    current_page: u32,
    total_pages: u32,
    zoom_factor: f32,
    dark_mode: bool,
    sink: S,
}

impl<S: NavigationSink> NavigationState<S> {
    /// Starts on page 1 in light mode. `total_pages` is raised to at least 1.
    pub fn new(total_pages: u32, sink: S) -> Self {
        Self {
            current_page: 1,
            total_pages: total_pages.max(1),
            zoom_factor: DEFAULT_ZOOM,
            dark_mode: false,
            sink,
        }
    }

    /// Applies persisted settings without requesting a render or persist.
    pub fn restore(&mut self, settings: &Settings) {
        self.current_page = self.clamp_page(settings.display_page());
        self.dark_mode = settings.dark_mode;
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn zoom_factor(&self) -> f32 {
        self.zoom_factor
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn snapshot(&self) -> Settings {
        Settings { last_page: self.current_page - 1, dark_mode: self.dark_mode }
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.current_page = self.clamp_page(page);
        self.notify();
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages {
            self.current_page += 1;
            self.notify();
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
            self.notify();
        }
    }

    pub fn jump_to_chapter(&mut self, chapter: &ChapterRecord) {
        self.go_to_page(chapter.start_page);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_factor = zoomed_in(self.zoom_factor);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_factor = zoomed_out(self.zoom_factor);
    }

    pub fn zoom_reset(&mut self) {
        self.zoom_factor = DEFAULT_ZOOM;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.notify();
    }

    pub fn apply(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Next => self.next_page(),
            NavigationAction::Previous => self.prev_page(),
            NavigationAction::GoTo(page) => self.go_to_page(page),
            NavigationAction::ZoomIn => self.zoom_in(),
            NavigationAction::ZoomOut => self.zoom_out(),
            NavigationAction::ZoomReset => self.zoom_reset(),
            NavigationAction::ToggleDarkMode => self.toggle_dark_mode(),
        }
    }

    /// Requests a render and persist of the current state, e.g. for the
    /// first frame after `restore`.
    pub fn refresh(&mut self) {
        self.notify();
    }

    /// Final persist on shutdown.
    pub fn flush(&mut self) {
        let settings = self.snapshot();
        self.sink.request_persist(settings);
    }

    fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages)
    }

    fn notify(&mut self) {
        tracing::debug!(page = self.current_page, dark_mode = self.dark_mode, "navigation changed");

        self.sink.request_render(self.current_page, self.dark_mode);
        let settings = self.snapshot();
        self.sink.request_persist(settings);
    }
}
