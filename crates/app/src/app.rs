use crate::pages::{display_size, PageRenderer};
use crate::resources::{ResourceLocator, FONT_FILE_NAME, MUSHAF_FILE_NAME};
use crate::search::{highlighted_row, remap_typed_text, ChapterFilter};
use crate::theme::{self, Palette};
use crate::Args;
use anyhow::{anyhow, bail, Context as _};
use egui::{Align, Color32, Key, Layout, RichText};
use mushaf_model::{chapter_label, list_row_label, page_label, ChapterIndex, Settings};
use pdf_engine::OpenSource;
use std::fs;
use storage::SettingsStore;
use viewer_core::{
    format_zoom_percent, EffectQueue, NavigationAction, NavigationState, RasterKey, ZOOM_IN_STEP,
    ZOOM_OUT_STEP,
};

const SIDEBAR_TITLE: &str = "القرآن الكريم";
const SEARCH_HINT: &str = "ابحث عن سورة...";
const PREV_LABEL: &str = "◀ السابق";
const NEXT_LABEL: &str = "التالي ▶";
const ERROR_TITLE: &str = "خطأ";
const NO_RESULTS: &str = "لا توجد نتائج";

const SIDEBAR_WIDTH: f32 = 300.0;
const TOOLBAR_HEIGHT: f32 = 50.0;
const LIST_ROW_HEIGHT: f32 = 28.0;
const PAGE_LABEL_HEIGHT: f32 = 36.0;

pub struct ReaderApp {
    state: AppState,
}

enum AppState {
    Ready(Box<Reader>),
    Failed(String),
}

impl ReaderApp {
    pub fn new(cc: &eframe::CreationContext<'_>, args: &Args) -> Self {
        let locator = ResourceLocator::from_environment();

        let amiri = locator.locate(FONT_FILE_NAME, None).and_then(|path| match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!(path = %path.display(), "could not read font: {err}");
                None
            }
        });
        theme::install_fonts(&cc.egui_ctx, amiri);
        cc.egui_ctx.options_mut(|options| options.zoom_with_keyboard = false);

        let state = match Reader::start(args, &locator) {
            Ok(reader) => AppState::Ready(Box::new(reader)),
            Err(err) => {
                tracing::error!("startup failed: {err:#}");
                AppState::Failed(format!("{err:#}"))
            }
        };

        Self { state }
    }
}

impl eframe::App for ReaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match &mut self.state {
            AppState::Ready(reader) => reader.update(ctx),
            AppState::Failed(message) => draw_error_screen(ctx, message),
        }
    }
}

/// The running reader: one open mushaf and the UI state around it.
struct Reader {
    chapters: &'static ChapterIndex,
    nav: NavigationState<EffectQueue>,
    pages: PageRenderer,
    store: Option<SettingsStore>,
    filter: ChapterFilter,
    /// Row last clicked in the chapter list, kept while its page is showing.
    picked_row: Option<usize>,
    gesture_zoom: GestureZoom,
    current_texture: Option<egui::TextureHandle>,
    page_input: u32,
    search_focused: bool,
    scroll_list_to_current: bool,
    applied_dark_mode: Option<bool>,
}

impl Reader {
    fn start(args: &Args, locator: &ResourceLocator) -> anyhow::Result<Self> {
        let chapters = ChapterIndex::standard().context("built-in chapter table is invalid")?;

        let pdf_path = locator.locate(MUSHAF_FILE_NAME, args.pdf.as_deref()).ok_or_else(|| {
            let searched: Vec<String> = locator
                .candidates(MUSHAF_FILE_NAME)
                .map(|path| path.display().to_string())
                .collect();
            anyhow!("mushaf PDF not found; searched:\n{}", searched.join("\n"))
        })?;
        if !pdf_path.is_file() {
            bail!("mushaf PDF not found at {}", pdf_path.display());
        }

        let mut engine = pdf_engine::preferred_engine().context("failed to load the PDF renderer")?;
        let handle = engine
            .open(OpenSource::from(pdf_path.as_path()))
            .with_context(|| format!("failed to open {}", pdf_path.display()))?;
        let pages = PageRenderer::new(engine, handle);
        let total_pages = pages.page_count()?;
        tracing::info!(path = %pdf_path.display(), total_pages, "opened mushaf");

        let store = match SettingsStore::resolve(args.config_dir.clone()) {
            Ok(store) => Some(store),
            Err(err) => {
                tracing::warn!("settings will not be saved: {err}");
                None
            }
        };

        let mut nav = NavigationState::new(total_pages, EffectQueue::new());
        if let Some(store) = &store {
            nav.restore(&store.load_or_default());
        }
        match args.page {
            Some(page) => nav.go_to_page(page),
            None => nav.refresh(),
        }

        Ok(Self {
            chapters,
            page_input: nav.current_page(),
            nav,
            pages,
            store,
            filter: ChapterFilter::new(chapters),
            picked_row: None,
            gesture_zoom: GestureZoom::default(),
            current_texture: None,
            search_focused: false,
            scroll_list_to_current: true,
            applied_dark_mode: None,
        })
    }

    fn update(&mut self, ctx: &egui::Context) {
        if self.search_focused {
            ctx.input_mut(|input| {
                let modifiers = input.modifiers;
                remap_typed_text(&mut input.events, modifiers);
            });
        }

        let typing = ctx.wants_keyboard_input();
        let gesture_zoom = &mut self.gesture_zoom;
        for action in ctx.input(|input| shortcut_actions(input, typing, gesture_zoom)) {
            self.nav.apply(action);
        }

        self.sync_theme(ctx);
        self.draw_sidebar(ctx);
        self.draw_toolbar(ctx);
        self.drain_effects(ctx);
        self.draw_viewport(ctx);

        let current = RasterKey::new(self.nav.current_page(), self.nav.dark_mode());
        if self.pages.prefetch_next(ctx, current, self.nav.total_pages()) {
            ctx.request_repaint();
        }
    }

    fn sync_theme(&mut self, ctx: &egui::Context) {
        let dark_mode = self.nav.dark_mode();
        if self.applied_dark_mode != Some(dark_mode) {
            theme::apply(ctx, dark_mode);
            self.applied_dark_mode = Some(dark_mode);
        }
    }

    /// Turns queued navigation effects into a page texture and a settings write.
    fn drain_effects(&mut self, ctx: &egui::Context) {
        let queue = self.nav.sink_mut();
        let render = queue.take_render();
        let persist = queue.take_persist();

        if let Some((page, dark_mode)) = render {
            self.page_input = page;
            self.scroll_list_to_current = true;

            let picked_page = self
                .picked_row
                .and_then(|row| self.chapters.records().get(row))
                .map(|record| record.start_page);
            if picked_page != Some(page) {
                self.picked_row = None;
            }

            match self.pages.texture(ctx, RasterKey::new(page, dark_mode)) {
                Ok(texture) => self.current_texture = Some(texture),
                Err(err) => {
                    tracing::error!(page, "failed to render page: {err}");
                    self.current_texture = None;
                }
            }
        }

        if let Some(settings) = persist {
            self.persist(&settings);
        }
    }

    fn persist(&self, settings: &Settings) {
        if let Some(store) = &self.store {
            store.save_best_effort(settings);
        }
    }

    fn draw_sidebar(&mut self, ctx: &egui::Context) {
        let palette = Palette::for_mode(self.nav.dark_mode());
        let chapters = self.chapters;
        let current_index = highlighted_row(chapters, self.nav.current_page(), self.picked_row);

        let frame = egui::Frame::side_top_panel(&ctx.style())
            .fill(palette.sidebar_bg)
            .inner_margin(10.0);

        egui::SidePanel::right("chapters")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .frame(frame)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(SIDEBAR_TITLE).size(22.0).strong().color(palette.title));
                });
                ui.add_space(8.0);

                let search = ui.add(
                    egui::TextEdit::singleline(self.filter.query_mut())
                        .hint_text(SEARCH_HINT)
                        .horizontal_align(Align::Max)
                        .desired_width(f32::INFINITY),
                );
                self.search_focused = search.has_focus();
                if search.changed() {
                    self.filter.refresh(chapters);
                }
                ui.add_space(6.0);

                let mut selected = None;
                egui::ScrollArea::vertical()
                    .max_height((ui.available_height() - PAGE_LABEL_HEIGHT).max(0.0))
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for (position, record) in chapters.iter().enumerate() {
                            if !self.filter.is_visible(position) {
                                continue;
                            }

                            let is_current = position == current_index;
                            let text = RichText::new(list_row_label(record)).color(if is_current {
                                palette.title
                            } else {
                                palette.list_item
                            });
                            let row = ui.add_sized(
                                [ui.available_width(), LIST_ROW_HEIGHT],
                                egui::SelectableLabel::new(is_current, text),
                            );

                            if row.clicked() {
                                selected = Some((position, record));
                            }
                            if is_current && self.scroll_list_to_current {
                                row.scroll_to_me(Some(Align::Center));
                                self.scroll_list_to_current = false;
                            }
                        }

                        if self.filter.visible_count() == 0 {
                            ui.vertical_centered(|ui| ui.weak(NO_RESULTS));
                        }
                    });

                if let Some((position, record)) = selected {
                    tracing::debug!(chapter = record.number, "chapter selected");
                    self.picked_row = Some(position);
                    self.nav.jump_to_chapter(record);
                }

                ui.separator();
                ui.vertical_centered(|ui| {
                    if let Some(record) = chapters.records().get(current_index) {
                        ui.label(RichText::new(chapter_label(record)).color(palette.title));
                    }
                    ui.label(page_label(self.nav.current_page(), self.nav.total_pages()));
                });
            });
    }

    fn draw_toolbar(&mut self, ctx: &egui::Context) {
        let palette = Palette::for_mode(self.nav.dark_mode());
        let frame = egui::Frame::side_top_panel(&ctx.style()).fill(palette.toolbar_bg);

        egui::TopBottomPanel::top("toolbar").exact_height(TOOLBAR_HEIGHT).frame(frame).show(
            ctx,
            |ui| {
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.add_sized([80.0, 30.0], egui::Button::new(PREV_LABEL)).clicked() {
                        self.nav.prev_page();
                    }

                    let spinner = ui.add_sized(
                        [70.0, 30.0],
                        egui::DragValue::new(&mut self.page_input)
                            .range(1..=self.nav.total_pages())
                            .speed(1.0),
                    );
                    if spinner.changed() {
                        self.nav.go_to_page(self.page_input);
                    }

                    if ui.add_sized([80.0, 30.0], egui::Button::new(NEXT_LABEL)).clicked() {
                        self.nav.next_page();
                    }

                    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                        let theme_icon = if self.nav.dark_mode() { "☀" } else { "🌙" };
                        if ui.add_sized([40.0, 30.0], egui::Button::new(theme_icon)).clicked() {
                            self.nav.toggle_dark_mode();
                        }
                        ui.separator();
                        if ui.add_sized([40.0, 30.0], egui::Button::new("➖")).clicked() {
                            self.nav.zoom_out();
                        }
                        if ui.add_sized([40.0, 30.0], egui::Button::new("➕")).clicked() {
                            self.nav.zoom_in();
                        }
                        ui.label(format_zoom_percent(self.nav.zoom_factor()));
                    });
                });
            },
        );
    }

    fn draw_viewport(&mut self, ctx: &egui::Context) {
        let palette = Palette::for_mode(self.nav.dark_mode());
        let frame = egui::Frame::central_panel(&ctx.style()).fill(palette.viewer_bg);

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let Some(texture) = &self.current_texture else {
                ui.centered_and_justified(|ui| {
                    ui.weak(format!("تعذر عرض الصفحة {}", self.nav.current_page()));
                });
                return;
            };

            let size = display_size(texture.size_vec2(), self.nav.zoom_factor());

            egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
                let available = ui.available_size();
                let padding_x = ((available.x - size.x) / 2.0).max(0.0);
                let padding_y = ((available.y - size.y) / 2.0).max(0.0);

                ui.add_space(padding_y);
                ui.horizontal(|ui| {
                    ui.add_space(padding_x);
                    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                });
                ui.add_space(padding_y);
            });
        });
    }
}

impl Drop for Reader {
    fn drop(&mut self) {
        self.nav.flush();
        if let Some(settings) = self.nav.sink_mut().take_persist() {
            tracing::debug!(last_page = settings.last_page, "saving settings on exit");
            self.persist(&settings);
        }
        self.pages.close();
    }
}

/// Gathers pinch and Ctrl+wheel scaling across frames. A smooth gesture
/// reports many small factors; one zoom step is released each time their
/// product passes a full step.
#[derive(Debug, Default)]
struct GestureZoom {
    /// Natural log of the factor gathered since the last step.
    pending: f32,
}

impl GestureZoom {
    fn feed(&mut self, factor: f32) -> Vec<NavigationAction> {
        let mut actions = Vec::new();
        if !factor.is_finite() || factor <= 0.0 || factor == 1.0 {
            return actions;
        }

        let delta = factor.ln();
        if delta.signum() != self.pending.signum() {
            self.pending = 0.0;
        }
        self.pending += delta;

        let step_in = ZOOM_IN_STEP.ln();
        let step_out = ZOOM_OUT_STEP.ln();
        while self.pending >= step_in {
            self.pending -= step_in;
            actions.push(NavigationAction::ZoomIn);
        }
        while self.pending <= step_out {
            self.pending -= step_out;
            actions.push(NavigationAction::ZoomOut);
        }

        actions
    }
}

/// Keyboard and Ctrl+wheel bindings. Arrow keys are ignored while a text
/// field has focus.
fn shortcut_actions(
    input: &egui::InputState,
    typing: bool,
    gesture_zoom: &mut GestureZoom,
) -> Vec<NavigationAction> {
    let mut actions = Vec::new();

    if !typing {
        if input.key_pressed(Key::ArrowRight) {
            actions.push(NavigationAction::Next);
        }
        if input.key_pressed(Key::ArrowLeft) {
            actions.push(NavigationAction::Previous);
        }
    }

    if input.modifiers.command {
        if input.key_pressed(Key::Equals) || input.key_pressed(Key::Plus) {
            actions.push(NavigationAction::ZoomIn);
        }
        if input.key_pressed(Key::Minus) {
            actions.push(NavigationAction::ZoomOut);
        }
        if input.key_pressed(Key::Num0) {
            actions.push(NavigationAction::ZoomReset);
        }
    }

    actions.extend(gesture_zoom.feed(input.zoom_delta()));

    actions
}

fn draw_error_screen(ctx: &egui::Context, message: &str) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.heading(RichText::new(format!("❌ {ERROR_TITLE}")).color(ui.visuals().error_fg_color));
            ui.add_space(8.0);
            ui.label(message);
        });
    });
}
