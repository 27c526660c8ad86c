//! Light and dark palettes for the reader chrome, and Arabic font setup.

use egui::{Color32, FontData, FontDefinitions, FontFamily, Stroke, Visuals};
use std::sync::Arc;

const AMIRI: &str = "Amiri";

/// Semantic colors for the reader chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Behind the rendered page.
    pub viewer_bg: Color32,
    pub sidebar_bg: Color32,
    pub toolbar_bg: Color32,
    pub input_bg: Color32,
    /// Sidebar heading and emphasised text.
    pub title: Color32,
    pub list_item: Color32,
    pub list_item_selected: Color32,
    pub nav_button: Color32,
    pub nav_button_hover: Color32,
    pub border: Color32,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            viewer_bg: Color32::from_rgb(0xe8, 0xe6, 0xdf),
            sidebar_bg: Color32::from_rgb(0xf7, 0xf5, 0xee),
            toolbar_bg: Color32::from_rgb(0xf0, 0xee, 0xe6),
            input_bg: Color32::WHITE,
            title: Color32::from_rgb(0x1b, 0x5e, 0x20),
            list_item: Color32::from_rgb(0x33, 0x33, 0x33),
            list_item_selected: Color32::from_rgb(0xc8, 0xe6, 0xc9),
            nav_button: Color32::from_rgb(0x2e, 0x7d, 0x32),
            nav_button_hover: Color32::from_rgb(0x1b, 0x5e, 0x20),
            border: Color32::from_rgb(0xd0, 0xcd, 0xc2),
        }
    }

    pub fn dark() -> Self {
        Self {
            viewer_bg: Color32::from_rgb(0x12, 0x12, 0x12),
            sidebar_bg: Color32::from_rgb(0x1e, 0x1e, 0x1e),
            toolbar_bg: Color32::from_rgb(0x24, 0x24, 0x24),
            input_bg: Color32::from_rgb(0x2b, 0x2b, 0x2b),
            title: Color32::from_rgb(0x81, 0xc7, 0x84),
            list_item: Color32::from_rgb(0xdd, 0xdd, 0xdd),
            list_item_selected: Color32::from_rgb(0x2e, 0x4d, 0x30),
            nav_button: Color32::from_rgb(0x38, 0x8e, 0x3c),
            nav_button_hover: Color32::from_rgb(0x43, 0xa0, 0x47),
            border: Color32::from_rgb(0x3a, 0x3a, 0x3a),
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

/// egui visuals derived from the palette.
pub fn visuals(palette: &Palette, dark_mode: bool) -> Visuals {
    let mut visuals = if dark_mode { Visuals::dark() } else { Visuals::light() };

    visuals.panel_fill = palette.sidebar_bg;
    visuals.window_fill = palette.sidebar_bg;
    visuals.extreme_bg_color = palette.input_bg;
    visuals.faint_bg_color = palette.toolbar_bg;

    visuals.selection.bg_fill = palette.list_item_selected;
    visuals.selection.stroke = Stroke::new(1.0, palette.title);

    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.list_item);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.border);
    visuals.widgets.inactive.weak_bg_fill = palette.nav_button;
    visuals.widgets.inactive.bg_fill = palette.nav_button;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.hovered.weak_bg_fill = palette.nav_button_hover;
    visuals.widgets.hovered.bg_fill = palette.nav_button_hover;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals
}

pub fn apply(ctx: &egui::Context, dark_mode: bool) {
    let palette = Palette::for_mode(dark_mode);
    ctx.set_visuals(visuals(&palette, dark_mode));
}

/// Default fonts with Amiri placed first for proportional text when its
/// bytes are available. egui's bundled fonts stay as fallbacks.
pub fn font_definitions(amiri: Option<Vec<u8>>) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();

    if let Some(bytes) = amiri {
        fonts.font_data.insert(AMIRI.to_owned(), Arc::new(FontData::from_owned(bytes)));
        fonts.families.entry(FontFamily::Proportional).or_default().insert(0, AMIRI.to_owned());
    }

    fonts
}

pub fn install_fonts(ctx: &egui::Context, amiri: Option<Vec<u8>>) {
    if amiri.is_none() {
        tracing::info!("Amiri font not found; using egui default fonts");
    }
    ctx.set_fonts(font_definitions(amiri));
}
