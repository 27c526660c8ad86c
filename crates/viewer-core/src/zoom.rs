pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;
pub const DEFAULT_ZOOM: f32 = 1.0;
pub const ZOOM_IN_STEP: f32 = 1.25;
pub const ZOOM_OUT_STEP: f32 = 0.8;

pub fn zoomed_in(zoom: f32) -> f32 {
    (zoom * ZOOM_IN_STEP).clamp(MIN_ZOOM, MAX_ZOOM)
}

pub fn zoomed_out(zoom: f32) -> f32 {
    (zoom * ZOOM_OUT_STEP).clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Whole-percent label, truncated: 1.5625 is shown as "156%".
pub fn format_zoom_percent(zoom: f32) -> String {
    format!("{}%", (zoom * 100.0) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_clamped() {
        assert_eq!(zoomed_in(4.5), MAX_ZOOM);
        assert_eq!(zoomed_out(0.11), MIN_ZOOM);
        assert_eq!(zoomed_in(DEFAULT_ZOOM), 1.25);
    }

    #[test]
    fn percent_label_truncates() {
        assert_eq!(format_zoom_percent(1.0), "100%");
        assert_eq!(format_zoom_percent(1.5625), "156%");
        assert_eq!(format_zoom_percent(MIN_ZOOM), "10%");
    }
}
