use serde::{Deserialize, Serialize};

/// The persisted reader state.
///
/// `last_page` is 0-indexed on disk; missing keys take their default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub last_page: u32,
    pub dark_mode: bool,
}

impl Settings {
    /// The 1-indexed page `last_page` refers to.
    pub fn display_page(&self) -> u32 {
        self.last_page.saturating_add(1)
    }
}
