//! Sidebar chapter search: Latin-to-Arabic key remapping and row filtering.

use egui::{Event, Modifiers};
use mushaf_model::{remap_text, ChapterIndex};

/// Rewrites typed text in place so a Latin keyboard produces Arabic letters.
/// Shortcuts (Ctrl/Alt/Cmd held) pass through untouched.
pub fn remap_typed_text(events: &mut [Event], modifiers: Modifiers) {
    if modifiers.ctrl || modifiers.alt || modifiers.command || modifiers.mac_cmd {
        return;
    }

    for event in events.iter_mut() {
        if let Event::Text(text) = event {
            *text = remap_text(text);
        }
    }
}

/// Query text plus which list rows it leaves visible. Rows are hidden,
/// never removed, so row positions always match chapter positions.
#[derive(Debug, Clone)]
pub struct ChapterFilter {
    query: String,
    visible: Vec<bool>,
}

impl ChapterFilter {
    pub fn new(index: &ChapterIndex) -> Self {
        Self { query: String::new(), visible: vec![true; index.len()] }
    }

    /// The buffer bound to the search box; call [`Self::refresh`] after edits.
    pub fn query_mut(&mut self) -> &mut String {
        &mut self.query
    }

    #[cfg(test)]
    pub fn set_query(&mut self, index: &ChapterIndex, query: impl Into<String>) {
        self.query = query.into();
        self.refresh(index);
    }

    pub fn refresh(&mut self, index: &ChapterIndex) {
        self.visible = vec![false; index.len()];
        let matches = index.filter_by_query(&self.query);
        for (position, _) in &matches {
            self.visible[*position] = true;
        }

        tracing::debug!(query = %self.query, matches = matches.len(), "chapter filter updated");
    }

    pub fn is_visible(&self, position: usize) -> bool {
        self.visible.get(position).copied().unwrap_or(false)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|visible| **visible).count()
    }
}

/// Row to highlight for `current_page`. Several chapters can start on one
/// page; a chapter the reader just picked from the list stays highlighted
/// while its start page is showing, otherwise the last chapter starting at
/// or before the page wins.
pub fn highlighted_row(index: &ChapterIndex, current_page: u32, picked: Option<usize>) -> usize {
    picked
        .filter(|&position| {
            index.records().get(position).is_some_and(|record| record.start_page == current_page)
        })
        .unwrap_or_else(|| index.resolve_index(current_page))
}
