//! Static model of the Madinah mushaf: the chapter table, page-to-chapter
//! resolution and the text helpers behind chapter search.

pub mod chapters;
pub mod format;
pub mod keyboard;
pub mod settings;
pub mod text;

pub use chapters::{
    ChapterIndex, ChapterIndexError, ChapterRecord, CHAPTERS, CHAPTER_COUNT,
    MADINAH_PAGE_COUNT,
};
pub use format::{chapter_label, list_row_label, page_label};
pub use keyboard::{remap_char, remap_text};
pub use settings::Settings;
pub use text::{arabic_digits_to_ascii, normalize_arabic, strip_diacritics};
