use crate::chapters::ChapterRecord;

pub fn page_label(page: u32, total: u32) -> String {
    format!("الصفحة: {page} / {total}")
}

pub fn chapter_label(record: &ChapterRecord) -> String {
    format!("سورة {}", record.name)
}

/// Text of a row in the chapter list: name, then the starting page.
pub fn list_row_label(record: &ChapterRecord) -> String {
    format!("{}  ({})", record.name, record.start_page)
}
