use crate::text::normalize_arabic;
use serde::Serialize;
use std::sync::OnceLock;

pub const CHAPTER_COUNT: usize = 114;
/// Pages in the Madinah print the chapter table describes.
pub const MADINAH_PAGE_COUNT: u32 = 604;

/// One surah of the mushaf and the page its text begins on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChapterRecord {
    pub number: u8,
    pub name: &'static str,
    pub start_page: u32,
    pub verse_count: u16,
}

impl ChapterRecord {
    pub const fn new(number: u8, name: &'static str, start_page: u32, verse_count: u16) -> Self {
        Self { number, name, start_page, verse_count }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChapterIndexError {
    #[error("chapter table has {found} entries, expected {expected}")]
    WrongCount { expected: usize, found: usize },
    #[error("chapter at position {position} is numbered {number}")]
    OutOfSequence { position: usize, number: u8 },
    #[error("first chapter starts on page {0}, expected page 1")]
    FirstPageNotOne(u32),
    #[error("chapter {number} starts on page {start_page}, before page {previous} of the chapter preceding it")]
    StartPageDecreases { number: u8, start_page: u32, previous: u32 },
}

/// Immutable chapter table ordered by chapter number and starting page.
#[derive(Debug, Clone)]
pub struct ChapterIndex {
    records: Vec<ChapterRecord>,
    search_keys: Vec<String>,
}

impl ChapterIndex {
    /// Validates `records` and builds the index.
    ///
    /// Start pages only need to be non-decreasing: several short chapters
    /// open on the same page of the Madinah mushaf.
    pub fn new(records: Vec<ChapterRecord>) -> Result<Self, ChapterIndexError> {
        if records.len() != CHAPTER_COUNT {
            return Err(ChapterIndexError::WrongCount {
                expected: CHAPTER_COUNT,
                found: records.len(),
            });
        }

        for (position, record) in records.iter().enumerate() {
            if usize::from(record.number) != position + 1 {
                return Err(ChapterIndexError::OutOfSequence {
                    position: position + 1,
                    number: record.number,
                });
            }
        }

        if records[0].start_page != 1 {
            return Err(ChapterIndexError::FirstPageNotOne(records[0].start_page));
        }

        for pair in records.windows(2) {
            if pair[1].start_page < pair[0].start_page {
                return Err(ChapterIndexError::StartPageDecreases {
                    number: pair[1].number,
                    start_page: pair[1].start_page,
                    previous: pair[0].start_page,
                });
            }
        }

        let search_keys = records.iter().map(|record| normalize_arabic(record.name)).collect();

        Ok(Self { records, search_keys })
    }

    /// The built-in table, validated on first use.
    pub fn standard() -> Result<&'static ChapterIndex, ChapterIndexError> {
        static STANDARD: OnceLock<Result<ChapterIndex, ChapterIndexError>> = OnceLock::new();

        STANDARD.get_or_init(|| ChapterIndex::new(CHAPTERS.to_vec())).as_ref().map_err(Clone::clone)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChapterRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ChapterRecord] {
        &self.records
    }

    pub fn get(&self, number: u8) -> Option<&ChapterRecord> {
        usize::from(number).checked_sub(1).and_then(|index| self.records.get(index))
    }

    /// Position of the last chapter starting on or before `page`.
    ///
    /// Falls back to the first chapter for pages before it (only page 0).
    pub fn resolve_index(&self, page: u32) -> usize {
        self.records.partition_point(|record| record.start_page <= page).saturating_sub(1)
    }

    pub fn resolve_chapter(&self, page: u32) -> &ChapterRecord {
        &self.records[self.resolve_index(page)]
    }

    /// Chapters whose name contains `query`, or whose 1-based position equals
    /// it, in table order. An empty query matches every chapter.
    pub fn filter_by_query(&self, query: &str) -> Vec<(usize, &ChapterRecord)> {
        let needle = normalize_arabic(query);

        self.records
            .iter()
            .enumerate()
            .filter(|(index, _)| {
                needle.is_empty()
                    || self.search_keys[*index].contains(needle.as_str())
                    || (index + 1).to_string() == needle
            })
            .collect()
    }
}

pub static CHAPTERS: [ChapterRecord; CHAPTER_COUNT] = [
    ChapterRecord::new(1, "الفاتحة", 1, 7),
    ChapterRecord::new(2, "البقرة", 2, 286),
    ChapterRecord::new(3, "آل عمران", 50, 200),
    ChapterRecord::new(4, "النساء", 77, 176),
    ChapterRecord::new(5, "المائدة", 106, 120),
    ChapterRecord::new(6, "الأنعام", 128, 165),
    ChapterRecord::new(7, "الأعراف", 151, 206),
    ChapterRecord::new(8, "الأنفال", 177, 75),
    ChapterRecord::new(9, "التوبة", 187, 129),
    ChapterRecord::new(10, "يونس", 208, 109),
    ChapterRecord::new(11, "هود", 221, 123),
    ChapterRecord::new(12, "يوسف", 235, 111),
    ChapterRecord::new(13, "الرعد", 249, 43),
    ChapterRecord::new(14, "إبراهيم", 255, 52),
    ChapterRecord::new(15, "الحجر", 262, 99),
    ChapterRecord::new(16, "النحل", 267, 128),
    ChapterRecord::new(17, "الإسراء", 282, 111),
    ChapterRecord::new(18, "الكهف", 293, 110),
    ChapterRecord::new(19, "مريم", 305, 98),
    ChapterRecord::new(20, "طه", 312, 135),
    ChapterRecord::new(21, "الأنبياء", 322, 112),
    ChapterRecord::new(22, "الحج", 332, 78),
    ChapterRecord::new(23, "المؤمنون", 342, 118),
    ChapterRecord::new(24, "النور", 350, 64),
    ChapterRecord::new(25, "الفرقان", 359, 77),
    ChapterRecord::new(26, "الشعراء", 367, 227),
    ChapterRecord::new(27, "النمل", 377, 93),
    ChapterRecord::new(28, "القصص", 385, 88),
    ChapterRecord::new(29, "العنكبوت", 396, 69),
    ChapterRecord::new(30, "الروم", 404, 60),
    ChapterRecord::new(31, "لقمان", 411, 34),
    ChapterRecord::new(32, "السجدة", 415, 30),
    ChapterRecord::new(33, "الأحزاب", 418, 73),
    ChapterRecord::new(34, "سبأ", 428, 54),
    ChapterRecord::new(35, "فاطر", 434, 45),
    ChapterRecord::new(36, "يس", 440, 83),
    ChapterRecord::new(37, "الصافات", 446, 182),
    ChapterRecord::new(38, "ص", 453, 88),
    ChapterRecord::new(39, "الزمر", 458, 75),
    ChapterRecord::new(40, "غافر", 467, 85),
    ChapterRecord::new(41, "فصلت", 477, 54),
    ChapterRecord::new(42, "الشورى", 483, 53),
    ChapterRecord::new(43, "الزخرف", 489, 89),
    ChapterRecord::new(44, "الدخان", 496, 59),
    ChapterRecord::new(45, "الجاثية", 499, 37),
    ChapterRecord::new(46, "الأحقاف", 502, 35),
    ChapterRecord::new(47, "محمد", 507, 38),
    ChapterRecord::new(48, "الفتح", 511, 29),
    ChapterRecord::new(49, "الحجرات", 515, 18),
    ChapterRecord::new(50, "ق", 518, 45),
    ChapterRecord::new(51, "الذاريات", 520, 60),
    ChapterRecord::new(52, "الطور", 523, 49),
    ChapterRecord::new(53, "النجم", 526, 62),
    ChapterRecord::new(54, "القمر", 528, 55),
    ChapterRecord::new(55, "الرحمن", 531, 78),
    ChapterRecord::new(56, "الواقعة", 534, 96),
    ChapterRecord::new(57, "الحديد", 537, 29),
    ChapterRecord::new(58, "المجادلة", 542, 22),
    ChapterRecord::new(59, "الحشر", 545, 24),
    ChapterRecord::new(60, "الممتحنة", 549, 13),
    ChapterRecord::new(61, "الصف", 551, 14),
    ChapterRecord::new(62, "الجمعة", 553, 11),
    ChapterRecord::new(63, "المنافقون", 554, 11),
    ChapterRecord::new(64, "التغابن", 556, 18),
    ChapterRecord::new(65, "الطلاق", 558, 12),
    ChapterRecord::new(66, "التحريم", 560, 12),
    ChapterRecord::new(67, "الملك", 562, 30),
    ChapterRecord::new(68, "القلم", 564, 52),
    ChapterRecord::new(69, "الحاقة", 566, 52),
    ChapterRecord::new(70, "المعارج", 568, 44),
    ChapterRecord::new(71, "نوح", 570, 28),
    ChapterRecord::new(72, "الجن", 572, 28),
    ChapterRecord::new(73, "المزمل", 574, 20),
    ChapterRecord::new(74, "المدثر", 575, 56),
    ChapterRecord::new(75, "القيامة", 577, 40),
    ChapterRecord::new(76, "الإنسان", 578, 31),
    ChapterRecord::new(77, "المرسلات", 580, 50),
    ChapterRecord::new(78, "النبأ", 582, 40),
    ChapterRecord::new(79, "النازعات", 583, 46),
    ChapterRecord::new(80, "عبس", 585, 42),
    ChapterRecord::new(81, "التكوير", 586, 29),
    ChapterRecord::new(82, "الانفطار", 587, 19),
    ChapterRecord::new(83, "المطففين", 587, 36),
    ChapterRecord::new(84, "الانشقاق", 589, 25),
    ChapterRecord::new(85, "البروج", 590, 22),
    ChapterRecord::new(86, "الطارق", 591, 17),
    ChapterRecord::new(87, "الأعلى", 591, 19),
    ChapterRecord::new(88, "الغاشية", 592, 26),
    ChapterRecord::new(89, "الفجر", 593, 30),
    ChapterRecord::new(90, "البلد", 594, 20),
    ChapterRecord::new(91, "الشمس", 595, 15),
    ChapterRecord::new(92, "الليل", 595, 21),
    ChapterRecord::new(93, "الضحى", 596, 11),
    ChapterRecord::new(94, "الشرح", 596, 8),
    ChapterRecord::new(95, "التين", 597, 8),
    ChapterRecord::new(96, "العلق", 597, 19),
    ChapterRecord::new(97, "القدر", 598, 5),
    ChapterRecord::new(98, "البينة", 598, 8),
    ChapterRecord::new(99, "الزلزلة", 599, 8),
    ChapterRecord::new(100, "العاديات", 599, 11),
    ChapterRecord::new(101, "القارعة", 600, 11),
    ChapterRecord::new(102, "التكاثر", 600, 8),
    ChapterRecord::new(103, "العصر", 601, 3),
    ChapterRecord::new(104, "الهمزة", 601, 9),
    ChapterRecord::new(105, "الفيل", 601, 5),
    ChapterRecord::new(106, "قريش", 602, 4),
    ChapterRecord::new(107, "الماعون", 602, 7),
    ChapterRecord::new(108, "الكوثر", 602, 3),
    ChapterRecord::new(109, "الكافرون", 603, 6),
    ChapterRecord::new(110, "النصر", 603, 3),
    ChapterRecord::new(111, "المسد", 603, 5),
    ChapterRecord::new(112, "الإخلاص", 604, 4),
    ChapterRecord::new(113, "الفلق", 604, 5),
    ChapterRecord::new(114, "الناس", 604, 6),
];
