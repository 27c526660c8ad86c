//! Normalisation applied to search queries and chapter names before matching.

const TASHKEEL: [char; 8] =
    ['\u{64b}', '\u{64c}', '\u{64d}', '\u{64e}', '\u{64f}', '\u{650}', '\u{651}', '\u{652}'];

/// Folds Arabic-Indic (U+0660..) and Eastern Arabic-Indic (U+06F0..) digits
/// to ASCII.
pub fn arabic_digits_to_ascii(text: &str) -> String {
    text.chars().map(ascii_digit).collect()
}

fn ascii_digit(c: char) -> char {
    let base = match c {
        '\u{660}'..='\u{669}' => '\u{660}',
        '\u{6f0}'..='\u{6f9}' => '\u{6f0}',
        _ => return c,
    };

    char::from_digit(c as u32 - base as u32, 10).unwrap_or(c)
}

pub fn strip_diacritics(text: &str) -> String {
    text.chars().filter(|c| !TASHKEEL.contains(c)).collect()
}

/// Search key for `text`: ASCII digits, no diacritics, plain alef for the
/// hamza and madda forms, ha for ta marbuta, lowercase, trimmed.
pub fn normalize_arabic(text: &str) -> String {
    strip_diacritics(&arabic_digits_to_ascii(text.trim()))
        .chars()
        .map(|c| match c {
            'أ' | 'إ' | 'آ' => 'ا',
            'ة' => 'ه',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_both_digit_families() {
        assert_eq!(arabic_digits_to_ascii("٠١٢٣٤٥٦٧٨٩"), "0123456789");
        assert_eq!(arabic_digits_to_ascii("۱۱۴"), "114");
        assert_eq!(arabic_digits_to_ascii("page ٣"), "page 3");
    }

    #[test]
    fn strips_tashkeel() {
        assert_eq!(strip_diacritics("بِسْمِ"), "بسم");
    }

    #[test]
    fn unifies_letter_forms() {
        assert_eq!(normalize_arabic(" الإسراء "), "الاسراء");
        assert_eq!(normalize_arabic("البقرة"), "البقره");
        assert_eq!(normalize_arabic("آل عمران"), "ال عمران");
    }

    #[test]
    fn folds_digits_and_tashkeel_together() {
        assert_eq!(normalize_arabic("سُورَة ٢"), "سوره 2");
        assert_eq!(normalize_arabic("۱۱۴"), "114");
    }

    #[test]
    fn lowercases_latin() {
        assert_eq!(normalize_arabic("YaSin"), "yasin");
    }
}
