//! Latin-to-Arabic keyboard substitution for the chapter search box.
//!
//! Users on a Latin layout can type chapter names without switching layout:
//! each key is replaced by the character the same key produces on a standard
//! Arabic (101) layout.

/// Arabic text produced by the key that types `key` on a QWERTY layout.
///
/// Some keys produce a lam-alef ligature, so the result is a string.
pub fn remap_char(key: char) -> Option<&'static str> {
    let mapped = match key {
        'q' => "ض",
        'w' => "ص",
        'e' => "ث",
        'r' => "ق",
        't' => "ف",
        'y' => "غ",
        'u' => "ع",
        'i' => "ه",
        'o' => "خ",
        'p' => "ح",
        '[' => "ج",
        ']' => "د",
        'a' => "ش",
        's' => "س",
        'd' => "ي",
        'f' => "ب",
        'g' => "ل",
        'h' => "ا",
        'j' => "ت",
        'k' => "ن",
        'l' => "م",
        ';' => "ك",
        '\'' => "ط",
        'z' => "ئ",
        'x' => "ء",
        'c' => "ؤ",
        'v' => "ر",
        'b' => "لا",
        'n' => "ى",
        'm' => "ة",
        ',' => "و",
        '.' => "ز",
        '/' => "ظ",
        'Q' => "\u{64e}",
        'W' => "\u{64b}",
        'E' => "\u{64f}",
        'R' => "\u{64c}",
        'T' => "لإ",
        'Y' => "إ",
        'U' => "‘",
        'I' => "÷",
        'O' => "×",
        'P' => "؛",
        '{' => "<",
        '}' => ">",
        'A' => "\u{650}",
        'S' => "\u{64d}",
        'D' => "]",
        'F' => "[",
        'G' => "لأ",
        'H' => "أ",
        'J' => "ـ",
        'K' => "،",
        'L' => "/",
        'Z' => "~",
        'X' => "\u{652}",
        'C' => "{",
        'V' => "}",
        'B' => "لآ",
        'N' => "آ",
        'M' => "’",
        '<' => ",",
        '>' => ".",
        '?' => "؟",
        _ => return None,
    };

    Some(mapped)
}

/// Replaces every remappable character of `text`, keeping the rest as typed.
pub fn remap_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        match remap_char(c) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_row_maps_to_base_letters() {
        assert_eq!(remap_char('h'), Some("ا"));
        assert_eq!(remap_char('g'), Some("ل"));
        assert_eq!(remap_char('b'), Some("لا"));
    }

    #[test]
    fn digits_and_spaces_pass_through() {
        assert_eq!(remap_char('7'), None);
        assert_eq!(remap_char(' '), None);
        assert_eq!(remap_text("12 "), "12 ");
    }

    #[test]
    fn typing_latin_keys_spells_chapter_name() {
        assert_eq!(remap_text("hgthjpm"), "الفاتحة");
        assert_eq!(remap_text("hgtjp"), "الفتح");
        assert_eq!(remap_text("ds"), "يس");
    }

    #[test]
    fn arabic_input_is_left_untouched() {
        assert_eq!(remap_text("البقرة"), "البقرة");
    }
}
