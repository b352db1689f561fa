//! Client-side filtering and pagination
//!
//! Everything here works on already-fetched lists. No network access, so the
//! same code backs the CLI and the WASM front-end.
//!
//! - **pager**: "load more" window over a filtered list
//! - **placement**: test list ordering and filter pills
//! - **verbs**: verb board (alphabet, tags, favorites, search)
//! - **glossary**: concept rows merged from per-stream terms
//! - **tags**: tag collection for any tagged content

pub mod glossary;
pub mod pager;
pub mod placement;
pub mod tags;
pub mod verbs;

pub use glossary::{build_rows, GlossaryBoard, GlossaryFilter, GlossaryRow};
pub use pager::{Pager, TABLE_PAGE_SIZE, TEST_PAGE_SIZE};
pub use placement::{sort_by_level, ModeFilter, TestBoard, TestFilter};
pub use tags::{collect_tags, filter_by_tag};
pub use verbs::{VerbBoard, VerbFilter, VerbForm, VerbView};

/// Letters of the alphabet bar, Norwegian order
pub const ALPHABET: [&str; 29] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z", "Æ", "Ø", "Å",
];

fn is_alphabet_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, 'æ' | 'ø' | 'å' | 'Æ' | 'Ø' | 'Å')
}

fn upper(c: char) -> String {
    c.to_uppercase().collect()
}

/// First alphabet letter in `text`, upper-cased; otherwise its first
/// character upper-cased. `None` for an empty string.
pub(crate) fn initial_letter(text: &str) -> Option<String> {
    text.chars()
        .find(|c| is_alphabet_char(*c))
        .or_else(|| text.chars().next())
        .map(upper)
}

/// Folds accented Latin letters onto the alphabet bar, Norwegian style:
/// `ä` files under Æ, `ö` under Ø, `ü` under Y
fn fold_letter(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ā' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ō' => 'o',
        'š' => 's',
        'ù' | 'ú' | 'û' | 'ū' => 'u',
        'ü' | 'ý' | 'ÿ' => 'y',
        'ž' => 'z',
        'ä' => 'æ',
        'ö' => 'ø',
        other => other,
    }
}

/// Sort key in alphabet bar order: punctuation, digits, A–Å, then other
/// scripts. Accents only break ties.
pub fn collation_key(text: &str) -> (Vec<(u8, u32)>, String) {
    let lower = text.trim().to_lowercase();
    let primary = lower
        .chars()
        .map(|c| {
            let folded = upper(fold_letter(c));
            if let Some(pos) = ALPHABET.iter().position(|l| *l == folded) {
                (2, pos as u32)
            } else if c.is_ascii_digit() {
                (1, c as u32)
            } else if c.is_alphabetic() {
                (3, c as u32)
            } else {
                (0, c as u32)
            }
        })
        .collect();
    (primary, lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_letter() {
        assert_eq!(initial_letter("øl").as_deref(), Some("Ø"));
        assert_eq!(initial_letter("(be)tale").as_deref(), Some("B"));
        assert_eq!(initial_letter("123").as_deref(), Some("1"));
        assert_eq!(initial_letter(""), None);
    }

    #[test]
    fn test_alphabet_ends_with_norwegian_letters() {
        assert_eq!(ALPHABET.len(), 29);
        assert_eq!(&ALPHABET[26..], &["Æ", "Ø", "Å"]);
    }

    #[test]
    fn test_collation_key_alphabet_order() {
        let mut words = vec!["zebra", "ørret", "élite", "ære", "åpen", "über", "abc", "2 dager"];
        words.sort_by_cached_key(|w| collation_key(w));
        assert_eq!(
            words,
            vec!["2 dager", "abc", "élite", "über", "zebra", "ære", "ørret", "åpen"]
        );
    }

    #[test]
    fn test_collation_key_accent_breaks_ties_only() {
        assert!(collation_key("ele") < collation_key("éle"));
        assert!(collation_key("éle") < collation_key("elf"));
    }
}
