//! Glossary concept rows
//!
//! The backend stores one term per stream. The glossary table shows one row
//! per concept, with the Bokmål, Nynorsk, English and Russian variants side
//! by side. Rows are keyed by the English concept, the Bokmål concept and
//! the Russian translation (all lower-cased).

use std::collections::{BTreeSet, HashMap};

use super::{collation_key, initial_letter};
use super::pager::{Pager, TABLE_PAGE_SIZE};
use crate::domain::{GlossaryTerm, Stream};

const VARIANT_SEPARATOR: &str = " / ";

/// One concept across all languages
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct GlossaryRow {
    /// Merge key, stable across rebuilds
    pub id: String,
    pub bokmaal: String,
    pub nynorsk: String,
    pub english: String,
    pub russian: String,
    pub tags: Vec<String>,
}

impl GlossaryRow {
    /// Non-empty columns in display order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        [&self.bokmaal, &self.nynorsk, &self.english, &self.russian]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// First non-empty column, used for sorting and the alphabet bar
    pub fn headword(&self) -> &str {
        self.columns().next().unwrap_or_default()
    }

    /// Alphabet letter, or an empty string for a row with no text
    pub fn letter(&self) -> String {
        let base = self.headword().split('/').next().unwrap_or_default().trim();
        initial_letter(base).unwrap_or_default()
    }

    fn sort_key(&self) -> (Vec<(u8, u32)>, String) {
        collation_key(self.headword())
    }
}

/// Append `value` to a `" / "`-joined list unless already there
pub fn append_variant(current: &str, value: &str) -> String {
    if value.is_empty() {
        return current.to_string();
    }
    if current.is_empty() {
        return value.to_string();
    }
    if current.split(VARIANT_SEPARATOR).any(|part| part == value) {
        return current.to_string();
    }
    format!("{}{}{}", current, VARIANT_SEPARATOR, value)
}

fn or_term<'a>(translation: &'a str, term: &'a GlossaryTerm, stream: Stream) -> &'a str {
    if !translation.is_empty() {
        translation
    } else if term.stream == stream {
        &term.term
    } else {
        ""
    }
}

/// Merge per-stream terms into concept rows sorted by headword
pub fn build_rows(terms: &[GlossaryTerm]) -> Vec<GlossaryRow> {
    let mut rows: Vec<GlossaryRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for term in terms {
        let concept_en = or_term(&term.translation_en, term, Stream::English);
        let concept_nb = or_term(&term.translation_nb, term, Stream::Bokmaal);
        let concept_ru = term.translation_ru.as_str();

        let key = format!(
            "{}|{}|{}",
            concept_en.to_lowercase(),
            concept_nb.to_lowercase().trim(),
            concept_ru.to_lowercase()
        );
        if key.replace('|', "").trim().is_empty() {
            continue;
        }

        let pos = *index.entry(key.clone()).or_insert_with(|| {
            rows.push(GlossaryRow {
                id: key,
                english: concept_en.to_string(),
                russian: concept_ru.to_string(),
                ..Default::default()
            });
            rows.len() - 1
        });
        let row = &mut rows[pos];

        if !concept_nb.is_empty() {
            row.bokmaal = append_variant(&row.bokmaal, concept_nb);
        }

        if term.stream == Stream::Nynorsk && !term.term.is_empty() {
            row.nynorsk = append_variant(&row.nynorsk, &term.term);
        }
        if !term.translation_nn.is_empty() {
            row.nynorsk = append_variant(&row.nynorsk, &term.translation_nn);
        }

        if term.stream == Stream::English && !term.term.is_empty() {
            row.english = append_variant(&row.english, &term.term);
        } else if row.english.is_empty() && !concept_en.is_empty() {
            row.english = concept_en.to_string();
        }

        if row.russian.is_empty() && !concept_ru.is_empty() {
            row.russian = concept_ru.to_string();
        }

        for tag in &term.tags {
            if !row.tags.contains(tag) {
                row.tags.push(tag.clone());
            }
        }
    }

    rows.sort_by_cached_key(GlossaryRow::sort_key);
    rows
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryFilter {
    pub letter: Option<String>,
    pub tag: Option<String>,
    pub search: String,
}

impl GlossaryFilter {
    pub fn matches(&self, row: &GlossaryRow) -> bool {
        if let Some(letter) = &self.letter {
            if &row.letter() != letter {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !row.tags.contains(tag) {
                return false;
            }
        }
        let q = self.search.trim().to_lowercase();
        q.is_empty() || row.columns().any(|value| value.to_lowercase().contains(&q))
    }
}

/// Concept rows with filter state and pager; any filter change or a new
/// term list returns to the first page.
#[derive(Debug, Clone)]
pub struct GlossaryBoard {
    rows: Vec<GlossaryRow>,
    filter: GlossaryFilter,
    pager: Pager,
}

impl Default for GlossaryBoard {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            filter: GlossaryFilter::default(),
            pager: Pager::new(TABLE_PAGE_SIZE),
        }
    }
}

impl GlossaryBoard {
    pub fn new(terms: &[GlossaryTerm]) -> Self {
        Self {
            rows: build_rows(terms),
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[GlossaryRow] {
        &self.rows
    }

    pub fn filter(&self) -> &GlossaryFilter {
        &self.filter
    }

    pub fn set_terms(&mut self, terms: &[GlossaryTerm]) {
        self.rows = build_rows(terms);
        self.pager.reset();
    }

    pub fn set_letter(&mut self, letter: Option<String>) {
        self.filter.letter = letter;
        self.pager.reset();
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.filter.tag = tag;
        self.pager.reset();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.pager.reset();
    }

    pub fn filtered(&self) -> Vec<&GlossaryRow> {
        self.rows.iter().filter(|r| self.filter.matches(r)).collect()
    }

    pub fn visible(&self) -> Vec<&GlossaryRow> {
        let filtered = self.filtered();
        let shown = self.pager.shown(filtered.len());
        filtered.into_iter().take(shown).collect()
    }

    pub fn load_more(&mut self) {
        let total = self.filtered().len();
        self.pager.load_more(total);
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more(self.filtered().len())
    }

    pub fn status(&self) -> String {
        self.pager.status(self.filtered().len())
    }

    /// Sorted unique tags over all rows
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .rows
            .iter()
            .flat_map(|r| r.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        tags.sort_by_cached_key(|t| collation_key(t));
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(id: u64, term: &str, stream: &str, extra: serde_json::Value) -> GlossaryTerm {
        let mut json = serde_json::json!({
            "id": id,
            "term": term,
            "stream": stream,
        });
        if let (Some(obj), Some(extra)) = (json.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                obj.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_append_variant() {
        assert_eq!(append_variant("", "hus"), "hus");
        assert_eq!(append_variant("hus", ""), "hus");
        assert_eq!(append_variant("hus", "hus"), "hus");
        assert_eq!(append_variant("hus / bolig", "bolig"), "hus / bolig");
        assert_eq!(append_variant("hus", "bolig"), "hus / bolig");
    }

    #[test]
    fn test_terms_merge_into_one_row() {
        let terms = vec![
            term(
                1,
                "hus",
                "bokmaal",
                serde_json::json!({"translation_en": "house", "translation_ru": "дом", "tags": ["hjem"]}),
            ),
            term(
                2,
                "hus",
                "nynorsk",
                serde_json::json!({"translation_en": "house", "translation_nb": "hus",
                                   "translation_ru": "дом", "tags": ["hjem", "bygg"]}),
            ),
            term(
                3,
                "house",
                "english",
                serde_json::json!({"translation_nb": "hus", "translation_ru": "дом"}),
            ),
        ];

        let rows = build_rows(&terms);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.bokmaal, "hus");
        assert_eq!(row.nynorsk, "hus");
        assert_eq!(row.english, "house");
        assert_eq!(row.russian, "дом");
        assert_eq!(row.tags, vec!["hjem", "bygg"]);
        assert_eq!(row.id, "house|hus|дом");
    }

    #[test]
    fn test_empty_key_is_dropped() {
        // Nynorsk term with no translations has no concept key
        let terms = vec![term(1, "kyrkje", "nynorsk", serde_json::json!({}))];
        assert!(build_rows(&terms).is_empty());
    }

    #[test]
    fn test_translation_nn_fills_nynorsk_column() {
        let terms = vec![term(
            1,
            "kirke",
            "bokmaal",
            serde_json::json!({"translation_en": "church", "translation_nn": "kyrkje"}),
        )];
        let rows = build_rows(&terms);
        assert_eq!(rows[0].nynorsk, "kyrkje");
        assert_eq!(rows[0].bokmaal, "kirke");
    }

    #[test]
    fn test_rows_sorted_by_headword() {
        let terms = vec![
            term(1, "vei", "bokmaal", serde_json::json!({"translation_en": "road"})),
            term(2, "Bil", "bokmaal", serde_json::json!({"translation_en": "car"})),
            term(3, "apple", "english", serde_json::json!({"translation_ru": "яблоко"})),
        ];
        let headwords: Vec<String> = build_rows(&terms)
            .iter()
            .map(|r| r.headword().to_string())
            .collect();
        assert_eq!(headwords, vec!["apple", "Bil", "vei"]);
    }

    #[test]
    fn test_rows_sorted_in_alphabet_order() {
        let terms = vec![
            term(1, "ål", "bokmaal", serde_json::json!({"translation_en": "eel"})),
            term(2, "zoo", "bokmaal", serde_json::json!({"translation_en": "zoo"})),
            term(3, "éclair", "bokmaal", serde_json::json!({"translation_en": "eclair"})),
        ];
        let headwords: Vec<String> = build_rows(&terms)
            .iter()
            .map(|r| r.headword().to_string())
            .collect();
        assert_eq!(headwords, vec!["éclair", "zoo", "ål"]);
    }

    #[test]
    fn test_row_letter() {
        let row = GlossaryRow {
            nynorsk: "øyre / øre".to_string(),
            ..Default::default()
        };
        assert_eq!(row.letter(), "Ø");
        assert_eq!(GlossaryRow::default().letter(), "");
    }

    #[test]
    fn test_board_filters_and_pages() {
        let mut terms: Vec<GlossaryTerm> = (0..20)
            .map(|i| {
                term(
                    i,
                    &format!("ord{}", i),
                    "bokmaal",
                    serde_json::json!({"translation_en": format!("word{}", i), "tags": ["a"]}),
                )
            })
            .collect();
        terms.push(term(
            99,
            "hytte",
            "bokmaal",
            serde_json::json!({"translation_en": "cabin", "tags": ["fritid"]}),
        ));

        let mut board = GlossaryBoard::new(&terms);
        assert_eq!(board.visible().len(), 15);
        assert_eq!(board.tags(), vec!["a", "fritid"]);

        board.set_search("CABIN");
        assert_eq!(board.filtered().len(), 1);

        board.set_search("");
        board.set_letter(Some("H".to_string()));
        assert_eq!(board.filtered().len(), 1);

        board.set_letter(None);
        board.set_tag(Some("a".to_string()));
        board.load_more();
        assert_eq!(board.visible().len(), 20);
        assert!(!board.has_more());
    }
}
