//! Verb board: alphabet bar, tag pills, favorites view and search

use std::sync::OnceLock;

use regex::Regex;

use super::pager::{Pager, TABLE_PAGE_SIZE};
use super::{initial_letter, ALPHABET};
use crate::domain::{Tagged, VerbEntry};
use crate::favorites::FavoriteSet;

fn article_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(?:å|to)\s+").expect("valid article pattern"))
}

/// Drop a leading infinitive marker (`å`, `to`)
pub fn strip_article(value: &str) -> &str {
    match article_re().find(value) {
        Some(m) => value[m.end()..].trim(),
        None => value.trim(),
    }
}

/// Search form of a verb token: no article, lower-case
pub fn normalize(value: &str) -> String {
    strip_article(value).to_lowercase()
}

/// Whether any `/` or `,` separated token of `form` contains `query`
/// (`query` already normalized)
pub fn matches_search(form: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    form.split(['/', ','])
        .map(normalize)
        .any(|token| token.contains(query))
}

/// Alphabet letter a verb is filed under
pub fn starting_letter(verb: &VerbEntry) -> String {
    let base = [&verb.present, &verb.infinitive, &verb.verb]
        .into_iter()
        .find(|s| !s.is_empty())
        .map(|s| s.split('/').next().unwrap_or_default().trim())
        .unwrap_or_default();
    let cleaned = strip_article(base);

    initial_letter(cleaned)
        .or_else(|| initial_letter(&verb.verb))
        .unwrap_or_else(|| "A".to_string())
}

// ============================================
// FORMS
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerbForm {
    #[default]
    Infinitive,
    Present,
    Past,
    Perfect,
}

impl VerbForm {
    pub fn all() -> &'static [VerbForm] {
        &[
            VerbForm::Infinitive,
            VerbForm::Present,
            VerbForm::Past,
            VerbForm::Perfect,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            VerbForm::Infinitive => "Infinitive",
            VerbForm::Present => "Present",
            VerbForm::Past => "Past",
            VerbForm::Perfect => "Perfect",
        }
    }

    pub fn value<'a>(&self, verb: &'a VerbEntry) -> &'a str {
        match self {
            VerbForm::Infinitive => &verb.infinitive,
            VerbForm::Present => &verb.present,
            VerbForm::Past => &verb.past,
            VerbForm::Perfect => &verb.perfect,
        }
    }

    /// Non-empty trimmed example lines for this form
    pub fn examples<'a>(&self, verb: &'a VerbEntry) -> Vec<&'a str> {
        let raw = match self {
            VerbForm::Infinitive => &verb.examples_infinitive,
            VerbForm::Present => &verb.examples_present,
            VerbForm::Past => &verb.examples_past,
            VerbForm::Perfect => &verb.examples_perfect,
        };
        raw.split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl std::str::FromStr for VerbForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "infinitive" | "inf" => Ok(VerbForm::Infinitive),
            "present" | "pres" => Ok(VerbForm::Present),
            "past" => Ok(VerbForm::Past),
            "perfect" | "perf" => Ok(VerbForm::Perfect),
            other => Err(format!(
                "Unknown verb form: {}. Use: infinitive, present, past, perfect",
                other
            )),
        }
    }
}

// ============================================
// FILTER
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerbView {
    #[default]
    All,
    Favorites,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerbFilter {
    /// `None` means all letters
    pub letter: Option<String>,
    /// `None` means all tags
    pub tag: Option<String>,
    pub view: VerbView,
    pub search: String,
}

impl VerbFilter {
    pub fn matches(&self, verb: &VerbEntry, favorites: &FavoriteSet) -> bool {
        if let Some(letter) = &self.letter {
            if &starting_letter(verb) != letter {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !verb.has_tag(tag) {
                return false;
            }
        }
        if self.view == VerbView::Favorites && !favorites.contains(verb.id) {
            return false;
        }

        let query = normalize(&self.search);
        [
            &verb.infinitive,
            &verb.present,
            &verb.past,
            &verb.perfect,
            &verb.verb,
        ]
        .iter()
        .any(|form| matches_search(form, &query))
    }
}

/// Verb list with its filter state and pager
///
/// Changing the tag or the view clears the letter; any filter change or a
/// new verb list returns the pager to its first page.
#[derive(Debug, Clone)]
pub struct VerbBoard {
    verbs: Vec<VerbEntry>,
    filter: VerbFilter,
    pager: Pager,
}

impl Default for VerbBoard {
    fn default() -> Self {
        Self {
            verbs: Vec::new(),
            filter: VerbFilter::default(),
            pager: Pager::new(TABLE_PAGE_SIZE),
        }
    }
}

impl VerbBoard {
    pub fn new(verbs: Vec<VerbEntry>) -> Self {
        Self {
            verbs,
            ..Self::default()
        }
    }

    pub fn verbs(&self) -> &[VerbEntry] {
        &self.verbs
    }

    pub fn filter(&self) -> &VerbFilter {
        &self.filter
    }

    pub fn set_verbs(&mut self, verbs: Vec<VerbEntry>) {
        self.verbs = verbs;
        self.pager.reset();
    }

    pub fn set_letter(&mut self, letter: Option<String>) {
        self.filter.letter = letter;
        self.pager.reset();
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.filter.tag = tag;
        self.filter.letter = None;
        self.pager.reset();
    }

    pub fn set_view(&mut self, view: VerbView) {
        self.filter.view = view;
        self.filter.letter = None;
        self.pager.reset();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.pager.reset();
    }

    pub fn filtered(&self, favorites: &FavoriteSet) -> Vec<&VerbEntry> {
        self.verbs
            .iter()
            .filter(|v| self.filter.matches(v, favorites))
            .collect()
    }

    pub fn visible(&self, favorites: &FavoriteSet) -> Vec<&VerbEntry> {
        let filtered = self.filtered(favorites);
        let shown = self.pager.shown(filtered.len());
        filtered.into_iter().take(shown).collect()
    }

    pub fn load_more(&mut self, favorites: &FavoriteSet) {
        let total = self.filtered(favorites).len();
        self.pager.load_more(total);
    }

    pub fn has_more(&self, favorites: &FavoriteSet) -> bool {
        self.pager.has_more(self.filtered(favorites).len())
    }

    pub fn status(&self, favorites: &FavoriteSet) -> String {
        self.pager.status(self.filtered(favorites).len())
    }

    pub fn tags(&self) -> Vec<String> {
        super::tags::collect_tags(&self.verbs)
    }

    /// Whether some verb under the active tag is filed under `letter`
    pub fn letter_available(&self, letter: &str) -> bool {
        self.verbs.iter().any(|verb| {
            let tag_ok = self
                .filter
                .tag
                .as_deref()
                .map(|t| verb.has_tag(t))
                .unwrap_or(true);
            tag_ok && starting_letter(verb) == letter
        })
    }

    /// Alphabet bar entries with their enabled state
    pub fn alphabet(&self) -> Vec<(&'static str, bool)> {
        ALPHABET
            .iter()
            .map(|letter| (*letter, self.letter_available(letter)))
            .collect()
    }

    pub fn find(&self, id: u64) -> Option<&VerbEntry> {
        self.verbs.iter().find(|v| v.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verb(id: u64, verb: &str, present: &str, tags: &[&str]) -> VerbEntry {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "verb": verb,
            "infinitive": verb,
            "present": present,
            "past": "",
            "perfect": "",
            "tags": tags,
        }))
        .unwrap()
    }

    #[test]
    fn test_starting_letter_prefers_present() {
        assert_eq!(starting_letter(&verb(1, "å snakke", "snakker", &[])), "S");
        assert_eq!(starting_letter(&verb(2, "å øve", "", &[])), "Ø");
        assert_eq!(starting_letter(&verb(3, "to ask", "", &[])), "A");
        // Alternatives: only the first one counts
        assert_eq!(starting_letter(&verb(4, "å gå", "går / gikk", &[])), "G");
    }

    #[test]
    fn test_starting_letter_fallbacks() {
        assert_eq!(starting_letter(&verb(1, "123", "", &[])), "1");
        let mut empty = verb(2, "", "", &[]);
        empty.infinitive.clear();
        assert_eq!(starting_letter(&empty), "A");
    }

    #[test]
    fn test_strip_article() {
        assert_eq!(strip_article("å være"), "være");
        assert_eq!(strip_article("Å   VÆRE "), "VÆRE");
        assert_eq!(strip_article("To be"), "be");
        assert_eq!(strip_article("åpne"), "åpne");
        assert_eq!(normalize("Å Lese"), "lese");
    }

    #[test]
    fn test_matches_search_tokens() {
        assert!(matches_search("å gå / går", "går"));
        assert!(matches_search("lå, ligget", "ligg"));
        assert!(!matches_search("snakker", "gå"));
        assert!(matches_search("anything", ""));
    }

    #[test]
    fn test_filter_combines_letter_tag_view_and_search() {
        let verbs = vec![
            verb(1, "å snakke", "snakker", &["hverdag"]),
            verb(2, "å skrive", "skriver", &["skole"]),
            verb(3, "å lese", "leser", &["skole"]),
        ];
        let favorites = FavoriteSet::from_ids([2, 3]);
        let mut board = VerbBoard::new(verbs);

        board.set_tag(Some("skole".to_string()));
        assert_eq!(board.filtered(&favorites).len(), 2);

        board.set_letter(Some("S".to_string()));
        let ids: Vec<u64> = board.filtered(&favorites).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![2]);

        board.set_view(VerbView::Favorites);
        // View change clears the letter
        assert_eq!(board.filter().letter, None);
        assert_eq!(board.filtered(&favorites).len(), 2);

        board.set_search("Å les");
        let ids: Vec<u64> = board.filtered(&favorites).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_tag_change_resets_letter_and_pager() {
        let verbs: Vec<VerbEntry> = (0..40)
            .map(|i| verb(i, &format!("å spise{}", i), "spiser", &["mat"]))
            .collect();
        let favorites = FavoriteSet::new();
        let mut board = VerbBoard::new(verbs);

        board.set_letter(Some("S".to_string()));
        board.load_more(&favorites);
        assert_eq!(board.visible(&favorites).len(), 30);

        board.set_tag(Some("mat".to_string()));
        assert_eq!(board.filter().letter, None);
        assert_eq!(board.visible(&favorites).len(), 15);
        assert_eq!(board.status(&favorites), "Showing 15 of 40");
    }

    #[test]
    fn test_letter_availability_follows_tag() {
        let board_verbs = vec![
            verb(1, "å bo", "bor", &["hjem"]),
            verb(2, "å kjøpe", "kjøper", &["butikk"]),
        ];
        let mut board = VerbBoard::new(board_verbs);
        assert!(board.letter_available("B"));
        assert!(board.letter_available("K"));

        board.set_tag(Some("butikk".to_string()));
        assert!(!board.letter_available("B"));
        assert!(board.letter_available("K"));

        let enabled: Vec<&str> = board
            .alphabet()
            .into_iter()
            .filter(|(_, on)| *on)
            .map(|(l, _)| l)
            .collect();
        assert_eq!(enabled, vec!["K"]);
        assert_eq!(board.tags(), vec!["butikk", "hjem"]);
    }

    #[test]
    fn test_examples_for_form() {
        let mut entry = verb(1, "å spise", "spiser", &[]);
        entry.examples_present = "Jeg spiser frokost.\n\n  Hun spiser nå.  \n".to_string();
        assert_eq!(
            VerbForm::Present.examples(&entry),
            vec!["Jeg spiser frokost.", "Hun spiser nå."]
        );
        assert!(VerbForm::Past.examples(&entry).is_empty());
        assert_eq!(VerbForm::Present.value(&entry), "spiser");
    }
}
