//! Languages and translation toggling
//!
//! Content carries up to four translations (English, Bokmål, Nynorsk,
//! Russian). The UI itself is offered in English, Bokmål and Russian.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{Level, ParseEnumError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Nb,
    Nn,
    Ru,
}

impl Lang {
    /// Tab order for translations
    pub fn all() -> &'static [Lang] {
        &[Lang::En, Lang::Nb, Lang::Nn, Lang::Ru]
    }

    /// Languages the interface can be switched to
    pub fn ui_languages() -> &'static [Lang] {
        &[Lang::En, Lang::Nb, Lang::Ru]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Nb => "nb",
            Lang::Nn => "nn",
            Lang::Ru => "ru",
        }
    }

    /// Short button label
    pub fn short_label(&self) -> &'static str {
        match self {
            Lang::En => "EN",
            Lang::Nb => "NO",
            Lang::Nn => "NN",
            Lang::Ru => "RU",
        }
    }

    /// Language to borrow strings from when this one has no table
    fn fallback(&self) -> Lang {
        match self {
            Lang::Nn => Lang::Nb,
            _ => Lang::En,
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Lang {
    type Err = ParseEnumError;

    /// Accepts bare and region-tagged codes (`nb`, `nb-NO`, `no`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match primary.as_str() {
            "en" => Ok(Lang::En),
            "nb" | "no" => Ok(Lang::Nb),
            "nn" => Ok(Lang::Nn),
            "ru" => Ok(Lang::Ru),
            _ => Err(ParseEnumError {
                kind: "language",
                value: s.to_string(),
            }),
        }
    }
}

/// One field in every content language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalizedText<'a> {
    pub en: &'a str,
    pub nb: &'a str,
    pub nn: &'a str,
    pub ru: &'a str,
}

impl<'a> LocalizedText<'a> {
    pub fn get(&self, lang: Lang) -> &'a str {
        match lang {
            Lang::En => self.en,
            Lang::Nb => self.nb,
            Lang::Nn => self.nn,
            Lang::Ru => self.ru,
        }
    }

    pub fn has(&self, lang: Lang) -> bool {
        !self.get(lang).trim().is_empty()
    }

    /// Languages with a non-blank translation, in tab order
    pub fn available(&self) -> Vec<Lang> {
        Lang::all().iter().copied().filter(|l| self.has(*l)).collect()
    }

    /// Tab to show: the preferred language, else English, else the first
    /// available one. `None` when there is no translation at all.
    pub fn select(&self, preferred: Lang) -> Option<Lang> {
        if self.has(preferred) {
            return Some(preferred);
        }
        if self.has(Lang::En) {
            return Some(Lang::En);
        }
        self.available().into_iter().next()
    }
}

/// Level label such as "A1 — Beginner"
pub fn level_label(level: Level, lang: Lang) -> &'static str {
    match (lang, level) {
        (Lang::En, Level::A1) => "A1 — Beginner",
        (Lang::En, Level::A2) => "A2 — Elementary",
        (Lang::En, Level::B1) => "B1 — Intermediate",
        (Lang::En, Level::B2) => "B2 — Upper intermediate",
        (Lang::Nb, Level::A1) => "A1 — Nybegynner",
        (Lang::Nb, Level::A2) => "A2 — Grunnleggende",
        (Lang::Nb, Level::B1) => "B1 — Mellomnivå",
        (Lang::Nb, Level::B2) => "B2 — Høyere mellomnivå",
        (other, level) => level_label(level, other.fallback()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text<'a>(en: &'a str, nb: &'a str, nn: &'a str, ru: &'a str) -> LocalizedText<'a> {
        LocalizedText { en, nb, nn, ru }
    }

    #[test]
    fn test_select_preferred_when_present() {
        let t = text("The cabin", "Hytta", "Hytta", "Дача");
        assert_eq!(t.select(Lang::Ru), Some(Lang::Ru));
        assert_eq!(t.select(Lang::Nn), Some(Lang::Nn));
    }

    #[test]
    fn test_select_falls_back_to_english() {
        let t = text("The cabin", "Hytta", "", "");
        assert_eq!(t.select(Lang::Ru), Some(Lang::En));
        assert_eq!(t.select(Lang::Nn), Some(Lang::En));
    }

    #[test]
    fn test_select_falls_back_to_first_available() {
        let t = text("", "", "  ", "Дача");
        assert_eq!(t.available(), vec![Lang::Ru]);
        assert_eq!(t.select(Lang::Nb), Some(Lang::Ru));
    }

    #[test]
    fn test_select_none_without_translations() {
        assert_eq!(LocalizedText::default().select(Lang::En), None);
    }

    #[test]
    fn test_parse_region_tagged_codes() {
        assert_eq!("nb-NO".parse::<Lang>().unwrap(), Lang::Nb);
        assert_eq!("no".parse::<Lang>().unwrap(), Lang::Nb);
        assert_eq!("RU".parse::<Lang>().unwrap(), Lang::Ru);
        assert!("de".parse::<Lang>().is_err());
    }

    #[test]
    fn test_level_label_fallback() {
        assert_eq!(level_label(Level::B1, Lang::Nb), "B1 — Mellomnivå");
        assert_eq!(level_label(Level::B1, Lang::Nn), "B1 — Mellomnivå");
        assert_eq!(level_label(Level::A1, Lang::Ru), "A1 — Beginner");
    }
}
