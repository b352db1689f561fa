//! CSV export
//!
//! Writes fetched content in the same column layout the backend's import
//! templates use, so an exported file can be edited and re-imported by a
//! teacher.

use std::io::Write;

use thiserror::Error;

use crate::catalog::GlossaryRow;
use crate::domain::{Expression, GlossaryTerm, Reading, VerbEntry};

/// Multi-line example cells are flattened with this separator
pub const EXAMPLE_SEPARATOR: &str = " | ";

/// Tag lists are joined with this separator
pub const TAG_SEPARATOR: &str = ";";

pub const VERB_HEADER: [&str; 14] = [
    "verb",
    "stream",
    "infinitive",
    "present",
    "past",
    "perfect",
    "examples_infinitive",
    "examples_present",
    "examples_past",
    "examples_perfect",
    "translation_en",
    "translation_ru",
    "translation_nb",
    "tags",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What `norskkurs export` can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Verbs,
    Glossary,
    GlossaryRows,
    Readings,
    Expressions,
}

impl std::str::FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verbs" => Ok(ExportKind::Verbs),
            "glossary" => Ok(ExportKind::Glossary),
            "glossary-rows" | "concepts" => Ok(ExportKind::GlossaryRows),
            "readings" => Ok(ExportKind::Readings),
            "expressions" => Ok(ExportKind::Expressions),
            other => Err(format!(
                "Unknown export: {}. Use: verbs, glossary, glossary-rows, readings, expressions",
                other
            )),
        }
    }
}

fn flatten_examples(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', EXAMPLE_SEPARATOR)
}

fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

/// Verb template: UTF-8 BOM, then the import header
pub fn write_verbs<W: Write>(mut out: W, verbs: &[VerbEntry]) -> Result<usize, ExportError> {
    out.write_all("\u{feff}".as_bytes())?;
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(VERB_HEADER)?;
    for verb in verbs {
        writer.write_record([
            verb.verb.as_str(),
            verb.stream.as_str(),
            verb.infinitive.as_str(),
            verb.present.as_str(),
            verb.past.as_str(),
            verb.perfect.as_str(),
            flatten_examples(&verb.examples_infinitive).as_str(),
            flatten_examples(&verb.examples_present).as_str(),
            flatten_examples(&verb.examples_past).as_str(),
            flatten_examples(&verb.examples_perfect).as_str(),
            verb.translation_en.as_str(),
            verb.translation_ru.as_str(),
            verb.translation_nb.as_str(),
            join_tags(&verb.tags).as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(verbs.len())
}

/// Raw glossary terms, one per stream
pub fn write_glossary<W: Write>(out: W, terms: &[GlossaryTerm]) -> Result<usize, ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "term",
        "translation",
        "translation_en",
        "translation_ru",
        "translation_nb",
        "translation_nn",
        "explanation",
        "stream",
        "level",
        "tags",
    ])?;
    for term in terms {
        writer.write_record([
            term.term.as_str(),
            term.translation.as_str(),
            term.translation_en.as_str(),
            term.translation_ru.as_str(),
            term.translation_nb.as_str(),
            term.translation_nn.as_str(),
            term.explanation.as_str(),
            term.stream.as_str(),
            term.level.as_str(),
            join_tags(&term.tags).as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(terms.len())
}

/// Merged concept rows as shown in the glossary table
pub fn write_glossary_rows<W: Write>(out: W, rows: &[GlossaryRow]) -> Result<usize, ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["bokmaal", "nynorsk", "english", "russian", "tags"])?;
    for row in rows {
        writer.write_record([
            row.bokmaal.as_str(),
            row.nynorsk.as_str(),
            row.english.as_str(),
            row.russian.as_str(),
            join_tags(&row.tags).as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Readings with every translation column; Russian falls back to the
/// legacy `translation` field
pub fn write_readings<W: Write>(out: W, readings: &[Reading]) -> Result<usize, ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "slug",
        "title",
        "stream",
        "level",
        "tags",
        "body",
        "translation_en",
        "translation_nb",
        "translation_nn",
        "translation_ru",
        "is_published",
    ])?;
    for reading in readings {
        // Older servers keep the Russian text in the legacy `translation` field
        let translations = reading.translations();
        writer.write_record([
            reading.slug.as_str(),
            reading.title.as_str(),
            reading.stream.as_str(),
            reading.level.as_str(),
            join_tags(&reading.tags).as_str(),
            reading.body.as_str(),
            translations.en,
            translations.nb,
            translations.nn,
            translations.ru,
            if reading.is_published { "1" } else { "0" },
        ])?;
    }
    writer.flush()?;
    Ok(readings.len())
}

/// Expressions, Russian meaning falling back to the legacy `meaning`
pub fn write_expressions<W: Write>(
    out: W,
    expressions: &[Expression],
) -> Result<usize, ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "phrase",
        "meaning_en",
        "meaning_nb",
        "meaning_nn",
        "meaning_ru",
        "example",
        "stream",
        "tags",
    ])?;
    for expression in expressions {
        writer.write_record([
            expression.phrase.as_str(),
            expression.meaning_en.as_str(),
            expression.meaning_nb.as_str(),
            expression.meaning_nn.as_str(),
            expression.meanings().ru,
            expression.example.as_str(),
            expression.stream.as_str(),
            join_tags(&expression.tags).as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(expressions.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verb() -> VerbEntry {
        serde_json::from_value(serde_json::json!({
            "id": 1, "verb": "å spise", "stream": "bokmaal",
            "infinitive": "å spise", "present": "spiser", "past": "spiste", "perfect": "har spist",
            "examples_present": "Jeg spiser.\nHun spiser, han drikker.",
            "translation_en": "to eat", "tags": ["mat", "hverdag"]
        }))
        .unwrap()
    }

    #[test]
    fn test_verb_template() {
        let mut out = Vec::new();
        let count = write_verbs(&mut out, &[verb()]).unwrap();
        assert_eq!(count, 1);

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\u{feff}verb,stream,infinitive,present,past,perfect,examples_infinitive,\
             examples_present,examples_past,examples_perfect,translation_en,translation_ru,\
             translation_nb,tags"
        );
        assert_eq!(
            lines.next().unwrap(),
            "å spise,bokmaal,å spise,spiser,spiste,har spist,,\
             \"Jeg spiser. | Hun spiser, han drikker.\",,,to eat,,,mat;hverdag"
        );
    }

    #[test]
    fn test_readings_publish_flag() {
        let reading: Reading = serde_json::from_value(serde_json::json!({
            "id": 1, "title": "Hytta", "slug": "hytta", "level": "A2",
            "body": "Vi drar.", "is_published": false
        }))
        .unwrap();

        let mut out = Vec::new();
        write_readings(&mut out, &[reading]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().nth(1).unwrap().ends_with(",0"));
    }

    #[test]
    fn test_export_kind_parse() {
        assert_eq!("Verbs".parse::<ExportKind>().unwrap(), ExportKind::Verbs);
        assert_eq!("concepts".parse::<ExportKind>().unwrap(), ExportKind::GlossaryRows);
        assert!("tests".parse::<ExportKind>().is_err());
    }

    #[test]
    fn test_readings_translation_columns() {
        let reading: Reading = serde_json::from_value(serde_json::json!({
            "id": 2, "title": "Hytta", "slug": "hytta", "level": "A2",
            "body": "Vi har en hytte.",
            "translation_en": "We have a cabin.",
            "translation_ru": "У нас есть домик."
        }))
        .unwrap();

        let mut out = Vec::new();
        write_readings(&mut out, &[reading]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "slug,title,stream,level,tags,body,translation_en,translation_nb,translation_nn,\
             translation_ru,is_published"
        );
        assert_eq!(
            lines.next().unwrap(),
            "hytta,Hytta,bokmaal,A2,,Vi har en hytte.,We have a cabin.,,,У нас есть домик.,1"
        );
    }

    #[test]
    fn test_readings_legacy_translation_is_russian() {
        let reading: Reading = serde_json::from_value(serde_json::json!({
            "id": 3, "title": "Byen", "slug": "byen",
            "translation": "Город"
        }))
        .unwrap();

        let mut out = Vec::new();
        write_readings(&mut out, &[reading]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().nth(1).unwrap().ends_with(",Город,1"));
    }

    #[test]
    fn test_glossary_terms_columns_and_quoting() {
        let term: GlossaryTerm = serde_json::from_value(serde_json::json!({
            "id": 4, "term": "hus", "translation_en": "house, home",
            "translation_nn": "hus", "explanation": "Sa \"hei\"",
            "stream": "bokmaal", "level": "A1", "tags": ["bolig", "hverdag"]
        }))
        .unwrap();

        let mut out = Vec::new();
        assert_eq!(write_glossary(&mut out, &[term]).unwrap(), 1);
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "term,translation,translation_en,translation_ru,translation_nb,translation_nn,\
             explanation,stream,level,tags"
        );
        assert_eq!(
            lines.next().unwrap(),
            "hus,,\"house, home\",,,hus,\"Sa \"\"hei\"\"\",bokmaal,A1,bolig;hverdag"
        );
    }

    #[test]
    fn test_glossary_rows_columns() {
        let row = GlossaryRow {
            id: "house|hus|дом".to_string(),
            bokmaal: "hus".to_string(),
            nynorsk: "hus".to_string(),
            english: "house / home, dwelling".to_string(),
            russian: "дом".to_string(),
            tags: vec!["bolig".to_string()],
        };

        let mut out = Vec::new();
        assert_eq!(write_glossary_rows(&mut out, &[row]).unwrap(), 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "bokmaal,nynorsk,english,russian,tags\n\
             hus,hus,\"house / home, dwelling\",дом,bolig\n"
        );
    }

    #[test]
    fn test_expressions_columns_and_legacy_meaning() {
        let expression: Expression = serde_json::from_value(serde_json::json!({
            "id": 5, "phrase": "Det er ikke min kopp te",
            "meaning": "Не моё", "meaning_en": "Not my cup of tea",
            "example": "Jazz? \"Det er ikke min kopp te.\"",
            "stream": "bokmaal", "tags": ["idiom"]
        }))
        .unwrap();

        let mut out = Vec::new();
        assert_eq!(write_expressions(&mut out, &[expression]).unwrap(), 1);
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "phrase,meaning_en,meaning_nb,meaning_nn,meaning_ru,example,stream,tags"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Det er ikke min kopp te,Not my cup of tea,,,Не моё,\
             \"Jazz? \"\"Det er ikke min kopp te.\"\"\",bokmaal,idiom"
        );
    }
}
