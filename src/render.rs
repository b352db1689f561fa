//! Plain-text rendering of content for the terminal

use std::fmt::Write as _;

use crate::catalog::{GlossaryRow, VerbForm};
use crate::domain::{
    Exercise, Expression, Homework, Material, ProfileInfo, Question, Reading,
    SubmissionResponse, Test, TestDetail, VerbEntry,
};
use crate::favorites::FavoriteSet;
use crate::i18n::{level_label, Lang};
use crate::quiz::{correct_display, selected_display, ReviewStatus};

/// Column-aligned text table
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) -> &mut Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let mut out = String::new();
        push_line(&mut out, &self.headers, &widths);
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total));
        out.push('\n');
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let _ = write!(line, "{:<width$}  ", cell, width = *width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Cut to `max` characters, marking the cut with "…"
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}

// ============================================
// TESTS
// ============================================

pub fn tests_table(tests: &[&Test]) -> String {
    let mut table = Table::new(["Slug", "Level", "Mode", "Questions", "Minutes", "Title"]);
    for test in tests {
        let title = if test.is_restricted {
            format!("{} (restricted)", test.title)
        } else {
            test.title.clone()
        };
        table.row([
            test.slug.clone(),
            test.level.to_string(),
            test.question_mode.to_string(),
            test.question_count.to_string(),
            test.estimated_minutes.to_string(),
            truncate(&title, 60),
        ]);
    }
    table.render()
}

/// One question with numbered options
pub fn question_block(number: usize, question: &Question) -> String {
    let mut out = format!(
        "{}. [{}] {}\n",
        number,
        question.question_type.badge(),
        question.text
    );
    for (i, option) in question.choices().iter().enumerate() {
        let _ = writeln!(out, "   {}) {}", i + 1, option.text);
    }
    out
}

pub fn test_detail(detail: &TestDetail, lang: Lang) -> String {
    let test = &detail.test;
    let mut out = format!("{}\n", test.title);
    let _ = writeln!(
        out,
        "{} · {} · {} questions · ~{} min",
        level_label(test.level, lang),
        test.stream.label(),
        detail.questions.len(),
        test.estimated_minutes
    );
    if !test.description.trim().is_empty() {
        let _ = writeln!(out, "\n{}", test.description.trim());
    }
    out.push('\n');
    for (i, question) in detail.questions.iter().enumerate() {
        out.push_str(&question_block(i + 1, question));
    }
    out
}

/// Score summary followed by per-question feedback
pub fn submission(detail: &TestDetail, response: &SubmissionResponse) -> String {
    let summary = &response.summary;
    let mut out = format!(
        "Score: {}   Percent: {}   Correct: {}   Incorrect: {}\n",
        crate::quiz::score_line(summary),
        crate::quiz::percent_label(summary),
        summary.correct,
        summary.incorrect
    );

    for (i, question) in detail.questions.iter().enumerate() {
        let Some(review) = crate::quiz::review_for(&response.review, question.id) else {
            continue;
        };
        let status = ReviewStatus::of(Some(review), false);
        let _ = writeln!(out, "\n{}. {} [{}]", i + 1, question.text, status.label());
        let _ = writeln!(out, "   Your answer:    {}", selected_display(review));
        let _ = writeln!(out, "   Correct answer: {}", correct_display(review));
        if !review.explanation.trim().is_empty() {
            let _ = writeln!(out, "   Explanation:    {}", review.explanation.trim());
        }
    }
    out
}

// ============================================
// VOCABULARY
// ============================================

pub fn verbs_table(verbs: &[&VerbEntry], favorites: &FavoriteSet, lang: Lang) -> String {
    let mut table = Table::new([
        "", "ID", "Infinitive", "Present", "Past", "Perfect", "Translation",
    ]);
    for verb in verbs {
        let translations = verb.translations();
        let translation = translations
            .select(lang)
            .map(|l| translations.get(l))
            .unwrap_or("");
        table.row([
            if favorites.contains(verb.id) { "★" } else { "" }.to_string(),
            verb.id.to_string(),
            or_dash(if verb.infinitive.is_empty() { &verb.verb } else { &verb.infinitive })
                .to_string(),
            or_dash(&verb.present).to_string(),
            or_dash(&verb.past).to_string(),
            or_dash(&verb.perfect).to_string(),
            truncate(translation, 40),
        ]);
    }
    table.render()
}

pub fn verb_detail(verb: &VerbEntry, lang: Lang, favorite: bool) -> String {
    let mut out = format!(
        "{}{} ({})\n",
        verb.verb,
        if favorite { " ★" } else { "" },
        verb.stream.label()
    );
    let translations = verb.translations();
    for l in translations.available() {
        let marker = if Some(l) == translations.select(lang) { "*" } else { " " };
        let _ = writeln!(out, " {}{}: {}", marker, l.short_label(), translations.get(l));
    }
    for form in VerbForm::all() {
        let _ = writeln!(out, "\n{}: {}", form.label(), or_dash(form.value(verb)));
        for example in form.examples(verb) {
            let _ = writeln!(out, "  - {}", example);
        }
    }
    if !verb.tags.is_empty() {
        let _ = writeln!(out, "\nTags: {}", verb.tags.join(", "));
    }
    out
}

pub fn glossary_table(rows: &[&GlossaryRow]) -> String {
    let mut table = Table::new(["Bokmål", "Nynorsk", "English", "Russian", "Tags"]);
    for row in rows {
        table.row([
            or_dash(&row.bokmaal).to_string(),
            or_dash(&row.nynorsk).to_string(),
            or_dash(&row.english).to_string(),
            or_dash(&row.russian).to_string(),
            row.tags.join(", "),
        ]);
    }
    table.render()
}

pub fn expressions_table(expressions: &[&Expression], lang: Lang) -> String {
    let mut table = Table::new(["Phrase", "Meaning", "Example"]);
    for expression in expressions {
        table.row([
            expression.phrase.clone(),
            truncate(or_dash(expression.meaning_for(lang).unwrap_or("")), 40),
            truncate(&expression.example, 50),
        ]);
    }
    table.render()
}

// ============================================
// READINGS
// ============================================

pub fn readings_table(readings: &[&Reading], lang: Lang) -> String {
    let mut table = Table::new(["Slug", "Level", "Stream", "Title", "Translations"]);
    for reading in readings {
        let langs: Vec<&str> = reading
            .translations()
            .available()
            .iter()
            .map(|l| l.short_label())
            .collect();
        table.row([
            reading.slug.clone(),
            reading.level.to_string(),
            reading.stream.label().to_string(),
            truncate(reading.title_for(lang), 50),
            langs.join(" "),
        ]);
    }
    table.render()
}

/// Reading text followed by the translation tab chosen for `lang`
pub fn reading_detail(reading: &Reading, lang: Lang) -> String {
    let mut out = format!(
        "{}\n{} · {}\n\n{}\n",
        reading.title_for(lang),
        level_label(reading.level, lang),
        reading.stream.label(),
        reading.body.trim()
    );
    let translations = reading.translations();
    match translations.select(lang) {
        Some(shown) => {
            let tabs: Vec<String> = translations
                .available()
                .iter()
                .map(|l| {
                    if *l == shown {
                        format!("[{}]", l.short_label())
                    } else {
                        l.short_label().to_string()
                    }
                })
                .collect();
            let _ = writeln!(out, "\nTranslation {}\n{}", tabs.join(" "), translations.get(shown).trim());
        }
        None => out.push_str("\nNo translation available.\n"),
    }
    out
}

// ============================================
// LIBRARY
// ============================================

pub fn materials_table(materials: &[&Material]) -> String {
    let mut table = Table::new(["ID", "Level", "Type", "Title", "Link"]);
    for material in materials {
        table.row([
            material.id.to_string(),
            material.level.to_string(),
            format!("{:?}", material.material_type).to_lowercase(),
            truncate(&material.title, 50),
            or_dash(&material.url).to_string(),
        ]);
    }
    table.render()
}

pub fn homework_table(homework: &[&Homework], now: chrono::DateTime<chrono::Utc>) -> String {
    let mut table = Table::new(["ID", "Level", "Due", "Status", "Title"]);
    for item in homework {
        let due = item
            .due_date
            .map(|d| {
                let date = d.format("%Y-%m-%d").to_string();
                if item.is_overdue(now) {
                    format!("{} (overdue)", date)
                } else {
                    date
                }
            })
            .unwrap_or_else(|| "-".to_string());
        table.row([
            item.id.to_string(),
            item.level.to_string(),
            due,
            format!("{:?}", item.status).to_lowercase(),
            truncate(&item.title, 50),
        ]);
    }
    table.render()
}

pub fn exercises_table(exercises: &[&Exercise]) -> String {
    let mut table = Table::new(["ID", "Level", "Kind", "Minutes", "Title"]);
    for exercise in exercises {
        table.row([
            exercise.id.to_string(),
            exercise.level.to_string(),
            format!("{:?}", exercise.kind).to_lowercase(),
            exercise.estimated_minutes.to_string(),
            truncate(&exercise.title, 50),
        ]);
    }
    table.render()
}

pub fn profile(profile: &ProfileInfo, lang: Lang) -> String {
    if !profile.is_authenticated {
        return format!(
            "Not signed in\nStream: {}\nLevel:  {}\n",
            profile.stream.label(),
            level_label(profile.level, lang)
        );
    }
    format!(
        "Signed in as {}{}\nStream: {}\nLevel:  {}\nStream changes: {}\n",
        profile.display_label(),
        if profile.is_teacher { " (teacher)" } else { "" },
        profile.stream.label(),
        level_label(profile.level, lang),
        if profile.allow_stream_change { "allowed" } else { "locked by teacher" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_aligns_unicode_columns() {
        let mut table = Table::new(["Ord", "Betydning"]);
        table.row(["ø", "island"]).row(["bøker", "books"]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Ord    Betydning");
        assert_eq!(lines[1], "----------------");
        assert_eq!(lines[2], "ø      island");
        assert_eq!(lines[3], "bøker  books");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("  kort ", 10), "kort");
        assert_eq!(truncate("en lang setning", 8), "en lang…");
    }

    #[test]
    fn test_question_block_hides_fill_options() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "id": 2, "text": "Jeg ___ norsk.", "question_type": "fill",
            "options": [{"id": 1, "text": "snakker"}]
        }))
        .unwrap();
        assert_eq!(question_block(3, &question), "3. [Fill] Jeg ___ norsk.\n");
    }

    #[test]
    fn test_reading_detail_marks_selected_tab() {
        let reading: Reading = serde_json::from_value(serde_json::json!({
            "id": 1, "title": "Hytta", "slug": "hytta", "level": "A2",
            "body": "Vi drar på hytta.", "translation_en": "We go to the cabin.",
            "translation_nb": "Vi drar på hytta."
        }))
        .unwrap();
        let text = reading_detail(&reading, Lang::Ru);
        assert!(text.contains("Translation [EN] NO"));
        assert!(text.contains("We go to the cabin."));
    }

    #[test]
    fn test_profile_signed_out() {
        let text = profile(&ProfileInfo::default(), Lang::En);
        assert!(text.starts_with("Not signed in"));
        assert!(text.contains("A1 — Beginner"));
    }
}
