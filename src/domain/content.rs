//! Content DTOs
//!
//! Snapshots of the backend's JSON responses. The client never owns
//! authoritative state; these are cached copies for rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::types::{
    ExerciseKind, HomeworkStatus, Level, MaterialType, QuestionMode, QuestionType, Stream,
};
use crate::i18n::{Lang, LocalizedText};

/// Treat `null` the same as a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Anything carrying a free-form tag list
pub trait Tagged {
    fn tags(&self) -> &[String];

    fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}

macro_rules! impl_tagged {
    ($($ty:ty),* $(,)?) => {
        $(impl Tagged for $ty {
            fn tags(&self) -> &[String] {
                &self.tags
            }
        })*
    };
}

// ============================================
// TESTS
// ============================================

/// Placement test as listed by `GET tests/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Test {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    pub level: Level,
    #[serde(default)]
    pub stream: Stream,
    #[serde(default)]
    pub estimated_minutes: u32,
    #[serde(default)]
    pub question_count: u32,
    pub question_mode: QuestionMode,
    #[serde(default)]
    pub is_restricted: bool,
}

/// One selectable answer of a single-choice question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerOption {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: u64,
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub order: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Options offered to the learner; fill-in questions offer none
    pub fn choices(&self) -> &[AnswerOption] {
        match self.question_type {
            QuestionType::Single => &self.options,
            QuestionType::Fill => &[],
        }
    }

    pub fn option_text(&self, option_id: u64) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.id == option_id)
            .map(|o| o.text.as_str())
    }
}

/// Test with its questions, from `GET tests/{slug}/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestDetail {
    #[serde(flatten)]
    pub test: Test,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl TestDetail {
    pub fn question(&self, id: u64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// Answer to one question as posted to `tests/{slug}/submit/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerPayload {
    pub question: u64,
    pub selected_option: Option<u64>,
    #[serde(default)]
    pub text_response: String,
}

/// Body of a submission
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmitRequest {
    pub answers: Vec<AnswerPayload>,
    pub name: String,
    pub email: String,
    pub locale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionSummary {
    pub score: u32,
    pub total_questions: u32,
    pub percent: f64,
    pub correct: u32,
    pub incorrect: u32,
}

/// Stored submission echoed back by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionRecord {
    pub id: u64,
    #[serde(default)]
    pub test: Option<u64>,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    pub score: u32,
    pub total_questions: u32,
    pub percent: f64,
    pub created_at: DateTime<Utc>,
}

/// Per-question scoring feedback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionReview {
    pub question: u64,
    #[serde(default)]
    pub order: u32,
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub selected_text: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub correct_answers: Vec<String>,
    pub is_correct: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionResponse {
    pub summary: SubmissionSummary,
    pub submission: SubmissionRecord,
    #[serde(default, deserialize_with = "nullable")]
    pub review: Vec<QuestionReview>,
}

// ============================================
// PROFILE
// ============================================

/// Session info from `GET profile/me/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProfileInfo {
    #[serde(default)]
    pub is_teacher: bool,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    #[serde(default, deserialize_with = "nullable")]
    pub display_name: String,
    #[serde(default)]
    pub stream: Stream,
    #[serde(default)]
    pub level: Level,
    #[serde(default = "default_true")]
    pub allow_stream_change: bool,
}

fn default_true() -> bool {
    true
}

impl ProfileInfo {
    /// Name shown in the header chip
    pub fn display_label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

/// Student record returned by `POST profile/stream/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentProfile {
    pub email: String,
    pub stream: Stream,
    pub level: Level,
    #[serde(default = "default_true")]
    pub allow_stream_change: bool,
    #[serde(default)]
    pub teacher: Option<u64>,
}

/// Body of `POST profile/stream/`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StreamUpdate {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<Stream>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
}

// ============================================
// LIBRARY
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub id: u64,
    pub title: String,
    pub stream: Stream,
    pub level: Level,
    #[serde(default)]
    pub material_type: MaterialType,
    #[serde(default, deserialize_with = "nullable")]
    pub body: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub assigned_to_email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Homework {
    pub id: u64,
    pub title: String,
    pub stream: Stream,
    pub level: Level,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable")]
    pub instructions: String,
    #[serde(default, deserialize_with = "nullable")]
    pub attachments: Vec<serde_json::Value>,
    #[serde(default)]
    pub status: HomeworkStatus,
    #[serde(default)]
    pub assigned_to_email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub student_submission: String,
    #[serde(default, deserialize_with = "nullable")]
    pub feedback: String,
    #[serde(default)]
    pub teacher: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Homework {
    /// Past its due date (homework without a due date never is)
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.map(|due| due < now).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: u64,
    pub title: String,
    pub stream: Stream,
    pub level: Level,
    #[serde(default)]
    pub kind: ExerciseKind,
    #[serde(default, deserialize_with = "nullable")]
    pub prompt: String,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub estimated_minutes: u32,
    #[serde(default)]
    pub assigned_to_email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ============================================
// VOCABULARY
// ============================================

/// Verb conjugation table row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerbEntry {
    pub id: u64,
    pub verb: String,
    #[serde(default)]
    pub stream: Stream,
    #[serde(default, deserialize_with = "nullable")]
    pub infinitive: String,
    #[serde(default, deserialize_with = "nullable")]
    pub present: String,
    #[serde(default, deserialize_with = "nullable")]
    pub past: String,
    #[serde(default, deserialize_with = "nullable")]
    pub perfect: String,
    #[serde(default, deserialize_with = "nullable")]
    pub examples_infinitive: String,
    #[serde(default, deserialize_with = "nullable")]
    pub examples_present: String,
    #[serde(default, deserialize_with = "nullable")]
    pub examples_past: String,
    #[serde(default, deserialize_with = "nullable")]
    pub examples_perfect: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation_en: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation_ru: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation_nb: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
}

impl VerbEntry {
    pub fn translations(&self) -> LocalizedText<'_> {
        LocalizedText {
            en: &self.translation_en,
            nb: &self.translation_nb,
            nn: "",
            ru: &self.translation_ru,
        }
    }
}

/// Idiomatic expression
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expression {
    pub id: u64,
    pub phrase: String,
    /// Legacy single meaning, holds the Russian text on older servers
    #[serde(default, deserialize_with = "nullable")]
    pub meaning: String,
    #[serde(default, deserialize_with = "nullable")]
    pub meaning_en: String,
    #[serde(default, deserialize_with = "nullable")]
    pub meaning_nb: String,
    #[serde(default, deserialize_with = "nullable")]
    pub meaning_nn: String,
    #[serde(default, deserialize_with = "nullable")]
    pub meaning_ru: String,
    #[serde(default, deserialize_with = "nullable")]
    pub example: String,
    #[serde(default)]
    pub stream: Stream,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
}

impl Expression {
    pub fn meanings(&self) -> LocalizedText<'_> {
        LocalizedText {
            en: &self.meaning_en,
            nb: &self.meaning_nb,
            nn: &self.meaning_nn,
            ru: if self.meaning_ru.trim().is_empty() {
                &self.meaning
            } else {
                &self.meaning_ru
            },
        }
    }

    /// Meaning in `lang`, falling back like the translation tabs do
    pub fn meaning_for(&self, lang: Lang) -> Option<&str> {
        let meanings = self.meanings();
        meanings.select(lang).map(|l| meanings.get(l))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlossaryTerm {
    pub id: u64,
    pub term: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation_en: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation_ru: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation_nn: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation_nb: String,
    #[serde(default, deserialize_with = "nullable")]
    pub explanation: String,
    #[serde(default)]
    pub stream: Stream,
    #[serde(default)]
    pub level: Level,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
}

/// Graded reading text with per-language titles and translations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title_en: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title_nb: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title_nn: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title_ru: String,
    pub slug: String,
    #[serde(default)]
    pub stream: Stream,
    #[serde(default)]
    pub level: Level,
    #[serde(default, deserialize_with = "nullable")]
    pub body: String,
    /// Legacy single translation, holds the Russian text on older servers
    #[serde(default, deserialize_with = "nullable")]
    pub translation: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation_en: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation_nb: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation_nn: String,
    #[serde(default, deserialize_with = "nullable")]
    pub translation_ru: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Reading {
    pub fn translations(&self) -> LocalizedText<'_> {
        LocalizedText {
            en: &self.translation_en,
            nb: &self.translation_nb,
            nn: &self.translation_nn,
            ru: if self.translation_ru.trim().is_empty() {
                &self.translation
            } else {
                &self.translation_ru
            },
        }
    }

    /// Title in `lang`, or the base title when that language has none
    pub fn title_for(&self, lang: Lang) -> &str {
        let localized = match lang {
            Lang::En => &self.title_en,
            Lang::Nb => &self.title_nb,
            Lang::Nn => &self.title_nn,
            Lang::Ru => &self.title_ru,
        };
        if localized.trim().is_empty() {
            &self.title
        } else {
            localized
        }
    }
}

impl_tagged!(Material, Exercise, VerbEntry, Expression, GlossaryTerm, Reading);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_flattens_test_fields() {
        let json = serde_json::json!({
            "id": 3,
            "title": "A1 basics",
            "slug": "a1-basics",
            "description": "Start here",
            "level": "A1",
            "stream": "bokmaal",
            "estimated_minutes": 10,
            "question_count": 2,
            "question_mode": "mixed",
            "is_restricted": false,
            "questions": [
                {"id": 1, "text": "Hva heter du?", "question_type": "single", "order": 1,
                 "options": [{"id": 11, "text": "Jeg heter Ola", "order": 1}]},
                {"id": 2, "text": "Jeg ___ norsk.", "question_type": "fill", "order": 2,
                 "options": [{"id": 21, "text": "snakker", "order": 1}]}
            ]
        });

        let detail: TestDetail = serde_json::from_value(json).unwrap();
        assert_eq!(detail.test.slug, "a1-basics");
        assert_eq!(detail.test.question_mode, QuestionMode::Mixed);
        assert_eq!(detail.questions.len(), 2);
        assert_eq!(detail.questions[0].choices().len(), 1);
        // Fill-in options are answer keys and never offered as choices
        assert!(detail.questions[1].choices().is_empty());
    }

    #[test]
    fn test_null_tags_decode_as_empty() {
        let json = serde_json::json!({
            "id": 1, "verb": "å snakke", "stream": "bokmaal",
            "infinitive": "å snakke", "present": "snakker", "past": "snakket",
            "perfect": "har snakket", "tags": null
        });
        let verb: VerbEntry = serde_json::from_value(json).unwrap();
        assert!(verb.tags.is_empty());
        assert_eq!(verb.examples_past, "");
    }

    #[test]
    fn test_submission_response_without_review() {
        let json = serde_json::json!({
            "summary": {"score": 1, "total_questions": 2, "percent": 50.0, "correct": 1, "incorrect": 1},
            "submission": {"id": 9, "created_at": "2024-05-01T10:00:00.123456Z",
                           "score": 1, "total_questions": 2, "percent": 50.0}
        });
        let response: SubmissionResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.summary.incorrect, 1);
        assert!(response.review.is_empty());
        assert_eq!(response.submission.id, 9);
    }

    #[test]
    fn test_answer_payload_serializes_null_option() {
        let payload = AnswerPayload {
            question: 2,
            selected_option: None,
            text_response: "snakker".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"question": 2, "selected_option": null, "text_response": "snakker"})
        );
    }

    #[test]
    fn test_reading_title_fallback() {
        let json = serde_json::json!({
            "id": 1, "title": "Hytta", "title_en": "The cabin", "slug": "hytta",
            "stream": "bokmaal", "level": "A2", "body": "Vi drar på hytta.",
            "translation": "Мы едем на дачу."
        });
        let reading: Reading = serde_json::from_value(json).unwrap();
        assert_eq!(reading.title_for(Lang::En), "The cabin");
        assert_eq!(reading.title_for(Lang::Nn), "Hytta");
        // Legacy translation stands in for Russian
        assert_eq!(reading.translations().get(Lang::Ru), "Мы едем на дачу.");
    }

    #[test]
    fn test_profile_display_label() {
        let mut profile = ProfileInfo {
            username: "kari".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.display_label(), "kari");
        profile.display_name = "Kari Nordmann".to_string();
        assert_eq!(profile.display_label(), "Kari Nordmann");
    }

    #[test]
    fn test_homework_overdue() {
        let json = serde_json::json!({
            "id": 1, "title": "Skriv om familien", "stream": "bokmaal", "level": "A1",
            "due_date": "2024-01-10T12:00:00Z", "instructions": "150 ord"
        });
        let homework: Homework = serde_json::from_value(json).unwrap();
        let after = "2024-01-11T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let before = "2024-01-09T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert!(homework.is_overdue(after));
        assert!(!homework.is_overdue(before));
    }
}
