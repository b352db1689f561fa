//! Classification enums shared by every content type
//!
//! - `Stream`: language variant track content is published for
//! - `Level`: CEFR proficiency tag, ordered A1 < A2 < B1 < B2
//! - `QuestionType` / `QuestionMode`: how a test question is answered
//! - `MaterialType`, `HomeworkStatus`, `ExerciseKind`: content subtypes

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language variant track content is filtered by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    #[default]
    Bokmaal,
    Nynorsk,
    English,
}

impl Stream {
    /// All streams in display order
    pub fn all() -> &'static [Stream] {
        &[Stream::Bokmaal, Stream::Nynorsk, Stream::English]
    }

    /// Wire value used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::Bokmaal => "bokmaal",
            Stream::Nynorsk => "nynorsk",
            Stream::English => "english",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Stream::Bokmaal => "Bokmål",
            Stream::Nynorsk => "Nynorsk",
            Stream::English => "English",
        }
    }
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stream {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bokmaal" | "bokmal" | "bokmål" | "nb" => Ok(Stream::Bokmaal),
            "nynorsk" | "nn" => Ok(Stream::Nynorsk),
            "english" | "en" => Ok(Stream::English),
            other => Err(ParseEnumError::new("stream", other)),
        }
    }
}

/// CEFR proficiency level
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub enum Level {
    #[default]
    A1,
    A2,
    B1,
    B2,
}

impl Level {
    /// All levels in ascending order
    pub fn all() -> &'static [Level] {
        &[Level::A1, Level::A2, Level::B1, Level::B2]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
        }
    }

    /// Rank used for sorting test lists (A1 = 1)
    pub fn rank(&self) -> u8 {
        match self {
            Level::A1 => 1,
            Level::A2 => 2,
            Level::B1 => 3,
            Level::B2 => 4,
        }
    }

    /// Exam-track levels
    pub fn is_exam_level(&self) -> bool {
        matches!(self, Level::B1 | Level::B2)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Ok(Level::A1),
            "A2" => Ok(Level::A2),
            "B1" => Ok(Level::B1),
            "B2" => Ok(Level::B2),
            other => Err(ParseEnumError::new("level", other)),
        }
    }
}

/// How a single question is answered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Pick one option
    Single,
    /// Type the answer
    Fill,
}

impl QuestionType {
    /// Short badge shown next to the question text
    pub fn badge(&self) -> &'static str {
        match self {
            QuestionType::Single => "MCQ",
            QuestionType::Fill => "Fill",
        }
    }
}

/// Aggregate answer shape of a whole test
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QuestionMode {
    Single,
    Fill,
    Mixed,
}

impl QuestionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionMode::Single => "single",
            QuestionMode::Fill => "fill",
            QuestionMode::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for QuestionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    #[default]
    Text,
    Video,
    Audio,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Draft,
    #[default]
    Published,
    Closed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    #[default]
    Quiz,
    Dictation,
    Flashcard,
}

/// Unknown value given for one of the enums above
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::A1 < Level::A2);
        assert!(Level::B1 < Level::B2);
        assert_eq!(Level::B2.rank(), 4);
        assert!(Level::B1.is_exam_level());
        assert!(!Level::A2.is_exam_level());
    }

    #[test]
    fn test_stream_wire_format() {
        let json = serde_json::to_string(&Stream::Bokmaal).unwrap();
        assert_eq!(json, "\"bokmaal\"");
        let parsed: Stream = serde_json::from_str("\"nynorsk\"").unwrap();
        assert_eq!(parsed, Stream::Nynorsk);
    }

    #[test]
    fn test_parse_from_cli_input() {
        assert_eq!("Bokmål".parse::<Stream>().unwrap(), Stream::Bokmaal);
        assert_eq!(" b2 ".parse::<Level>().unwrap(), Level::B2);

        let err = "C1".parse::<Level>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown level: \"C1\"");
    }
}
