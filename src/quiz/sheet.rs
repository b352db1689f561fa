//! Answer sheet for one test run

use std::collections::HashSet;

use thiserror::Error;

use crate::domain::{AnswerPayload, QuestionType, SubmitRequest, TestDetail};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Question {0} is not part of this test")]
    UnknownQuestion(u64),

    #[error("Option {option} does not belong to question {question}")]
    UnknownOption { question: u64, option: u64 },

    #[error("Question {question} expects a {expected} answer")]
    WrongAnswerKind {
        question: u64,
        expected: &'static str,
    },

    #[error("{} question(s) still need an answer", .missing.len())]
    Incomplete { missing: Vec<u64> },
}

impl QuizError {
    /// Question to scroll to after a failed validation
    pub fn first_missing(&self) -> Option<u64> {
        match self {
            QuizError::Incomplete { missing } => missing.first().copied(),
            _ => None,
        }
    }
}

/// The learner's current answer to one question
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    pub selected_option: Option<u64>,
    pub text_response: String,
}

#[derive(Debug, Clone)]
struct Slot {
    question: u64,
    kind: QuestionType,
    options: Vec<u64>,
    answer: Answer,
}

impl Slot {
    fn is_answered(&self) -> bool {
        match self.kind {
            QuestionType::Single => self.answer.selected_option.is_some(),
            QuestionType::Fill => !self.answer.text_response.trim().is_empty(),
        }
    }

    /// Single-choice answers carry only the option, fill-in answers only
    /// the text.
    fn payload(&self) -> AnswerPayload {
        match self.kind {
            QuestionType::Single => AnswerPayload {
                question: self.question,
                selected_option: self.answer.selected_option,
                text_response: String::new(),
            },
            QuestionType::Fill => AnswerPayload {
                question: self.question,
                selected_option: None,
                text_response: self.answer.text_response.clone(),
            },
        }
    }
}

/// Answers in question order plus the set of questions flagged missing
#[derive(Debug, Clone)]
pub struct AnswerSheet {
    slug: String,
    slots: Vec<Slot>,
    missing: HashSet<u64>,
}

impl AnswerSheet {
    /// One blank answer per question, nothing flagged
    pub fn new(detail: &TestDetail) -> Self {
        let slots = detail
            .questions
            .iter()
            .map(|q| Slot {
                question: q.id,
                kind: q.question_type,
                options: q.options.iter().map(|o| o.id).collect(),
                answer: Answer::default(),
            })
            .collect();
        Self {
            slug: detail.test.slug.clone(),
            slots,
            missing: HashSet::new(),
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    fn slot_mut(&mut self, question: u64) -> Result<&mut Slot, QuizError> {
        self.slots
            .iter_mut()
            .find(|s| s.question == question)
            .ok_or(QuizError::UnknownQuestion(question))
    }

    fn slot(&self, question: u64) -> Option<&Slot> {
        self.slots.iter().find(|s| s.question == question)
    }

    /// Pick an option of a single-choice question
    pub fn select_option(&mut self, question: u64, option: u64) -> Result<(), QuizError> {
        let slot = self.slot_mut(question)?;
        if slot.kind != QuestionType::Single {
            return Err(QuizError::WrongAnswerKind {
                question,
                expected: "text",
            });
        }
        if !slot.options.contains(&option) {
            return Err(QuizError::UnknownOption { question, option });
        }
        slot.answer.selected_option = Some(option);
        self.missing.remove(&question);
        Ok(())
    }

    /// Type the answer of a fill-in question
    pub fn set_text(&mut self, question: u64, text: impl Into<String>) -> Result<(), QuizError> {
        let slot = self.slot_mut(question)?;
        if slot.kind != QuestionType::Fill {
            return Err(QuizError::WrongAnswerKind {
                question,
                expected: "choice",
            });
        }
        slot.answer.text_response = text.into();
        self.missing.remove(&question);
        Ok(())
    }

    pub fn answer(&self, question: u64) -> Option<&Answer> {
        self.slot(question).map(|s| &s.answer)
    }

    pub fn is_answered(&self, question: u64) -> bool {
        self.slot(question).map(Slot::is_answered).unwrap_or(false)
    }

    pub fn is_missing(&self, question: u64) -> bool {
        self.missing.contains(&question)
    }

    /// Flagged questions in question order
    pub fn missing(&self) -> Vec<u64> {
        self.slots
            .iter()
            .map(|s| s.question)
            .filter(|q| self.missing.contains(q))
            .collect()
    }

    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_answered()).count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Flag every unanswered question, or build the payload in question
    /// order when all are answered.
    pub fn validate(&mut self) -> Result<Vec<AnswerPayload>, QuizError> {
        let unanswered: Vec<u64> = self
            .slots
            .iter()
            .filter(|s| !s.is_answered())
            .map(|s| s.question)
            .collect();

        if !unanswered.is_empty() {
            self.missing = unanswered.iter().copied().collect();
            return Err(QuizError::Incomplete {
                missing: unanswered,
            });
        }

        self.missing.clear();
        Ok(self.slots.iter().map(Slot::payload).collect())
    }

    /// Validated submission body
    pub fn submit_request(
        &mut self,
        name: &str,
        email: &str,
        locale: &str,
    ) -> Result<SubmitRequest, QuizError> {
        let answers = self.validate()?;
        Ok(SubmitRequest {
            answers,
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            locale: locale.to_string(),
        })
    }

    /// Blank every answer and clear flags
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.answer = Answer::default();
        }
        self.missing.clear();
    }
}
