//! Taking a placement test
//!
//! - **sheet**: answers, completeness check, submission payload
//! - **review**: per-question feedback after scoring

pub mod review;
pub mod sheet;

pub use review::{
    correct_display, percent_label, review_for, score_line, selected_display, ReviewStatus,
    EMPTY_ANSWER,
};
pub use sheet::{Answer, AnswerSheet, QuizError};
