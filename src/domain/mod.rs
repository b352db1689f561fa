//! Norskkurs domain model
//!
//! - **types**: Stream, Level and the other wire enums
//! - **content**: DTOs mirrored from API responses
//! - **params**: query-string filters for list endpoints

pub mod content;
pub mod params;
pub mod types;

pub use content::{
    AnswerOption, AnswerPayload, Exercise, Expression, GlossaryTerm, Homework, Material,
    ProfileInfo, Question, QuestionReview, Reading, StreamUpdate, StudentProfile,
    SubmissionRecord, SubmissionResponse, SubmissionSummary, SubmitRequest, Tagged, Test,
    TestDetail, VerbEntry,
};
pub use params::{item_path, FilterParams, GlossaryQuery};
pub use types::{
    ExerciseKind, HomeworkStatus, Level, MaterialType, ParseEnumError, QuestionMode,
    QuestionType, Stream,
};
