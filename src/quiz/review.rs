//! Scoring feedback display

use crate::domain::{QuestionReview, SubmissionSummary};

/// Placeholder for an empty answer cell
pub const EMPTY_ANSWER: &str = "—";

/// Visual state of a question card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Correct,
    Incorrect,
    /// Flagged as unanswered before submission
    Missing,
    /// Not yet submitted
    Pending,
}

impl ReviewStatus {
    /// Review wins over the missing flag
    pub fn of(review: Option<&QuestionReview>, missing: bool) -> Self {
        match review {
            Some(r) if r.is_correct => ReviewStatus::Correct,
            Some(_) => ReviewStatus::Incorrect,
            None if missing => ReviewStatus::Missing,
            None => ReviewStatus::Pending,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ReviewStatus::Correct => "good",
            ReviewStatus::Incorrect => "bad",
            ReviewStatus::Missing => "missing",
            ReviewStatus::Pending => "",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Correct => "Correct",
            ReviewStatus::Incorrect => "Incorrect",
            ReviewStatus::Missing => "Answer required",
            ReviewStatus::Pending => "",
        }
    }
}

pub fn review_for(reviews: &[QuestionReview], question: u64) -> Option<&QuestionReview> {
    reviews.iter().find(|r| r.question == question)
}

/// The learner's answer as typed, or a dash when blank
pub fn selected_display(review: &QuestionReview) -> &str {
    review
        .selected_text
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(EMPTY_ANSWER)
}

/// Accepted answers joined with ", ", or a dash when none
pub fn correct_display(review: &QuestionReview) -> String {
    if review.correct_answers.is_empty() {
        EMPTY_ANSWER.to_string()
    } else {
        review.correct_answers.join(", ")
    }
}

/// "3/5"
pub fn score_line(summary: &SubmissionSummary) -> String {
    format!("{}/{}", summary.score, summary.total_questions)
}

/// "60%", "66.67%"
pub fn percent_label(summary: &SubmissionSummary) -> String {
    format!("{}%", summary.percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuestionType;

    fn review(question: u64, selected: Option<&str>, correct: &[&str], ok: bool) -> QuestionReview {
        QuestionReview {
            question,
            order: 1,
            text: "Spørsmål".to_string(),
            question_type: QuestionType::Fill,
            selected_text: selected.map(str::to_string),
            correct_answers: correct.iter().map(|s| s.to_string()).collect(),
            is_correct: ok,
            explanation: String::new(),
        }
    }

    #[test]
    fn test_status_precedence() {
        let good = review(1, Some("snakker"), &["snakker"], true);
        let bad = review(1, Some("snakke"), &["snakker"], false);
        assert_eq!(ReviewStatus::of(Some(&good), true), ReviewStatus::Correct);
        assert_eq!(ReviewStatus::of(Some(&bad), false), ReviewStatus::Incorrect);
        assert_eq!(ReviewStatus::of(None, true), ReviewStatus::Missing);
        assert_eq!(ReviewStatus::of(None, false).css_class(), "");
    }

    #[test]
    fn test_answer_display() {
        let blank = review(1, Some("   "), &[], false);
        assert_eq!(selected_display(&blank), "—");
        assert_eq!(correct_display(&blank), "—");

        let none = review(2, None, &["går", "gikk"], false);
        assert_eq!(selected_display(&none), "—");
        assert_eq!(correct_display(&none), "går, gikk");

        let given = review(3, Some(" går "), &["går"], true);
        assert_eq!(selected_display(&given), " går ");
    }

    #[test]
    fn test_score_and_percent() {
        let summary = SubmissionSummary {
            score: 2,
            total_questions: 3,
            percent: 66.67,
            correct: 2,
            incorrect: 1,
        };
        assert_eq!(score_line(&summary), "2/3");
        assert_eq!(percent_label(&summary), "66.67%");

        let full = SubmissionSummary { percent: 100.0, ..summary };
        assert_eq!(percent_label(&full), "100%");
    }

    #[test]
    fn test_review_lookup() {
        let reviews = vec![review(4, None, &[], false), review(7, None, &[], true)];
        assert!(review_for(&reviews, 7).unwrap().is_correct);
        assert!(review_for(&reviews, 8).is_none());
    }
}
