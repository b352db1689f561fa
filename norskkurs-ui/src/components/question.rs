//! Question Card
//!
//! One test question with its input, the "answer required" hint and, after
//! submission, the per-question review.

use leptos::*;

use norskkurs::domain::{Question, QuestionReview, QuestionType};
use norskkurs::quiz::{correct_display, selected_display, Answer, ReviewStatus};

/// DOM id used to scroll to the first unanswered question
pub fn question_anchor(question: u64) -> String {
    format!("question-{}", question)
}

fn card_class(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Correct => "border-green-500",
        ReviewStatus::Incorrect => "border-red-500",
        ReviewStatus::Missing => "border-yellow-500",
        ReviewStatus::Pending => "border-gray-700",
    }
}

#[component]
pub fn QuestionCard(
    number: usize,
    question: Question,
    #[prop(into)]
    answer: Signal<Option<Answer>>,
    #[prop(into)]
    missing: Signal<bool>,
    #[prop(into)]
    review: Signal<Option<QuestionReview>>,
    #[prop(into)]
    on_select: Callback<(u64, u64)>,
    #[prop(into)]
    on_text: Callback<(u64, String)>,
) -> impl IntoView {
    let id = question.id;
    let status = move || ReviewStatus::of(review.get().as_ref(), missing.get());

    let input = match question.question_type {
        QuestionType::Single => question
            .choices()
            .iter()
            .map(|option| {
                let option_id = option.id;
                let checked =
                    move || answer.get().and_then(|a| a.selected_option) == Some(option_id);
                view! {
                    <label class="flex items-center space-x-3 py-1 cursor-pointer">
                        <input
                            type="radio"
                            name=format!("q-{}", id)
                            prop:checked=checked
                            on:change=move |_| on_select.call((id, option_id))
                        />
                        <span>{option.text.clone()}</span>
                    </label>
                }
            })
            .collect_view(),
        QuestionType::Fill => view! {
            <input
                type="text"
                placeholder="Type your answer"
                class="w-full bg-gray-700 rounded-lg px-4 py-2 border border-gray-600
                       focus:border-primary-500 focus:outline-none"
                prop:value=move || answer.get().map(|a| a.text_response).unwrap_or_default()
                on:input=move |ev| on_text.call((id, event_target_value(&ev)))
            />
        }
        .into_view(),
    };

    view! {
        <article
            id=question_anchor(id)
            class=move || format!("bg-gray-800 rounded-xl p-5 border-2 {}", card_class(status()))
        >
            <div class="flex items-start space-x-3 mb-3">
                <span class="text-gray-400">{format!("{}.", number)}</span>
                <span class="text-xs px-2 py-0.5 rounded bg-gray-700">
                    {question.question_type.badge()}
                </span>
                <p class="font-medium">{question.text.clone()}</p>
            </div>

            <div class="space-y-1">{input}</div>

            {move || review.get().map(|r| {
                let verdict = ReviewStatus::of(Some(&r), false);
                view! {
                    <div class="mt-4 space-y-1 text-sm">
                        <span class=format!("badge {}", verdict.css_class())>{verdict.label()}</span>
                        <div>
                            <span class="text-gray-400">"Your answer: "</span>
                            <span>{selected_display(&r).to_string()}</span>
                        </div>
                        <div>
                            <span class="text-gray-400">"Correct answer: "</span>
                            <span>{correct_display(&r)}</span>
                        </div>
                        {(!r.explanation.trim().is_empty()).then(|| view! {
                            <div>
                                <span class="text-gray-400">"Explanation: "</span>
                                <span>{r.explanation.clone()}</span>
                            </div>
                        })}
                    </div>
                }
            })}

            <Show when=move || status() == ReviewStatus::Missing>
                <p class="mt-3 text-sm text-yellow-400">{ReviewStatus::Missing.label()}</p>
            </Show>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_anchor() {
        assert_eq!(question_anchor(42), "question-42");
    }

    #[test]
    fn test_card_class_per_status() {
        assert_eq!(card_class(ReviewStatus::Missing), "border-yellow-500");
        assert_eq!(card_class(ReviewStatus::Pending), "border-gray-700");
    }
}
