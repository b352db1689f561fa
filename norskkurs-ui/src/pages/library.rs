//! Library Page
//!
//! Materials, homework and exercises for the current stream and level,
//! scoped to the student email when one is set.

use leptos::*;

use norskkurs::catalog::{collect_tags, filter_by_tag};
use norskkurs::domain::{Exercise, Homework, Material};

use crate::api;
use crate::components::{EmptyState, ListSkeleton, TagPills};
use crate::state::global::GlobalState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Materials,
    Homework,
    Exercises,
}

impl Section {
    fn label(&self) -> &'static str {
        match self {
            Section::Materials => "Materials",
            Section::Homework => "Homework",
            Section::Exercises => "Exercises",
        }
    }
}

/// Library page
#[component]
pub fn Library() -> impl IntoView {
    let section = create_rw_signal(Section::Materials);

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Library"</h1>
                <div class="flex space-x-2">
                    {[Section::Materials, Section::Homework, Section::Exercises].into_iter().map(|s| view! {
                        <button
                            class=move || if section.get() == s {
                                "px-3 py-1 rounded-md bg-primary-600 text-white"
                            } else {
                                "px-3 py-1 rounded-md bg-gray-700 text-gray-300"
                            }
                            on:click=move |_| section.set(s)
                        >
                            {s.label()}
                        </button>
                    }).collect_view()}
                </div>
            </div>

            {move || match section.get() {
                Section::Materials => view! { <MaterialList /> }.into_view(),
                Section::Homework => view! { <HomeworkList /> }.into_view(),
                Section::Exercises => view! { <ExerciseList /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn MaterialList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let materials = create_rw_signal(Vec::<Material>::new());
    let (fetched, set_fetched) = create_signal(false);
    let tag = create_rw_signal(None::<String>);

    create_effect(move |_| {
        let params = state.params();
        spawn_local(async move {
            match api::fetch_materials(&params).await {
                Ok(list) => materials.set(list),
                Err(e) => {
                    materials.set(Vec::new());
                    state.show_error(&format!("Could not load materials: {}", e));
                }
            }
            set_fetched.set(true);
        });
    });

    let visible = move || {
        materials.with(|list| {
            tag.with(|t| filter_by_tag(list, t.as_deref()).into_iter().cloned().collect::<Vec<_>>())
        })
    };

    view! {
        <TagPills
            tags=Signal::derive(move || materials.with(|list| collect_tags(list)))
            selected=tag
            on_select=move |t| tag.set(t)
        />
        <Show when=move || fetched.get() fallback=|| view! { <ListSkeleton /> }>
            <div class="space-y-4">
                <For
                    each=visible
                    key=|material| material.id
                    children=|material| view! {
                        <div class="bg-gray-800 rounded-xl p-4">
                            <div class="flex items-center space-x-2 mb-1">
                                <span class="text-xs px-2 py-0.5 rounded bg-gray-700">{material.level.as_str()}</span>
                                <span class="text-xs text-gray-400">
                                    {format!("{:?}", material.material_type).to_lowercase()}
                                </span>
                                <span class="font-semibold">{material.title.clone()}</span>
                            </div>
                            {(!material.body.trim().is_empty()).then(|| view! {
                                <p class="text-gray-300 whitespace-pre-line">{material.body.clone()}</p>
                            })}
                            {(!material.url.trim().is_empty()).then(|| view! {
                                <a href=material.url.clone() target="_blank" rel="noreferrer noopener" class="text-primary-400 hover:underline text-sm">
                                    "Open"
                                </a>
                            })}
                        </div>
                    }
                />
            </div>
            {move || visible().is_empty().then(|| view! { <EmptyState message="No materials yet." /> })}
        </Show>
    }
}

#[component]
fn HomeworkList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let homework = create_rw_signal(Vec::<Homework>::new());
    let (fetched, set_fetched) = create_signal(false);

    create_effect(move |_| {
        let params = state.params();
        spawn_local(async move {
            match api::fetch_homework(&params).await {
                Ok(list) => homework.set(list),
                Err(e) => {
                    homework.set(Vec::new());
                    state.show_error(&format!("Could not load homework: {}", e));
                }
            }
            set_fetched.set(true);
        });
    });

    view! {
        <Show when=move || fetched.get() fallback=|| view! { <ListSkeleton /> }>
            <div class="space-y-4">
                <For
                    each=move || homework.get()
                    key=|item| item.id
                    children=|item| {
                        let overdue = item.is_overdue(chrono::Utc::now());
                        let due = item
                            .due_date
                            .map(|d| format!("Due {}", d.format("%Y-%m-%d")))
                            .unwrap_or_else(|| "No due date".to_string());
                        view! {
                            <div class="bg-gray-800 rounded-xl p-4 space-y-2">
                                <div class="flex items-center justify-between">
                                    <span class="font-semibold">{item.title.clone()}</span>
                                    <span class=if overdue { "text-sm text-red-400" } else { "text-sm text-gray-400" }>
                                        {due}
                                        {overdue.then_some(" (overdue)")}
                                    </span>
                                </div>
                                <p class="text-gray-300 whitespace-pre-line">{item.instructions.clone()}</p>
                                {(!item.feedback.trim().is_empty()).then(|| view! {
                                    <p class="text-sm text-green-400">{format!("Feedback: {}", item.feedback)}</p>
                                })}
                            </div>
                        }
                    }
                />
            </div>
            {move || homework.with(Vec::is_empty).then(|| view! { <EmptyState message="No homework assigned." /> })}
        </Show>
    }
}

#[component]
fn ExerciseList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let exercises = create_rw_signal(Vec::<Exercise>::new());
    let (fetched, set_fetched) = create_signal(false);
    let tag = create_rw_signal(None::<String>);

    create_effect(move |_| {
        let params = state.params();
        spawn_local(async move {
            match api::fetch_exercises(&params).await {
                Ok(list) => exercises.set(list),
                Err(e) => {
                    exercises.set(Vec::new());
                    state.show_error(&format!("Could not load exercises: {}", e));
                }
            }
            set_fetched.set(true);
        });
    });

    let visible = move || {
        exercises.with(|list| {
            tag.with(|t| filter_by_tag(list, t.as_deref()).into_iter().cloned().collect::<Vec<_>>())
        })
    };

    view! {
        <TagPills
            tags=Signal::derive(move || exercises.with(|list| collect_tags(list)))
            selected=tag
            on_select=move |t| tag.set(t)
        />
        <Show when=move || fetched.get() fallback=|| view! { <ListSkeleton /> }>
            <div class="grid md:grid-cols-2 gap-4">
                <For
                    each=visible
                    key=|exercise| exercise.id
                    children=|exercise| view! {
                        <div class="bg-gray-800 rounded-xl p-4 space-y-1">
                            <div class="flex items-center justify-between">
                                <span class="font-semibold">{exercise.title.clone()}</span>
                                <span class="text-xs text-gray-400">
                                    {format!("{:?}", exercise.kind).to_lowercase()}
                                </span>
                            </div>
                            <p class="text-gray-300">{exercise.prompt.clone()}</p>
                            <p class="text-xs text-gray-500">{format!("Estimated: {} min", exercise.estimated_minutes)}</p>
                        </div>
                    }
                />
            </div>
            {move || visible().is_empty().then(|| view! { <EmptyState message="No exercises yet." /> })}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_labels() {
        assert_eq!(Section::Materials.label(), "Materials");
        assert_eq!(Section::Exercises.label(), "Exercises");
    }
}
