//! Expressions Page

use leptos::*;

use norskkurs::catalog::{collect_tags, filter_by_tag};
use norskkurs::domain::Expression;

use crate::api;
use crate::components::{EmptyState, ListSkeleton, TagPills};
use crate::state::global::GlobalState;

/// Idiomatic expressions with their meaning in the interface language
#[component]
pub fn Expressions() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let expressions = create_rw_signal(Vec::<Expression>::new());
    let (fetched, set_fetched) = create_signal(false);
    let tag = create_rw_signal(None::<String>);

    create_effect(move |_| {
        let params = state.params();
        spawn_local(async move {
            match api::fetch_expressions(&params).await {
                Ok(list) => expressions.set(list),
                Err(e) => {
                    expressions.set(Vec::new());
                    state.show_error(&format!("Could not load expressions: {}", e));
                }
            }
            set_fetched.set(true);
        });
    });

    let visible = move || {
        expressions.with(|list| {
            tag.with(|t| filter_by_tag(list, t.as_deref()).into_iter().cloned().collect::<Vec<_>>())
        })
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Expressions"</h1>

            <TagPills
                tags=Signal::derive(move || expressions.with(|list| collect_tags(list)))
                selected=tag
                on_select=move |t| tag.set(t)
            />

            <Show when=move || fetched.get() fallback=|| view! { <ListSkeleton /> }>
                <div class="grid md:grid-cols-2 gap-4">
                    <For
                        each=visible
                        key=|expression| expression.id
                        children=move |expression| {
                            let meaning = {
                                let expression = expression.clone();
                                move || expression.meaning_for(state.lang.get()).unwrap_or("-").to_string()
                            };
                            view! {
                                <div class="bg-gray-800 rounded-xl p-4 space-y-2">
                                    <h3 class="text-lg font-semibold">{expression.phrase.clone()}</h3>
                                    <p class="text-gray-300">{meaning}</p>
                                    {(!expression.example.trim().is_empty()).then(|| view! {
                                        <p class="text-sm italic text-gray-400">{expression.example.clone()}</p>
                                    })}
                                    <div class="flex flex-wrap gap-1">
                                        {expression.tags.iter().map(|t| view! {
                                            <span class="text-xs px-2 py-0.5 rounded bg-gray-700">{t.clone()}</span>
                                        }).collect_view()}
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
                {move || visible().is_empty().then(|| view! {
                    <EmptyState message="No expressions match filters." />
                })}
            </Show>
        </div>
    }
}
