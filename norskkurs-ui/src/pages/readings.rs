//! Readings Page
//!
//! Graded texts with a tag filter. Each text shows its translation in tabs,
//! starting on the interface language when one exists.

use leptos::*;

use norskkurs::catalog::{collect_tags, filter_by_tag};
use norskkurs::domain::Reading;
use norskkurs::i18n::{level_label, Lang};

use crate::api;
use crate::components::{EmptyState, ListSkeleton, TagPills};
use crate::state::global::GlobalState;

/// Readings page
#[component]
pub fn Readings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let readings = create_rw_signal(Vec::<Reading>::new());
    let (fetched, set_fetched) = create_signal(false);
    let tag = create_rw_signal(None::<String>);

    create_effect(move |_| {
        let params = state.params();
        spawn_local(async move {
            match api::fetch_readings(&params).await {
                Ok(list) => readings.set(list),
                Err(e) => {
                    readings.set(Vec::new());
                    state.show_error(&format!("Could not load readings: {}", e));
                }
            }
            set_fetched.set(true);
        });
    });

    let visible = move || {
        readings.with(|list| {
            tag.with(|t| {
                filter_by_tag(list, t.as_deref())
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Readings"</h1>

            <TagPills
                tags=Signal::derive(move || readings.with(|list| collect_tags(list)))
                selected=tag
                on_select=move |t| tag.set(t)
            />

            <Show when=move || fetched.get() fallback=|| view! { <ListSkeleton rows=3 /> }>
                <div class="space-y-6">
                    <For
                        each=visible
                        key=|reading| reading.id
                        children=|reading| view! { <ReadingCard reading=reading /> }
                    />
                </div>
                {move || visible().is_empty().then(|| view! {
                    <EmptyState message="No readings for this stream and level yet." />
                })}
            </Show>
        </div>
    }
}

#[component]
fn ReadingCard(reading: Reading) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let available = reading.translations().available();
    // None until the reader picks a tab, then it sticks
    let picked = create_rw_signal(None::<Lang>);
    let tab = {
        let reading = reading.clone();
        move || picked.get().or_else(|| reading.translations().select(state.lang.get()))
    };

    let title = {
        let reading = reading.clone();
        move || reading.title_for(state.lang.get()).to_string()
    };
    let level = reading.level;
    let translation_reading = reading.clone();
    let tab_for_tabs = tab.clone();

    view! {
        <article class="bg-gray-800 rounded-xl p-6 space-y-4">
            <header>
                <p class="text-sm text-gray-400">
                    {move || level_label(level, state.lang.get())}
                </p>
                <h2 class="text-xl font-semibold">{title}</h2>
            </header>

            <div class="whitespace-pre-line leading-relaxed">{reading.body.clone()}</div>

            <section class="border-t border-gray-700 pt-4">
                {if available.is_empty() {
                    view! { <p class="text-gray-400">"No translation available."</p> }.into_view()
                } else {
                    view! {
                        <div class="flex space-x-2 mb-3">
                            {available.into_iter().map(|lang| {
                                let tab = tab_for_tabs.clone();
                                view! {
                                    <button
                                        class=move || if tab() == Some(lang) {
                                            "px-3 py-1 rounded-md text-sm bg-primary-600 text-white"
                                        } else {
                                            "px-3 py-1 rounded-md text-sm bg-gray-700 text-gray-300"
                                        }
                                        on:click=move |_| picked.set(Some(lang))
                                    >
                                        {lang.short_label()}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                        <p class="whitespace-pre-line text-gray-300">
                            {move || tab()
                                .map(|lang| translation_reading.translations().get(lang).to_string())
                                .unwrap_or_default()}
                        </p>
                    }
                    .into_view()
                }}
            </section>
        </article>
    }
}
