//! Glossary Page
//!
//! One row per concept with its Bokmål, Nynorsk, English and Russian
//! variants. Search input is debounced before the filter is applied.

use gloo_timers::callback::Timeout;
use leptos::*;

use norskkurs::catalog::{GlossaryBoard, GlossaryRow};
use norskkurs::domain::GlossaryQuery;

use crate::api;
use crate::components::{AlphabetBar, EmptyState, ListSkeleton, LoadMore, TagPills};
use crate::state::global::GlobalState;

/// Delay between the last keystroke and re-filtering
const SEARCH_DEBOUNCE_MS: u32 = 250;

/// Glossary page
#[component]
pub fn Glossary() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let board = create_rw_signal(GlossaryBoard::default());
    let (fetched, set_fetched) = create_signal(false);
    let pending_search = store_value(None::<Timeout>);

    // Rows merge every stream, so the whole glossary is fetched; the stream
    // and level switchers only trigger a refresh
    create_effect(move |_| {
        let _ = (state.stream.get(), state.level.get());
        spawn_local(async move {
            let terms = api::fetch_glossary(&GlossaryQuery::default())
                .await
                .unwrap_or_default();
            board.update(|b| b.set_terms(&terms));
            set_fetched.set(true);
        });
    });

    let on_search = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        // Dropping the previous timeout cancels it
        pending_search.set_value(Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            board.update(|b| b.set_search(value));
        })));
    };

    let letters = move || {
        board.with(|b| {
            norskkurs::catalog::ALPHABET
                .iter()
                .map(|letter| (*letter, b.rows().iter().any(|row| row.letter() == *letter)))
                .collect::<Vec<_>>()
        })
    };
    let visible = move || board.with(|b| b.visible().into_iter().cloned().collect::<Vec<GlossaryRow>>());

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Glossary"</h1>

            <input
                type="search"
                placeholder="Search in any language"
                class="w-full bg-gray-700 rounded-lg px-4 py-2 border border-gray-600 focus:border-primary-500 focus:outline-none"
                on:input=on_search
            />

            <AlphabetBar
                letters=Signal::derive(letters)
                selected=Signal::derive(move || board.with(|b| b.filter().letter.clone()))
                on_select=move |letter| board.update(|b| b.set_letter(letter))
            />
            <TagPills
                tags=Signal::derive(move || board.with(GlossaryBoard::tags))
                selected=Signal::derive(move || board.with(|b| b.filter().tag.clone()))
                on_select=move |tag| board.update(|b| b.set_tag(tag))
            />

            <Show when=move || fetched.get() fallback=|| view! { <ListSkeleton /> }>
                <table class="w-full text-left">
                    <thead class="text-gray-400 text-sm">
                        <tr>
                            <th>"Bokmål"</th>
                            <th>"Nynorsk"</th>
                            <th>"English"</th>
                            <th>"Русский"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=visible
                            key=|row| row.id.clone()
                            children=|row| view! {
                                <tr class="border-t border-gray-700">
                                    <td class="py-2">{cell(row.bokmaal)}</td>
                                    <td>{cell(row.nynorsk)}</td>
                                    <td>{cell(row.english)}</td>
                                    <td>{cell(row.russian)}</td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
                {move || visible().is_empty().then(|| view! {
                    <EmptyState message="No glossary entries match filters." />
                })}
                <LoadMore
                    status=Signal::derive(move || board.with(GlossaryBoard::status))
                    has_more=Signal::derive(move || board.with(GlossaryBoard::has_more))
                    on_more=move |_| board.update(GlossaryBoard::load_more)
                />
            </Show>
        </div>
    }
}

fn cell(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}
