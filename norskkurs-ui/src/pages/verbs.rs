//! Verbs Page
//!
//! Conjugation table with alphabet, tag and favorites filters. Clicking a
//! verb opens its example sentences per form.

use leptos::*;

use norskkurs::catalog::{VerbBoard, VerbForm, VerbView};
use norskkurs::domain::VerbEntry;

use crate::api;
use crate::components::{AlphabetBar, EmptyState, ListSkeleton, LoadMore, TagPills};
use crate::state::global::GlobalState;

/// Verbs page
#[component]
pub fn Verbs() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let board = create_rw_signal(VerbBoard::default());
    let (fetched, set_fetched) = create_signal(false);
    let active = create_rw_signal(None::<VerbEntry>);

    create_effect(move |_| {
        let params = state.params();
        spawn_local(async move {
            // A failed fetch just shows an empty table
            let verbs = api::fetch_verbs(&params).await.unwrap_or_default();
            board.update(|b| b.set_verbs(verbs));
            set_fetched.set(true);
        });
    });

    let visible = move || {
        state
            .favorites
            .with(|favs| board.with(|b| b.visible(favs).into_iter().cloned().collect::<Vec<_>>()))
    };

    let view_button = move |view: VerbView, label: &'static str| {
        view! {
            <button
                class=move || {
                    if board.with(|b| b.filter().view == view) {
                        "px-3 py-1 rounded-md bg-primary-600 text-white"
                    } else {
                        "px-3 py-1 rounded-md bg-gray-700 text-gray-300"
                    }
                }
                on:click=move |_| board.update(|b| b.set_view(view))
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Verbs"</h1>
                <div class="flex space-x-2">
                    {view_button(VerbView::All, "All verbs")}
                    {view_button(VerbView::Favorites, "★ Favorites")}
                </div>
            </div>

            <input
                type="search"
                placeholder="Search any form"
                class="w-full bg-gray-700 rounded-lg px-4 py-2 border border-gray-600 focus:border-primary-500 focus:outline-none"
                on:input=move |ev| board.update(|b| b.set_search(event_target_value(&ev)))
            />

            <AlphabetBar
                letters=Signal::derive(move || board.with(VerbBoard::alphabet))
                selected=Signal::derive(move || board.with(|b| b.filter().letter.clone()))
                on_select=move |letter| board.update(|b| b.set_letter(letter))
            />
            <TagPills
                tags=Signal::derive(move || board.with(VerbBoard::tags))
                selected=Signal::derive(move || board.with(|b| b.filter().tag.clone()))
                on_select=move |tag| board.update(|b| b.set_tag(tag))
            />

            <Show when=move || fetched.get() fallback=|| view! { <ListSkeleton /> }>
                <table class="w-full text-left">
                    <thead class="text-gray-400 text-sm">
                        <tr>
                            <th></th>
                            {VerbForm::all().iter().map(|form| view! { <th>{form.label()}</th> }).collect_view()}
                            <th>"Translation"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=visible
                            key=|verb| verb.id
                            children=move |verb| view! { <VerbRow verb=verb on_open=move |v| active.set(Some(v)) /> }
                        />
                    </tbody>
                </table>
                {move || visible().is_empty().then(|| {
                    let favorites_view = board.with(|b| b.filter().view == VerbView::Favorites);
                    view! {
                        <EmptyState message=if favorites_view { "No favorite verbs yet." } else { "No verbs match filters." } />
                    }
                })}
                <LoadMore
                    status=Signal::derive(move || state.favorites.with(|f| board.with(|b| b.status(f))))
                    has_more=Signal::derive(move || state.favorites.with(|f| board.with(|b| b.has_more(f))))
                    on_more=move |_| {
                        let favorites = state.favorites.get_untracked();
                        board.update(|b| b.load_more(&favorites));
                    }
                />
            </Show>

            {move || active.get().map(|verb| view! {
                <ExampleModal verb=verb on_close=move |_| active.set(None) />
            })}
        </div>
    }
}

#[component]
fn VerbRow(
    verb: VerbEntry,
    #[prop(into)]
    on_open: Callback<VerbEntry>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let id = verb.id;
    let translation = {
        let verb = verb.clone();
        move || {
            let translations = verb.translations();
            translations
                .select(state.lang.get())
                .map(|l| translations.get(l).to_string())
                .unwrap_or_default()
        }
    };
    let forms: Vec<String> = VerbForm::all()
        .iter()
        .map(|form| {
            let value = form.value(&verb);
            if value.is_empty() { "-".to_string() } else { value.to_string() }
        })
        .collect();

    view! {
        <tr class="border-t border-gray-700">
            <td>
                <button
                    class="text-yellow-400 text-lg"
                    title=move || if state.is_favorite(id) { "Remove from favorites" } else { "Add to favorites" }
                    on:click=move |_| state.toggle_favorite(id)
                >
                    {move || if state.is_favorite(id) { "★" } else { "☆" }}
                </button>
            </td>
            {forms.into_iter().map(|form| view! { <td class="py-2">{form}</td> }).collect_view()}
            <td class="text-gray-400">{translation}</td>
            <td>
                <button
                    class="text-sm text-primary-400 hover:underline"
                    on:click=move |_| on_open.call(verb.clone())
                >
                    "Examples"
                </button>
            </td>
        </tr>
    }
}

/// Forms on top, examples of the chosen form below
#[component]
fn ExampleModal(
    verb: VerbEntry,
    #[prop(into)]
    on_close: Callback<()>,
) -> impl IntoView {
    let form = create_rw_signal(VerbForm::default());
    let forms_verb = verb.clone();
    let examples_verb = verb.clone();

    view! {
        <div class="fixed inset-0 z-40 flex items-center justify-center" role="dialog" aria-modal="true">
            <div class="absolute inset-0 bg-black/60" on:click=move |_| on_close.call(()) />
            <div class="relative bg-gray-800 rounded-xl p-6 w-full max-w-lg space-y-4">
                <header class="flex items-start justify-between">
                    <div>
                        <p class="text-sm text-gray-400">{verb.stream.label()}</p>
                        <h3 class="text-xl font-bold">{verb.verb.clone()}</h3>
                    </div>
                    <button on:click=move |_| on_close.call(()) aria-label="Close">"✕"</button>
                </header>

                <div class="grid grid-cols-4 gap-2">
                    {VerbForm::all().iter().copied().map(|f| {
                        let value = f.value(&forms_verb).to_string();
                        view! {
                            <button
                                class=move || format!(
                                    "rounded-lg p-2 text-left {}",
                                    if form.get() == f { "bg-primary-600" } else { "bg-gray-700" }
                                )
                                on:click=move |_| form.set(f)
                            >
                                <span class="block text-xs text-gray-300">{f.label()}</span>
                                <strong>{value}</strong>
                            </button>
                        }
                    }).collect_view()}
                </div>

                <div>
                    <h4 class="font-semibold mb-2">{move || form.get().label()}</h4>
                    {move || {
                        let lines: Vec<String> = form
                            .get()
                            .examples(&examples_verb)
                            .into_iter()
                            .map(str::to_string)
                            .collect();
                        if lines.is_empty() {
                            view! { <p class="text-gray-400">"No examples yet."</p> }.into_view()
                        } else {
                            lines.into_iter().map(|line| view! { <p>{line}</p> }).collect_view()
                        }
                    }}
                </div>
            </div>
        </div>
    }
}
