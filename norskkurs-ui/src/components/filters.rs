//! Filter Controls
//!
//! Alphabet bar, tag pills and the "load more" footer used by the verb,
//! glossary and test lists.

use leptos::*;

const PILL: &str = "px-3 py-1 rounded-full text-sm transition-colors";
const PILL_ACTIVE: &str = "bg-primary-600 text-white";
const PILL_IDLE: &str = "bg-gray-700 text-gray-300 hover:bg-gray-600";

fn pill_class(active: bool) -> String {
    format!("{} {}", PILL, if active { PILL_ACTIVE } else { PILL_IDLE })
}

/// "All" plus one button per letter; letters without entries are disabled
#[component]
pub fn AlphabetBar(
    #[prop(into)]
    letters: Signal<Vec<(&'static str, bool)>>,
    #[prop(into)]
    selected: Signal<Option<String>>,
    #[prop(into)]
    on_select: Callback<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="flex flex-wrap gap-1" role="toolbar">
            <button
                class=move || pill_class(selected.get().is_none())
                on:click=move |_| on_select.call(None)
            >
                "All"
            </button>
            {move || letters.get().into_iter().map(|(letter, available)| {
                let active = move || selected.get().as_deref() == Some(letter);
                view! {
                    <button
                        class=move || {
                            if available { pill_class(active()) } else { format!("{} text-gray-600", PILL) }
                        }
                        disabled=!available
                        on:click=move |_| on_select.call(Some(letter.to_string()))
                    >
                        {letter}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

/// "All tags" plus one pill per tag
#[component]
pub fn TagPills(
    #[prop(into)]
    tags: Signal<Vec<String>>,
    #[prop(into)]
    selected: Signal<Option<String>>,
    #[prop(into)]
    on_select: Callback<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || !tags.with(Vec::is_empty)>
            <div class="flex flex-wrap gap-2">
                <button
                    class=move || pill_class(selected.get().is_none())
                    on:click=move |_| on_select.call(None)
                >
                    "All tags"
                </button>
                {move || tags.get().into_iter().map(|tag| {
                    let value = tag.clone();
                    let current = tag.clone();
                    view! {
                        <button
                            class=move || pill_class(selected.get().as_deref() == Some(current.as_str()))
                            on:click=move |_| on_select.call(Some(value.clone()))
                        >
                            {tag}
                        </button>
                    }
                }).collect_view()}
            </div>
        </Show>
    }
}

/// "Showing X of Y" with a button while more entries are hidden
#[component]
pub fn LoadMore(
    #[prop(into)]
    status: Signal<String>,
    #[prop(into)]
    has_more: Signal<bool>,
    #[prop(into)]
    on_more: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || has_more.get()>
            <div class="flex items-center justify-between pt-4">
                <span class="text-sm text-gray-400">{move || status.get()}</span>
                <button
                    class="px-4 py-2 rounded-lg border border-gray-600 hover:bg-gray-700 transition-colors"
                    on:click=move |_| on_more.call(())
                >
                    "Load more"
                </button>
            </div>
        </Show>
    }
}
