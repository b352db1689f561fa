//! Loading and empty states

use leptos::*;

/// Spinner shown while a page fetches its list
#[component]
pub fn Loading(
    #[prop(default = "Loading...")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center space-x-3 py-12 text-gray-400">
            <div class="loading-spinner w-6 h-6" />
            <span>{label}</span>
        </div>
    }
}

/// Placeholder rows for a table that has not arrived yet
#[component]
pub fn ListSkeleton(
    #[prop(default = 5)]
    rows: usize,
) -> impl IntoView {
    view! {
        <div class="space-y-2 animate-pulse">
            {(0..rows).map(|_| view! {
                <div class="bg-gray-700 rounded h-10" />
            }).collect_view()}
        </div>
    }
}

/// Muted line shown when filters leave nothing to display
#[component]
pub fn EmptyState(
    #[prop(into)]
    message: String,
) -> impl IntoView {
    view! {
        <p class="text-center text-gray-400 py-8">{message}</p>
    }
}
