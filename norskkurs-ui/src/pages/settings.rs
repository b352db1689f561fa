//! Settings Page
//!
//! Backend URL, the student the content is scoped to, and saved favorites.

use leptos::*;

use norskkurs::favorites::{FavoriteSet, FavoriteStore};

use crate::api;
use crate::state::global::GlobalState;
use crate::state::LocalStore;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Backend connection and learner preferences"</p>
            </div>

            <ApiSettings />
            <StudentSettings />
            <FavoriteSettings />
        </div>
    }
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<bool>);

    // The profile endpoint answers for anonymous visitors too
    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);
        api::set_api_base(&api_url.get_untracked());

        spawn_local(async move {
            match api::fetch_profile(&state.student_email.get_untracked()).await {
                Ok(profile) => {
                    set_test_result.set(Some(true));
                    state.profile.set(Some(profile));
                    state.show_success("Connection successful!");
                }
                Err(e) => {
                    set_test_result.set(Some(false));
                    state.show_error(&format!("Connection failed: {}", e));
                }
            }
            set_testing.set(false);
        });
    };

    let save_url = move |_| {
        api::set_api_base(&api_url.get_untracked());
        state.refresh_profile();
        state.show_success("API URL saved");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <div class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Backend API URL"</label>
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                            class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                        <button
                            on:click=test_connection
                            disabled=move || testing.get()
                            class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if testing.get() { "Testing..." } else { "Test" }}
                        </button>
                        <button
                            on:click=save_url
                            class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                                   rounded-lg font-medium transition-colors"
                        >
                            "Save"
                        </button>
                    </div>
                </div>

                <div class="flex items-center space-x-2">
                    <span class="text-sm text-gray-400">"Status:"</span>
                    {move || match test_result.get() {
                        Some(true) => view! { <span class="text-green-400">"✓ Connected"</span> }.into_view(),
                        Some(false) => view! { <span class="text-red-400">"✕ Failed"</span> }.into_view(),
                        None => view! { <span class="text-gray-400">"Not tested"</span> }.into_view(),
                    }}
                </div>
            </div>
        </section>
    }
}

/// Student email and the session it resolves to
#[component]
fn StudentSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (draft, set_draft) = create_signal(state.student_email.get_untracked());

    let save = move |_| {
        state.student_email.set(draft.get_untracked().trim().to_string());
        state.refresh_profile();
        state.show_success("Student email saved");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Student"</h2>

            <div class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">
                        "Email used for assigned tests, homework and stream changes"
                    </label>
                    <div class="flex space-x-2">
                        <input
                            type="email"
                            placeholder="student@example.com"
                            prop:value=move || draft.get()
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                            class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                        <button
                            on:click=save
                            class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                                   rounded-lg font-medium transition-colors"
                        >
                            "Save"
                        </button>
                    </div>
                </div>

                {move || match state.profile.get() {
                    Some(profile) if profile.is_authenticated => view! {
                        <p class="text-sm text-gray-300">
                            {format!(
                                "Signed in as {}, {} {}",
                                profile.display_label(),
                                profile.stream.label(),
                                profile.level.as_str(),
                            )}
                            {(!profile.allow_stream_change).then_some(" (stream locked by teacher)")}
                        </p>
                    }
                    .into_view(),
                    _ => view! { <p class="text-sm text-gray-400">"Not signed in"</p> }.into_view(),
                }}
            </div>
        </section>
    }
}

/// Saved favorite verbs
#[component]
fn FavoriteSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let clear = move |_| {
        let empty = FavoriteSet::new();
        match LocalStore.save(&empty) {
            Ok(()) => {
                state.favorites.set(empty);
                state.show_success("Favorites cleared");
            }
            Err(e) => state.show_error(&e.to_string()),
        }
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Favorites"</h2>

            <div class="flex items-center justify-between p-4 bg-gray-700 rounded-lg">
                <div>
                    <h3 class="font-medium">"Favorite verbs"</h3>
                    <p class="text-sm text-gray-400">
                        {move || format!("{} saved in this browser", state.favorites.with(FavoriteSet::len))}
                    </p>
                </div>
                <button
                    on:click=clear
                    disabled=move || state.favorites.with(FavoriteSet::is_empty)
                    class="px-4 py-2 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors"
                >
                    "Clear"
                </button>
            </div>
        </section>
    }
}
