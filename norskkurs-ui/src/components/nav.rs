//! Navigation Component
//!
//! Header with brand, page links, session actions and the stream, level
//! and language switchers.

use leptos::*;
use leptos_router::*;

use norskkurs::domain::{Level, Stream};
use norskkurs::i18n::Lang;
use norskkurs::links::AdminLinks;

use crate::api;
use crate::state::global::GlobalState;

const SWITCH: &str = "px-3 py-1 rounded-md text-sm transition-colors";

fn switch_class(active: bool) -> String {
    if active {
        format!("{} bg-primary-600 text-white", SWITCH)
    } else {
        format!("{} text-gray-300 hover:bg-gray-700", SWITCH)
    }
}

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="w-9 h-9 rounded-lg bg-primary-600 flex items-center justify-center font-bold">
                            "N"
                        </span>
                        <span class="text-xl font-bold text-white">"Norskkurs"</span>
                    </A>

                    // Navigation links
                    <div class="flex items-center space-x-1">
                        <NavLink href="/" label="Tests" />
                        <NavLink href="/verbs" label="Verbs" />
                        <NavLink href="/glossary" label="Glossary" />
                        <NavLink href="/expressions" label="Expressions" />
                        <NavLink href="/readings" label="Readings" />
                        <NavLink href="/library" label="Library" />
                        <NavLink href="/settings" label="Settings" />
                    </div>

                    <UserActions />
                </div>

                <TrackSwitchers state=state />
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}

/// Login link, or the signed-in name with logout and admin links
#[component]
fn UserActions() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let links = AdminLinks::from_api_base(&api::get_api_base());

    move || match state.profile.get() {
        Some(profile) if profile.is_authenticated => {
            let panel = state.is_teacher().then(|| view! {
                <a href=links.panel() target="_blank" rel="noreferrer noopener" class="text-primary-400 hover:underline">
                    "Admin"
                </a>
            });
            view! {
                <div class="flex items-center space-x-3 text-sm">
                    <span class="text-gray-300">{profile.display_label().to_string()}</span>
                    {panel}
                    <button on:click=move |_| state.logout() class="text-gray-400 hover:text-white">
                        "Logout"
                    </button>
                </div>
            }
            .into_view()
        }
        _ => view! {
            <a href=links.login() target="_blank" rel="noreferrer noopener" class="text-sm text-primary-400 hover:underline">
                "Login"
            </a>
        }
        .into_view(),
    }
}

/// Stream, level and language pickers
#[component]
fn TrackSwitchers(state: GlobalState) -> impl IntoView {
    let stream_locked = move || {
        state
            .profile
            .get()
            .map(|p| p.is_authenticated && !p.allow_stream_change)
            .unwrap_or(false)
    };

    view! {
        <div class="flex flex-wrap items-center gap-6 py-3 text-sm">
            <div class="flex items-center space-x-2">
                <span class="text-gray-400">"Stream"</span>
                {Stream::all().iter().copied().map(|stream| view! {
                    <button
                        class=move || switch_class(state.stream.get() == stream)
                        disabled=stream_locked
                        on:click=move |_| state.change_track(stream, state.level.get_untracked())
                    >
                        {stream.label()}
                    </button>
                }).collect_view()}
            </div>

            <div class="flex items-center space-x-2">
                <span class="text-gray-400">"Level"</span>
                {Level::all().iter().copied().map(|level| view! {
                    <button
                        class=move || switch_class(state.level.get() == level)
                        on:click=move |_| state.change_track(state.stream.get_untracked(), level)
                    >
                        {level.as_str()}
                    </button>
                }).collect_view()}
            </div>

            <div class="flex items-center space-x-2">
                <span class="text-gray-400">"Language"</span>
                {Lang::ui_languages().iter().copied().map(|lang| view! {
                    <button
                        class=move || switch_class(state.lang.get() == lang)
                        on:click=move |_| state.lang.set(lang)
                    >
                        {lang.short_label()}
                    </button>
                }).collect_view()}
            </div>

            <input
                type="email"
                placeholder="student@example.com"
                class="ml-auto bg-gray-700 rounded-lg px-3 py-1 border border-gray-600 focus:border-primary-500 focus:outline-none"
                prop:value=move || state.student_email.get()
                on:change=move |ev| {
                    state.student_email.set(event_target_value(&ev).trim().to_string());
                    state.refresh_profile();
                }
            />
        </div>
    }
}
