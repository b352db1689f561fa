//! Global Application State
//!
//! Reactive state management using Leptos signals. Stream, level, language
//! and student email survive reloads through localStorage.

use leptos::*;

use norskkurs::domain::{FilterParams, Level, ProfileInfo, Stream, StreamUpdate};
use norskkurs::favorites::{FavoriteSet, FavoriteStore};
use norskkurs::i18n::Lang;

use super::storage::{self, LocalStore};
use crate::api;

const STREAM_KEY: &str = "norskkurs_stream";
const LEVEL_KEY: &str = "norskkurs_level";
const LANG_KEY: &str = "norskkurs_lang";
const EMAIL_KEY: &str = "norskkurs_student_email";

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Language variant content is filtered by
    pub stream: RwSignal<Stream>,
    /// CEFR level content is filtered by
    pub level: RwSignal<Level>,
    /// Preferred translation language
    pub lang: RwSignal<Lang>,
    /// Student whose assigned content is shown (may be empty)
    pub student_email: RwSignal<String>,
    /// Backend session, `None` until loaded or when unreachable
    pub profile: RwSignal<Option<ProfileInfo>>,
    /// Favorite verb ids
    pub favorites: RwSignal<FavoriteSet>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

fn stored<T: std::str::FromStr + Default>(key: &str) -> T {
    storage::read(key)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        stream: create_rw_signal(stored(STREAM_KEY)),
        level: create_rw_signal(stored(LEVEL_KEY)),
        lang: create_rw_signal(stored(LANG_KEY)),
        student_email: create_rw_signal(storage::read(EMAIL_KEY).unwrap_or_default()),
        profile: create_rw_signal(None),
        favorites: create_rw_signal(LocalStore.load()),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    create_effect(move |_| storage::write(STREAM_KEY, state.stream.get().as_str()));
    create_effect(move |_| storage::write(LEVEL_KEY, state.level.get().as_str()));
    create_effect(move |_| storage::write(LANG_KEY, state.lang.get().code()));
    create_effect(move |_| storage::write(EMAIL_KEY, state.student_email.get().trim()));

    provide_context(state);
}

impl GlobalState {
    /// Stream, level and student email (tracked)
    pub fn params(&self) -> FilterParams {
        self.test_params().level(self.level.get())
    }

    /// Tests are narrowed by level on the page itself
    pub fn test_params(&self) -> FilterParams {
        let params = FilterParams::new().stream(self.stream.get());
        let email = self.student_email.get();
        if email.trim().is_empty() {
            params
        } else {
            params.student_email(email.trim())
        }
    }

    pub fn is_teacher(&self) -> bool {
        self.profile
            .get()
            .map(|p| p.is_authenticated && p.is_teacher)
            .unwrap_or(false)
    }

    /// Load the session; an unreachable backend leaves the learner signed out
    pub fn refresh_profile(&self) {
        let state = *self;
        let email = self.student_email.get_untracked();
        spawn_local(async move {
            match api::fetch_profile(&email).await {
                Ok(profile) => state.profile.set(Some(profile)),
                Err(_) => state.profile.set(None),
            }
        });
    }

    pub fn logout(&self) {
        let state = *self;
        spawn_local(async move {
            match api::logout().await {
                Ok(()) => {
                    state.profile.set(None);
                    state.show_success("Logged out");
                }
                Err(e) => state.show_error(&e),
            }
        });
    }

    /// Switch stream or level; the backend is told when a student is known
    pub fn change_track(&self, stream: Stream, level: Level) {
        self.stream.set(stream);
        self.level.set(level);

        let email = self.student_email.get_untracked();
        if email.trim().is_empty() {
            return;
        }
        let state = *self;
        let update = StreamUpdate {
            email: email.trim().to_string(),
            stream: Some(stream),
            level: Some(level),
        };
        spawn_local(async move {
            if let Err(e) = api::update_stream(&update).await {
                state.show_error(&e);
            }
        });
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.with(|f| f.contains(id))
    }

    /// Toggle a favorite verb and persist the list
    pub fn toggle_favorite(&self, id: u64) {
        let mut favorites = self.favorites.get_untracked();
        favorites.toggle(id);
        if let Err(e) = LocalStore.save(&favorites) {
            self.show_error(&e.to_string());
        }
        self.favorites.set(favorites);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }
}
