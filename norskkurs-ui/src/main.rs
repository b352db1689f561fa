//! Norskkurs Web Client
//!
//! Learner-facing single-page app built with Leptos (WASM).
//!
//! # Features
//!
//! - Placement tests with answer checking and review
//! - Verb tables with examples and favorites
//! - Glossary across Bokmål, Nynorsk, English and Russian
//! - Graded readings with translation tabs
//! - Teacher-assigned materials, homework and exercises
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos app compiled to WebAssembly. Filtering,
//! paging and answer validation come from the `norskkurs` crate; this crate
//! only fetches JSON and renders it.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

use app::App;

fn main() {
    // Rust panics land in the browser console with a readable message
    console_error_panic_hook::set_once();

    // Header, pages and toasts all render under <body>
    mount_to_body(App);
}
