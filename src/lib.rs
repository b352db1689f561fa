//! # Norskkurs
//!
//! Client library for the Norskkurs language-learning platform: placement
//! tests, verbs, glossary, expressions, readings and the assigned library of
//! materials, homework and exercises, all served by a REST backend.
//!
//! ## Modules
//!
//! - [`domain`]: DTOs mirrored from the API, query filters
//! - [`catalog`]: client-side filtering, alphabet bars, "load more" paging
//! - [`quiz`]: answer sheet, completeness check, review display
//! - [`favorites`]: favorite verbs with pluggable storage
//! - [`i18n`]: languages and translation fallback
//! - [`render`]: plain-text tables for the terminal
//! - [`client`]: async REST client (native only)
//! - [`config`]: TOML + environment configuration (native only)
//! - [`export`]: CSV export in the backend's import layout (native only)
//!
//! Everything except `client`, `config` and `export` builds for
//! `wasm32-unknown-unknown` with `default-features = false`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use norskkurs::catalog::TestBoard;
//! use norskkurs::client::ApiClient;
//! use norskkurs::domain::{FilterParams, Level, Stream};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = ApiClient::with_base_url("http://localhost:8001/api/")?;
//!
//!     let params = FilterParams::new().stream(Stream::Bokmaal).level(Level::A2);
//!     let mut board = TestBoard::new(api.list_tests(&params).await?);
//!     board.set_search("grammatikk");
//!
//!     for test in board.visible() {
//!         println!("{} ({})", test.title, test.level);
//!     }
//!     println!("{}", board.status());
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod domain;
pub mod favorites;
pub mod i18n;
pub mod links;
pub mod quiz;
pub mod render;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod export;

// Re-export top-level types for convenience
pub use domain::{
    FilterParams, GlossaryQuery, Level, QuestionMode, QuestionType, Stream, Tagged, Test,
    TestDetail,
};

pub use catalog::{
    GlossaryBoard, GlossaryRow, ModeFilter, Pager, TestBoard, TestFilter, VerbBoard, VerbView,
};

pub use quiz::{AnswerSheet, QuizError, ReviewStatus};

pub use favorites::{FavoriteSet, FavoriteStore, MemoryStore, StoreError};

pub use i18n::{Lang, LocalizedText};

pub use links::AdminLinks;

#[cfg(feature = "native")]
pub use favorites::JsonFileStore;

#[cfg(feature = "native")]
pub use client::{ApiClient, ApiError};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};

#[cfg(feature = "native")]
pub use export::{ExportError, ExportKind};
