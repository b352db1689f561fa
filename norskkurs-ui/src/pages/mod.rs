//! Pages
//!
//! Top-level page components for each route.

pub mod expressions;
pub mod glossary;
pub mod library;
pub mod readings;
pub mod settings;
pub mod verbs;

pub use expressions::Expressions;
pub use glossary::Glossary;
pub use library::Library;
pub use readings::Readings;
pub use settings::Settings;
pub use tests::Tests;
pub use verbs::Verbs;
