//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod filters;
pub mod loading;
pub mod nav;
pub mod question;
pub mod toast;

pub use filters::{AlphabetBar, LoadMore, TagPills};
pub use loading::{EmptyState, ListSkeleton, Loading};
pub use nav::Nav;
pub use question::QuestionCard;
pub use toast::Toast;
