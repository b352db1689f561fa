//! State Management
//!
//! Global application state and browser persistence.

pub mod global;
pub mod storage;

pub use global::{provide_global_state, GlobalState};
pub use storage::LocalStore;
