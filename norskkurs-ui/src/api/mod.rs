//! Backend access over `fetch`

pub mod client;

pub use client::*;
