//! # Radkit-Compatible Tools
//!
//! Tools annotated with `#[tool]` that agents can call while working.

pub mod web_search;
