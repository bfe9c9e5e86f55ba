//! # Blogcrew Core
//!
//! Agent orchestration behind the Blogcrew web front-end.
//!
//! ## Architecture
//!
//! - `crew/` - Agents, tasks and the sequential crew engine
//! - `blog/` - The researcher + writer crew and its prompts
//! - `generation` - Topic in, [`generation::BlogOutcome`] out
//! - `models` - LLM provider configuration
//! - `tools/` - Radkit tools available to agents
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blogcrew_core::blog::{blog_crew, BlogSettings};
//! use blogcrew_core::crew::RadkitExecutor;
//! use blogcrew_core::generation::generate_blog;
//!
//! let crew = blog_crew(&BlogSettings::default(), Arc::new(RadkitExecutor))?;
//! let outcome = generate_blog(&crew, "Rust in embedded systems").await;
//! ```

pub mod blog;
pub mod crew;
pub mod generation;
pub mod models;
pub mod tools;
