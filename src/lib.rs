//! CiteMint: research answers with deduplicated, ranked citations.
//!
//! This crate hosts the citation pipeline from [`citemint_sources`]:
//! Capability (search + LLM) → Collector → Deduplicator & Ranker → Report → Export
//!
//! # Architecture
//!
//! - **Research capability**: an injected [`ResearchCapability`] runs the
//!   tools and the model. Retry and provider choice live there.
//! - **Session**: [`ResearchSession`] sequences one request through the
//!   capability and the citation pipeline, returning a [`ResearchOutcome`].
//! - **Export**: [`export::Exporter`] saves outcomes as JSON or Markdown.
//! - **Config**: [`CiteMintConfig`] loads citation, research and export
//!   settings from TOML.

pub mod config;
pub mod error;
pub mod export;
pub mod research;

pub use config::CiteMintConfig;
pub use error::{CiteMintError, Result};
pub use research::{
    ReplayCapability, ResearchAnswer, ResearchCapability, ResearchOutcome, ResearchRequest,
    ResearchSession, ResearchStyle,
};
