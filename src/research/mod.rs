//! Research requests, answers and outcomes.
//!
//! A request goes to an injected [`ResearchCapability`] (search + LLM), and
//! the capability's tool outputs go through the citation pipeline. The
//! session owns that sequencing; the capability never sees the pipeline and
//! the pipeline never calls the capability.

pub mod capability;
pub mod session;

use std::fmt;
use std::str::FromStr;

use citemint_sources::{RawToolOutput, Report};
use serde::{Deserialize, Serialize};

pub use capability::{ReplayCapability, ResearchCapability};
pub use session::ResearchSession;

/// How the summary should be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchStyle {
    /// Neutral explanation of the topic.
    #[default]
    Explainer,
    /// News-style, most recent developments first.
    News,
    /// Balanced list of advantages and drawbacks.
    #[serde(alias = "pros & cons")]
    ProsAndCons,
    /// Chronological account.
    Timeline,
}

impl ResearchStyle {
    /// Label used in the framed query and exported documents.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Explainer => "explainer",
            Self::News => "news",
            Self::ProsAndCons => "pros & cons",
            Self::Timeline => "timeline",
        }
    }

    /// Returns all styles.
    pub fn all() -> &'static [ResearchStyle] {
        &[Self::Explainer, Self::News, Self::ProsAndCons, Self::Timeline]
    }
}

impl fmt::Display for ResearchStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResearchStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explainer" => Ok(Self::Explainer),
            "news" => Ok(Self::News),
            "pros & cons" | "pros_and_cons" | "pros-and-cons" => Ok(Self::ProsAndCons),
            "timeline" => Ok(Self::Timeline),
            other => Err(format!(
                "unknown style {other:?} (expected explainer, news, pros_and_cons or timeline)"
            )),
        }
    }
}

/// A user's research question plus presentation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRequest {
    /// The question as typed.
    pub query: String,
    /// Requested summary style.
    pub style: ResearchStyle,
    /// Ask the capability to answer conservatively.
    pub safe_mode: bool,
}

impl ResearchRequest {
    /// A request with the default style and safe mode on.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            style: ResearchStyle::default(),
            safe_mode: true,
        }
    }

    /// Set the summary style.
    #[must_use]
    pub fn with_style(mut self, style: ResearchStyle) -> Self {
        self.style = style;
        self
    }

    /// Set safe mode.
    #[must_use]
    pub fn with_safe_mode(mut self, safe_mode: bool) -> Self {
        self.safe_mode = safe_mode;
        self
    }

    /// The query as handed to the capability: `[style=<style>; safe=<bool>] <query>`.
    pub fn framed_query(&self) -> String {
        format!(
            "[style={}; safe={}] {}",
            self.style,
            self.safe_mode,
            self.query.trim()
        )
    }
}

/// What a capability returns for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchAnswer {
    /// Topic as phrased by the model, if it gave one.
    pub topic: Option<String>,
    /// The generated summary.
    pub summary: String,
    /// Every tool result gathered while answering.
    ///
    /// Unreadable entries are dropped one by one instead of failing the
    /// whole answer.
    #[serde(deserialize_with = "citemint_sources::collector::payload::deserialize_tool_outputs")]
    pub tool_outputs: Vec<RawToolOutput>,
    /// Names of the tools that were called, possibly repeated.
    pub tools_used: Vec<String>,
}

/// A finished research request: summary plus its sourcing report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchOutcome {
    /// Topic heading.
    pub topic: String,
    /// Style the summary was requested in.
    pub style: ResearchStyle,
    /// The generated summary.
    pub summary: String,
    /// Tools called, deduplicated in first-call order.
    pub tools_used: Vec<String>,
    /// Citations, why-bullets and freshness notes.
    pub report: Report,
}
