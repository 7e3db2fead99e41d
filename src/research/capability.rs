//! The injected fetch-and-answer capability.
//!
//! Implementations own everything network-facing: tool calls, the LLM
//! request, retry and back-off, provider selection. The citation pipeline
//! only ever sees the [`ResearchAnswer`] they return.

use std::path::Path;

use async_trait::async_trait;

use super::{ResearchAnswer, ResearchRequest};
use crate::error::{CiteMintError, Result};

/// Answers a research request and reports the tool outputs it gathered.
#[async_trait]
pub trait ResearchCapability: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Run the tools and the model for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`CiteMintError::Research`] when no answer could be produced.
    async fn fetch_and_answer(&self, request: &ResearchRequest) -> Result<ResearchAnswer>;
}

/// Replays a recorded answer regardless of the request.
///
/// Used to re-run the citation pipeline over saved transcripts.
#[derive(Debug, Clone)]
pub struct ReplayCapability {
    answer: ResearchAnswer,
}

impl ReplayCapability {
    /// Replay `answer` for every request.
    pub fn new(answer: ResearchAnswer) -> Self {
        Self { answer }
    }

    /// Load a transcript saved as a JSON [`ResearchAnswer`].
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`CiteMintError::Serialization`] if it is not a valid transcript.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let answer = serde_json::from_str(&content).map_err(|e| {
            CiteMintError::Serialization(format!("transcript {}: {e}", path.display()))
        })?;
        Ok(Self::new(answer))
    }
}

#[async_trait]
impl ResearchCapability for ReplayCapability {
    fn name(&self) -> &str {
        "replay"
    }

    async fn fetch_and_answer(&self, request: &ResearchRequest) -> Result<ResearchAnswer> {
        tracing::debug!(framed = %request.framed_query(), "replaying recorded answer");
        Ok(self.answer.clone())
    }
}
