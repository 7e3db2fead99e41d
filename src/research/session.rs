//! Research session: capability call, then the citation pipeline.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use citemint_sources::{CitationConfig, build_report, collect};

use super::{ResearchCapability, ResearchOutcome, ResearchRequest};
use crate::error::{CiteMintError, Result};

/// Runs research requests against one capability with fixed citation settings.
///
/// Holds no per-request state; every call to [`ResearchSession::run`]
/// returns a fresh outcome.
pub struct ResearchSession {
    capability: Arc<dyn ResearchCapability>,
    citations: CitationConfig,
}

impl ResearchSession {
    /// Create a session, validating the citation settings up front.
    ///
    /// # Errors
    ///
    /// Returns [`CiteMintError::Sources`] if `citations` is invalid.
    pub fn new(capability: Arc<dyn ResearchCapability>, citations: CitationConfig) -> Result<Self> {
        citations.validate()?;
        Ok(Self {
            capability,
            citations,
        })
    }

    /// Answer `request` and build its sourcing report, timed at the current clock.
    ///
    /// # Errors
    ///
    /// Same as [`ResearchSession::run_at`].
    pub async fn run(&self, request: &ResearchRequest) -> Result<ResearchOutcome> {
        self.run_at(request, Utc::now()).await
    }

    /// Answer `request` and build its sourcing report as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`CiteMintError::Research`] for a blank query or when the
    /// capability fails. Malformed tool outputs are dropped, not surfaced.
    pub async fn run_at(
        &self,
        request: &ResearchRequest,
        now: DateTime<Utc>,
    ) -> Result<ResearchOutcome> {
        if request.query.trim().is_empty() {
            return Err(CiteMintError::Research("query must not be empty".into()));
        }

        let answer = self
            .capability
            .fetch_and_answer(request)
            .await
            .map_err(|e| match e {
                CiteMintError::Research(_) => e,
                other => CiteMintError::Research(format!(
                    "{} capability failed: {other}",
                    self.capability.name()
                )),
            })?;

        let gathered = answer.tool_outputs.len();
        let records = collect(answer.tool_outputs, &self.citations, now);
        let report = build_report(records, &self.citations, now);
        tracing::info!(
            capability = self.capability.name(),
            gathered,
            citations = report.len(),
            "research complete"
        );

        let topic = answer
            .topic
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| request.query.trim().to_owned());

        Ok(ResearchOutcome {
            topic,
            style: request.style,
            summary: answer.summary.trim().to_owned(),
            tools_used: dedup_tool_names(answer.tools_used),
            report,
        })
    }
}

/// Drop blank and repeated tool names, keeping first-call order.
fn dedup_tool_names(names: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !unique.iter().any(|u| u == name) {
            unique.push(name.to_owned());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_tool_names_keeps_first_call_order() {
        let names = vec![
            "Search".to_owned(),
            "Wikipedia".to_owned(),
            "Search".to_owned(),
            " ".to_owned(),
            "LoadURL".to_owned(),
        ];
        assert_eq!(dedup_tool_names(names), ["Search", "Wikipedia", "LoadURL"]);
    }

    #[test]
    fn invalid_citation_config_rejected() {
        let capability = Arc::new(super::super::ReplayCapability::new(Default::default()));
        let config = CitationConfig {
            max_snippet_chars: 0,
            ..Default::default()
        };
        assert!(ResearchSession::new(capability, config).is_err());
    }
}
