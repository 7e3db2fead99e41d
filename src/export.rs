//! Saving research outcomes as JSON, Markdown or appended text.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{CiteMintError, Result};
use crate::research::ResearchOutcome;

/// Writes outcomes into one export directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    directory: PathBuf,
}

impl Exporter {
    /// Export into `directory` (created on first save).
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The export directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Save `outcome` as pretty JSON.
    ///
    /// `filename` defaults to `research_<YYYYmmdd_HHMMSS>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`CiteMintError::Export`] for an unsafe filename, or an I/O
    /// or serialisation error if writing fails.
    pub fn save_json(&self, outcome: &ResearchOutcome, filename: Option<&str>) -> Result<PathBuf> {
        let content = serde_json::to_string_pretty(outcome)
            .map_err(|e| CiteMintError::Serialization(e.to_string()))?;
        self.write(filename, "json", &content)
    }

    /// Save `outcome` as a Markdown document.
    ///
    /// `filename` defaults to `research_<YYYYmmdd_HHMMSS>.md`.
    ///
    /// # Errors
    ///
    /// Same as [`Exporter::save_json`].
    pub fn save_markdown(
        &self,
        outcome: &ResearchOutcome,
        filename: Option<&str>,
    ) -> Result<PathBuf> {
        self.write(filename, "md", &render_markdown(outcome))
    }

    fn write(&self, filename: Option<&str>, extension: &str, content: &str) -> Result<PathBuf> {
        let name = match filename {
            Some(name) => validate_filename(name)?.to_owned(),
            None => default_filename(Local::now(), extension),
        };
        std::fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(name);
        std::fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "saved export");
        Ok(path)
    }
}

/// Render the full research document: heading, style, summary, sources,
/// bullets, freshness and the tools used.
pub fn render_markdown(outcome: &ResearchOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", outcome.topic);
    let _ = writeln!(out, "**Style:** {}\n", outcome.style);
    let _ = writeln!(out, "## Summary\n\n{}\n", outcome.summary);
    out.push_str(&outcome.report.to_markdown());
    let tools = if outcome.tools_used.is_empty() {
        "none".to_owned()
    } else {
        outcome.tools_used.join(", ")
    };
    let _ = writeln!(out, "\nTools used: {tools}");
    out
}

/// Append `data` to a text file under a timestamped header, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or written.
pub fn append_text(path: &Path, data: &str, now: DateTime<Local>) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    write!(
        file,
        "--- Research Output --- \nTimestamp: {}\n\n{data}\n\n",
        now.format("%Y-%m-%d %H:%M:%S")
    )?;
    Ok(path.to_path_buf())
}

fn default_filename(now: DateTime<Local>, extension: &str) -> String {
    format!("research_{}.{extension}", now.format("%Y%m%d_%H%M%S"))
}

/// Reject names that would escape the export directory.
fn validate_filename(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || Path::new(name).is_absolute()
    {
        return Err(CiteMintError::Export(format!("invalid export filename {name:?}")));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use chrono::{TimeZone, Utc};
    use citemint_sources::{CitationConfig, RawToolOutput, build_report_from_outputs};

    use super::*;
    use crate::research::ResearchStyle;

    fn outcome() -> ResearchOutcome {
        let report = build_report_from_outputs(
            vec![RawToolOutput::wikipedia(
                "https://en.wikipedia.org/wiki/Web3",
                "Web3",
                "Decentralised web.",
            )],
            &CitationConfig::default(),
            Utc::now(),
        )
        .unwrap();
        ResearchOutcome {
            topic: "Timeline of Web3".into(),
            style: ResearchStyle::Timeline,
            summary: "Web3 emerged around 2014 [1].".into(),
            tools_used: vec!["Wikipedia".into()],
            report,
        }
    }

    #[test]
    fn save_json_with_explicit_name() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path().join("exports"));
        let path = exporter.save_json(&outcome(), Some("web3.json")).unwrap();
        assert_eq!(path, dir.path().join("exports").join("web3.json"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["topic"], "Timeline of Web3");
        assert_eq!(value["style"], "timeline");
        assert_eq!(value["report"]["citations"][0]["index"], 1);
    }

    #[test]
    fn save_markdown_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path());
        let path = exporter.save_markdown(&outcome(), None).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("research_"));
        assert!(name.ends_with(".md"));

        let md = std::fs::read_to_string(&path).unwrap();
        assert!(md.starts_with("# Timeline of Web3\n\n**Style:** timeline\n"));
        assert!(md.contains("## Summary\n\nWeb3 emerged around 2014 [1].\n"));
        assert!(md.contains("1. [Web3](https://en.wikipedia.org/wiki/Web3)"));
        assert!(md.trim_end().ends_with("Tools used: Wikipedia"));
    }

    #[test]
    fn rejects_escaping_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path());
        for bad in ["../x.json", "a/b.json", "", "/etc/passwd", "..\\x.json"] {
            let err = exporter.save_json(&outcome(), Some(bad)).unwrap_err();
            assert!(matches!(err, CiteMintError::Export(_)), "{bad:?} accepted");
        }
    }

    #[test]
    fn append_text_adds_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes").join("research_output.txt");
        let now = Local.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();

        append_text(&path, "first", now).unwrap();
        append_text(&path, "second", now).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "--- Research Output --- \nTimestamp: 2026-10-16 09:30:00\n\nfirst\n\n\
             --- Research Output --- \nTimestamp: 2026-10-16 09:30:00\n\nsecond\n\n"
        );
    }

    #[test]
    fn default_filename_format() {
        let now = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(default_filename(now, "json"), "research_20260102_030405.json");
    }
}
