//! CLI binary for citemint.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, Utc};
use citemint::export::{self, Exporter};
use citemint::{
    CiteMintConfig, ReplayCapability, ResearchOutcome, ResearchRequest, ResearchSession,
    ResearchStyle,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CiteMint: research answers with deduplicated, ranked citations.
#[derive(Parser)]
#[command(name = "citemint", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "CITEMINT_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Build a citation report from a JSON array of raw tool outputs.
    Report {
        /// File holding the tool outputs.
        #[arg(short, long)]
        input: PathBuf,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
    },

    /// Re-run a recorded research transcript through a full session.
    Replay {
        /// Transcript file (JSON research answer).
        #[arg(short, long)]
        transcript: PathBuf,

        /// The research question.
        #[arg(short, long)]
        query: String,

        /// Summary style (explainer, news, pros_and_cons, timeline).
        #[arg(short, long)]
        style: Option<ResearchStyle>,

        /// Turn safe mode off for this request.
        #[arg(long = "unsafe")]
        unsafe_mode: bool,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
        format: Format,

        /// Also save JSON and Markdown into the export directory.
        #[arg(long)]
        save: bool,

        /// Append the rendered outcome to this text file.
        #[arg(long, value_name = "FILE")]
        append: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Markdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see merge decisions.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("citemint=info,citemint_sources=info")
        }))
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => CiteMintConfig::from_file(path)?,
        None => {
            let default_path = CiteMintConfig::default_config_path();
            if default_path.exists() {
                CiteMintConfig::from_file(&default_path)?
            } else {
                CiteMintConfig::default()
            }
        }
    };

    match cli.command {
        Command::Report { input, format } => run_report(&config, &input, format),
        Command::Replay {
            transcript,
            query,
            style,
            unsafe_mode,
            format,
            save,
            append,
        } => {
            let request = ResearchRequest::new(query)
                .with_style(style.unwrap_or(config.research.default_style))
                .with_safe_mode(config.research.safe_mode && !unsafe_mode);
            let outputs = ReplayOutputs {
                format,
                save,
                append: append.as_deref(),
            };
            run_replay(&config, &transcript, &request, outputs).await
        }
    }
}

fn run_report(config: &CiteMintConfig, input: &Path, format: Format) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input)?;
    let outputs = citemint_sources::parse_raw_outputs(&content)?;
    let report =
        citemint_sources::build_report_from_outputs(outputs, &config.citations, Utc::now())?;

    match format {
        Format::Json => println!("{}", report.to_json()?),
        Format::Markdown => print!("{}", report.to_markdown()),
    }
    Ok(())
}

/// Where a replayed outcome goes besides stdout.
struct ReplayOutputs<'a> {
    format: Format,
    save: bool,
    append: Option<&'a Path>,
}

async fn run_replay(
    config: &CiteMintConfig,
    transcript: &Path,
    request: &ResearchRequest,
    outputs: ReplayOutputs<'_>,
) -> anyhow::Result<()> {
    let capability = Arc::new(ReplayCapability::from_file(transcript)?);
    let session = ResearchSession::new(capability, config.citations.clone())?;
    let outcome = session.run(request).await?;

    print_outcome(&outcome, outputs.format)?;

    if let Some(path) = outputs.append {
        export::append_text(path, &export::render_markdown(&outcome), Local::now())?;
        info!(path = %path.display(), "appended outcome");
    }

    if outputs.save {
        let exporter = Exporter::new(&config.export.directory);
        let json = exporter.save_json(&outcome, None)?;
        let markdown = exporter.save_markdown(&outcome, None)?;
        info!(
            directory = %exporter.directory().display(),
            json = %json.display(),
            markdown = %markdown.display(),
            "exports written"
        );
    }
    Ok(())
}

fn print_outcome(outcome: &ResearchOutcome, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        Format::Markdown => print!("{}", export::render_markdown(outcome)),
    }
    Ok(())
}
