//! loadplan command-line tool
//!
//! Runs the teaching-load plan pipeline on local files:
//!
//! - `extract <file>` prints the text recovered from a PDF or Word plan
//! - `parse <file>` extracts, parses and prints the disciplines as JSON
//! - `parse-text <file>` parses text saved by an earlier `extract`
//! - `grammar` prints the grammar descriptor in use
//!
//! Settings can also come from the environment or a `.env` file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use loadplan_core::{InMemoryReportStore, LoadPlanService, DEFAULT_MAX_BYTES};
use loadplan_parser::{CompiledGrammar, GrammarDescriptor};
use shared_types::{DocumentKind, RawDocument};
use tracing::{debug, info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};


/// Command-line arguments for loadplan
#[derive(Parser, Debug)]
#[command(name = "loadplan")]
#[command(about = "Extract discipline records from teaching-load plan PDFs and Word files")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON grammar descriptor to use instead of the built-in template
    #[arg(long, global = true, env = "LOADPLAN_GRAMMAR")]
    grammar: Option<PathBuf>,

    /// Largest document accepted, in bytes
    #[arg(long, global = true, env = "LOADPLAN_MAX_BYTES", default_value_t = DEFAULT_MAX_BYTES)]
    max_bytes: usize,

    /// Academic year recorded on the report, e.g. 2025/2026
    #[arg(long, global = true, env = "LOADPLAN_ACADEMIC_YEAR")]
    academic_year: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the plain text extracted from a document
    Extract {
        file: PathBuf,

        /// Declared MIME type; guessed from the extension when omitted
        #[arg(long)]
        mime: Option<String>,
    },

    /// Extract and parse a document, printing its disciplines as JSON
    Parse {
        file: PathBuf,

        /// Declared MIME type; guessed from the extension when omitted
        #[arg(long)]
        mime: Option<String>,

        /// Also validate the parsed report
        #[arg(long)]
        validate: bool,
    },

    /// Parse text saved by an earlier `extract`
    ParseText { file: PathBuf },

    /// Print the grammar descriptor as JSON
    Grammar,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let grammar = load_grammar(args.grammar.as_deref())?;
    debug!("Using grammar '{}'", grammar.descriptor().name);

    let service =
        LoadPlanService::new(InMemoryReportStore::new(), grammar).with_max_bytes(args.max_bytes);
    let academic_year = args
        .academic_year
        .clone()
        .unwrap_or_else(|| academic_year_of(Utc::now().date_naive()));

    match args.command {
        Command::Extract { file, mime } => {
            let document = read_document(&file, mime.as_deref()).await?;
            let extracted = service.extract_and_store(document, &academic_year).await?;
            print!("{}", extracted.text);
        }
        Command::Parse {
            file,
            mime,
            validate,
        } => {
            let document = read_document(&file, mime.as_deref()).await?;
            let extracted = service.extract_and_store(document, &academic_year).await?;
            let summary = service.parse_report(&extracted.report_id).await?;
            info!("{} disciplines in '{}'", summary.count, extracted.file_name);

            let validation = if validate {
                Some(service.validate_report(&extracted.report_id).await?)
            } else {
                None
            };

            let report = service.report(&extracted.report_id).await?;
            let total_hours = report.total_hours();
            let output = serde_json::json!({
                "reportId": report.id,
                "fileName": report.original_file_name,
                "academicYear": report.academic_year,
                "status": report.status,
                "totalHours": total_hours,
                "disciplines": report.disciplines,
                "validation": validation,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::ParseText { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let records = service.parse_text(&text)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Grammar => {
            println!(
                "{}",
                serde_json::to_string_pretty(service.grammar().descriptor())?
            );
        }
    }

    Ok(())
}

fn load_grammar(path: Option<&Path>) -> Result<CompiledGrammar> {
    let descriptor = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read grammar {}", path.display()))?;
            GrammarDescriptor::from_json(&json)
                .with_context(|| format!("Invalid grammar {}", path.display()))?
        }
        None => GrammarDescriptor::default(),
    };
    Ok(descriptor.compile()?)
}

/// Resolve the declared type from `--mime`, else from the file extension
fn document_kind(file: &Path, mime: Option<&str>) -> Result<DocumentKind> {
    if let Some(mime) = mime {
        return Ok(loadplan_extract::kind_for_mime(mime)?);
    }
    match DocumentKind::from_path(file) {
        Some(kind) => Ok(kind),
        None => bail!(
            "Cannot tell the type of {}; pass --mime",
            file.display()
        ),
    }
}

async fn read_document(file: &Path, mime: Option<&str>) -> Result<RawDocument> {
    let kind = document_kind(file, mime)?;
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    Ok(RawDocument::new(file_name, kind, bytes))
}

/// Academic years start in September
fn academic_year_of(date: NaiveDate) -> String {
    let start = if date.month() >= 9 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}/{}", start, start + 1)
}
