use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tarifa_classify::{Classification, Classifier, KeywordConfig};
use tarifa_extract::{decode_entries, MemoryCache, MockExtractor, StatementPipeline};
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Parser, Debug)]
#[command(name = "tarifa", version, about = "Group bank statement fees by keyword")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify extracted statement entries (a JSON array) into fee tables
    Classify {
        /// Keyword file with `collapsed` and `categories` lists
        #[arg(long, short)]
        keywords: PathBuf,

        /// JSON produced by the extraction step; Markdown fences are tolerated
        entries: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Run the whole pipeline over a statement PDF, using a previously saved
    /// extraction summary in place of the remote extractor
    Statement {
        #[arg(long, short)]
        keywords: PathBuf,

        /// Extraction output to replay for this statement
        #[arg(long, short)]
        summary: PathBuf,

        /// Statement PDF
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print the cache key a statement file would be stored under
    CacheKey {
        /// Statement PDF
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Classify {
            keywords,
            entries,
            format,
        } => classify(&keywords, &entries, format),
        Command::Statement {
            keywords,
            summary,
            file,
            format,
        } => statement(&keywords, &summary, &file, format).await,
        Command::CacheKey { file } => {
            let bytes = std::fs::read(&file).with_context(|| format!("read {}", file.display()))?;
            println!("{}", tarifa_extract::cache_key(&bytes));
            Ok(())
        }
    }
}

fn load_keywords(path: &Path) -> Result<KeywordConfig> {
    KeywordConfig::load(path).with_context(|| format!("load keywords from {}", path.display()))
}

fn classify(keywords: &Path, entries: &Path, format: Format) -> Result<()> {
    let config = load_keywords(keywords)?;

    let summary = std::fs::read_to_string(entries)
        .with_context(|| format!("read {}", entries.display()))?;
    let entries = decode_entries(&summary).context("decode statement entries")?;

    let classification = Classifier::new(&config).classify(&entries);
    print_classification(&classification, format)
}

async fn statement(keywords: &Path, summary: &Path, file: &Path, format: Format) -> Result<()> {
    let config = load_keywords(keywords)?;
    let summary = std::fs::read_to_string(summary)
        .with_context(|| format!("read {}", summary.display()))?;

    let pipeline = StatementPipeline::new(
        MockExtractor::new(summary),
        MemoryCache::new(),
        Classifier::new(&config),
    );
    let report = pipeline
        .process_file(file)
        .await
        .with_context(|| format!("process {}", file.display()))?;
    tracing::info!(
        "Processed {} ({} entries, hash {})",
        file.display(),
        report.entries.len(),
        report.content_hash
    );

    print_classification(&report.classification, format)
}

fn print_classification(classification: &Classification, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(classification).context("serialize result")?;
            println!("{json}");
        }
        Format::Text => print!("{}", report::render(classification)),
    }
    Ok(())
}
