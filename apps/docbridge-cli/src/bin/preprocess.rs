use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use docbridge_text::{DocumentBatchProcessor, OutputMode};

/// Normalize a directory of text documents for indexing.
#[derive(Parser, Debug)]
#[command(name = "docbridge-preprocess", version, about)]
struct Args {
    /// Directory holding the raw documents
    input_dir: PathBuf,

    /// Where to write one output file per document
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to write for each document
    #[arg(long, value_enum, default_value_t = Mode::Tokens)]
    mode: Mode,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,

    /// Keep words unstemmed
    #[arg(long)]
    no_stem: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Readable cleaned text
    Cleaned,
    /// Space-separated stems
    Tokens,
}

fn main() -> anyhow::Result<()> {
    docbridge_cli::init_tracing();
    let args = Args::parse();
    let mut settings = docbridge_cli::load_settings()?;
    if args.no_stem {
        settings.normalizer.stemming = false;
    }
    let mode = match args.mode {
        Mode::Cleaned => OutputMode::Cleaned,
        Mode::Tokens => OutputMode::Tokens,
    };

    let processor = DocumentBatchProcessor::new(&settings.normalizer).with_mode(mode).with_progress(args.progress);
    let report = processor.process_directory(&args.input_dir, args.output.as_deref())?;

    println!("📄 Processed {} documents from {}", report.processed, args.input_dir.display());
    if !report.failures.is_empty() {
        println!("⚠️  {} documents skipped:", report.failures.len());
        for failure in &report.failures {
            println!("  - {}", failure);
        }
    }
    Ok(())
}
