use std::path::PathBuf;

use clap::Parser;
use docbridge_engine::EngineClient;

/// Ask the engine to (re)build its index from a document directory.
#[derive(Parser, Debug)]
#[command(name = "docbridge-index", version, about)]
struct Args {
    /// Directory of documents to index; relative paths resolve against the current directory
    doc_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    docbridge_cli::init_tracing();
    let args = Args::parse();
    let settings = docbridge_cli::load_settings()?;
    let client = EngineClient::new(&settings.engine)?;

    println!("🔨 Building index with {}", client.engine_path().display());
    let output = client.build_index(&args.doc_dir)?;
    if !output.stdout.trim().is_empty() {
        println!("{}", output.stdout.trim_end());
    }
    if !output.stderr.trim().is_empty() {
        eprintln!("{}", output.stderr.trim_end());
    }
    println!("✅ Index built in {}", client.index_dir().display());
    Ok(())
}
