use clap::Parser;
use docbridge_core::traits::SearchBackend;
use docbridge_engine::EngineSearch;

/// Run one search through the engine and print the ranked hits.
#[derive(Parser, Debug)]
#[command(name = "docbridge-search", version, about)]
struct Args {
    /// Query text; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    docbridge_cli::init_tracing();
    let args = Args::parse();
    let settings = docbridge_cli::load_settings()?;
    let backend = EngineSearch::from_settings(&settings)?;
    let query = args.query.join(" ");

    let hits = backend.search(&query)?;
    println!("🔍 Found {} results for: \"{}\"", hits.len(), query.trim());
    for (i, hit) in hits.iter().enumerate() {
        println!("\n  {}. score={:.4}  {}", i + 1, hit.score, hit.doc_path);
        println!("     📝 {}", docbridge_cli::one_line(&hit.preview, 100));
    }
    Ok(())
}
