use std::env;
use std::path::PathBuf;

// Print the cleaned text and the index tokens for one document.
// Usage:
//   cargo run -p docbridge-text --example normalize -- <file> [--no-stem]

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut file: Option<PathBuf> = None;
    let mut stemming = true;
    for arg in &args {
        match arg.as_str() {
            "--no-stem" => stemming = false,
            s if s.starts_with('-') => { eprintln!("Unknown flag: {}", s); std::process::exit(2); }
            s => file = Some(PathBuf::from(s)),
        }
    }
    let Some(file) = file else {
        eprintln!("Usage: cargo run -p docbridge-text --example normalize -- <file> [--no-stem]");
        std::process::exit(1);
    };

    let settings = docbridge_core::config::NormalizerSettings { stemming, ..Default::default() };
    let normalizer = docbridge_text::Normalizer::from_settings(&settings);
    let text = docbridge_core::encoding::decode_lossy(&std::fs::read(&file)?);

    println!("Cleaned\n=======\n{}\n", normalizer.clean(&text));
    let tokens = normalizer.normalize(&text);
    println!("Tokens ({})\n======\n{}", tokens.len(), tokens.join(" "));
    Ok(())
}
