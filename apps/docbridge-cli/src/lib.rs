//! Shared setup for the docbridge operator binaries.

use docbridge_core::config::{Config, Settings};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise info for everything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Defaults, then `config.toml`, then `config.<env>.toml`, then `DOCBRIDGE_*`.
pub fn load_settings() -> anyhow::Result<Settings> {
    let config = Config::load()?;
    Ok(config.settings()?)
}

/// First `max` characters of `text` on one line.
pub fn one_line(text: &str, max: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > max { format!("{}...", flat.chars().take(max).collect::<String>()) } else { flat }
}
