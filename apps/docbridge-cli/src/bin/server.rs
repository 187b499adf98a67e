use clap::Parser;
use docbridge_server::AppState;
use tracing::info;

/// Serve /search and /suggest over HTTP.
#[derive(Parser, Debug)]
#[command(name = "docbridge-server", version, about)]
struct Args {
    /// Address to bind; overrides server.host
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on; overrides server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    docbridge_cli::init_tracing();
    let args = Args::parse();
    let settings = docbridge_cli::load_settings()?;
    let host = args.host.unwrap_or_else(|| settings.server.host.clone());
    let port = args.port.unwrap_or(settings.server.port);

    let state = AppState::from_settings(&settings)?;
    info!(engine = %settings.engine.path, "engine bridge ready");
    docbridge_server::serve((host.as_str(), port), state).await
}
