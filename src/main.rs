use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spa_gateway::config::load_config;
use spa_gateway::routing::AssetResolver;
use spa_gateway::{http, ListenerTopology};

#[derive(Parser)]
#[command(name = "spa-gateway")]
#[command(about = "HTTP/HTTPS front door for the lobby single-page app", long_about = None)]
struct Cli {
    /// Run without TLS: a single plaintext listener, no redirect listener.
    #[arg(long = "http-only", visible_alias = "http", default_value_t = false)]
    http_only: bool,

    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spa_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        tracing::error!(error = %error, "Fatal startup error");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(http_only = cli.http_only, "spa-gateway v0.1.0 starting");

    let config = load_config(&cli.config, cli.http_only)?;

    tracing::info!(
        http_port = config.ports.http,
        https_port = config.ports.https,
        static_root = %config.content.static_root.display(),
        banner_dir = %config.content.banner_dir.display(),
        "Configuration loaded"
    );

    let resolver = Arc::new(AssetResolver::new(
        config.content.static_root.clone(),
        config.content.banner_dir.clone(),
    ));
    let app = http::app(resolver);

    ListenerTopology::new(config, cli.http_only).run(app).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
