//! OpenAlex MCP Server - Entry Point
//!
//! Serves MCP over stdio. Logs go to stderr.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use openalex_mcp::{OpenAlexClient, config::Config, server::McpServer};

#[derive(Parser, Debug)]
#[command(name = "openalex-mcp")]
#[command(about = "MCP server for the OpenAlex works API")]
#[command(version)]
struct Cli {
    /// Contact email for the OpenAlex polite pool (higher rate limits)
    #[arg(long, env = "OPENALEX_EMAIL")]
    email: Option<String>,

    /// OpenAlex API key (optional, for authenticated access)
    #[arg(long, env = "OPENALEX_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the OpenAlex API base URL
    #[arg(long, env = "OPENALEX_API_URL")]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout is the protocol channel
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::new(cli.email, cli.api_key);
    if let Some(ref url) = cli.api_url {
        config = config.with_api_url(url)?;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        polite_pool = config.has_email(),
        authenticated = config.has_api_key(),
        api_url = %config.api_url,
        "Starting OpenAlex MCP server"
    );

    if !config.has_email() {
        tracing::warn!("OPENALEX_EMAIL not set; using the anonymous pool with stricter rate limits");
    }

    let client = OpenAlexClient::new(&config)?;
    let server = McpServer::new(client);

    server.run_stdio().await?;

    Ok(())
}
