mod config;
mod constants;
mod error;
mod formatters;
mod math;
mod models;
mod registry;
mod search;
mod service;
mod weather;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rmcp::ServiceExt;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::service::ToolServer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Toolset {
    /// add, subtract, multiply, divide
    Math,
    /// Math plus get_weather and optional web_search
    Agent,
}

#[derive(Parser, Debug)]
#[command(name = "mcp-toolbox", version, about = "MCP server for arithmetic and weather tools")]
struct Cli {
    /// Which set of tools to serve
    #[arg(long, value_enum, default_value_t = Toolset::Math)]
    toolset: Toolset,

    /// Tavily API key; enables the web_search tool in the agent toolset
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    tavily_api_key: Option<String>,

    /// Timeout for each outbound HTTP request, in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_toolbox=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting MCP tool server with {:?} toolset", cli.toolset);

    let config = Config::default()
        .with_tavily_api_key(cli.tavily_api_key)
        .with_request_timeout(Duration::from_secs(cli.timeout_secs));

    let tools = match cli.toolset {
        Toolset::Math => ToolServer::math(),
        Toolset::Agent => ToolServer::agent(&config)?,
    };
    tracing::info!("Registered tools: {}", tools.registry().names().join(", "));

    let server = tools.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
