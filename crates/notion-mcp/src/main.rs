//! Notion MCP Server
//!
//! Model Context Protocol server exposing a Notion workspace (databases, pages,
//! content blocks and search) to LLM agents over stdio.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rmcp::ServiceExt;

use notion_client::{api_key_from_env, load_settings, NotionClient, NotionClientConfig};
use notion_mcp::logging;
use notion_mcp::server::NotionMcpServer;

#[derive(Debug, Parser)]
#[command(name = "notion-mcp", version, about = "MCP server for the Notion API")]
struct Args {
    /// Settings file (defaults to ./.notion-mcp.toml, then ~/.config/notion-mcp.toml)
    #[arg(short, long, env = "NOTION_MCP_CONFIG")]
    config: Option<PathBuf>,

    /// Environment file to load instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    logging::init();

    let settings = load_settings(args.config.as_deref())?;
    let api_key = api_key_from_env()?;
    let client = NotionClient::new(&NotionClientConfig::from_settings(api_key, &settings))?;

    tracing::info!(
        base_url = %settings.base_url,
        api_version = %settings.api_version,
        "notion-mcp starting (stdio transport)"
    );

    let server = NotionMcpServer::new(client);
    let transport = rmcp::transport::io::stdio();

    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
