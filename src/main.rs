//! serpgate - query SEO data vendors from the command line

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use serpgate::utils::init_logging;
use serpgate::{Gateway, GatewayConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "serpgate", version, about = "Rate-limited, cached SEO data queries")]
struct Cli {
    /// YAML configuration file; environment variables alone are used if omitted
    #[arg(short, long, env = "SERPGATE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Monthly search volume for keywords
    Volume {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Organic results for a keyword
    Serp { keyword: String },
    /// Organic competitors of a domain
    Competitors { target: String },
    /// Backlink summary of a domain
    Backlinks { target: String },
    /// Keywords a domain ranks for
    Ranked { target: String },
    /// Complete a prompt with an LLM vendor
    Complete {
        prompt: String,
        #[arg(long, default_value = "openai")]
        vendor: String,
    },
    /// Rate limit windows and cache statistics
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => GatewayConfig::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => GatewayConfig::from_env()?,
    };
    if cli.json_logs {
        config.logging.json = true;
    }
    init_logging(&config.logging)?;

    let gateway = Gateway::new(config)?;

    match cli.command {
        Command::Volume { keywords } => print(&gateway.seo()?.keyword_volume(&keywords).await?),
        Command::Serp { keyword } => print(&gateway.seo()?.serp_results(&keyword).await?),
        Command::Competitors { target } => print(&gateway.seo()?.competitors(&target).await?),
        Command::Backlinks { target } => print(&gateway.seo()?.backlink_summary(&target).await?),
        Command::Ranked { target } => print(&gateway.seo()?.ranked_keywords(&target).await?),
        Command::Complete { prompt, vendor } => {
            let completion = gateway.content(&vendor)?.complete(&prompt).await?;
            println!("{}", completion.text);
            Ok(())
        }
        Command::Status => print(&json!({
            "vendors": gateway.vendors(),
            "rate_limits": gateway.status(),
            "cache": gateway.cache_stats(),
        })),
    }
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
