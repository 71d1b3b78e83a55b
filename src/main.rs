//! Jupiter trade bridge CLI
//!
//! Serves the trading tools over stdio, or runs one of them once from the
//! command line.

use clap::{Parser, Subcommand};
use jupiter_trade_bridge::runner::secret_from_env;
use jupiter_trade_bridge::tools::{ToolRegistry, TOOL_GET_BALANCE, TOOL_GET_QUOTE};
use jupiter_trade_bridge::{BridgeRunner, Config, Error, Result, RpcConfig};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "trade-bridge")]
#[command(about = "Jupiter swap tools for Solana, served over stdio")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the tools over stdin/stdout
    Serve,

    /// List the tools and their input schemas
    Tools,

    /// Get a swap quote
    Quote {
        /// Input token mint, or SOL
        #[arg(long)]
        input: String,

        /// Output token mint, or SOL
        #[arg(long)]
        output: String,

        /// Amount of the input token in human units
        #[arg(long)]
        amount: f64,

        /// Decimals of the input token
        #[arg(long, default_value_t = 9)]
        decimals: u32,

        /// Slippage tolerance in basis points
        #[arg(long, default_value_t = 50)]
        slippage_bps: u32,
    },

    /// Show the configured wallet's balances
    Balance {
        /// Token mint to include
        #[arg(long)]
        token: Option<String>,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // stdout carries protocol frames, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    if cli.log_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    let config = load_config(cli.config.as_ref())?;
    let runner = BridgeRunner::new(config, RpcConfig::from_env()).with_secret(secret_from_env());

    match cli.command {
        Commands::Serve => {
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting trade bridge");
            runner.serve_stdio().await?;
        }
        Commands::Tools => {
            let registry = runner.build_registry()?;
            print_tools(&registry)?;
        }
        Commands::Quote {
            input,
            output,
            amount,
            decimals,
            slippage_bps,
        } => {
            let args = json!({
                "input_mint": input,
                "output_mint": output,
                "amount": amount,
                "input_decimals": decimals,
                "slippage_bps": slippage_bps,
            });
            let reply = runner.build_registry()?.invoke(TOOL_GET_QUOTE, args).await;
            println!("{}", reply.text);
        }
        Commands::Balance { token } => {
            let args = json!({ "token_mint": token });
            let reply = runner.build_registry()?.invoke(TOOL_GET_BALANCE, args).await;
            println!("{}", reply.text);
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(runner.config())?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content).map_err(|e| Error::Config(e.to_string()))
}

fn print_tools(registry: &ToolRegistry) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&registry.list())?);

    println!();
    println!("Well-known mints:");
    for token in jupiter_trade_bridge::tokens::KNOWN_TOKENS {
        println!("  {:<5} {} ({} decimals)", token.symbol, token.mint, token.decimals);
    }
    Ok(())
}
