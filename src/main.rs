//! PrimeNG documentation server.
//!
//! ## Commands
//!
//! ### serve (default)
//! Serves the MCP tools on stdin/stdout until stdin closes:
//! ```bash
//! primeng-docs serve --cache-dir ~/.cache/primeng-docs
//! ```
//!
//! ### call
//! Runs a single tool and prints its text:
//! ```bash
//! primeng-docs call get_component_doc --args '{"component": "button"}'
//! ```

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use primeng_docs::{logging, DocsServer, DocsService, LogLevel, ServerConfig};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "primeng-docs", version)]
#[command(about = "Documentation retrieval and code generation server for PrimeNG")]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOptions,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve tool calls over stdio
    Serve,

    /// Run one tool and print its output
    Call {
        /// Tool name (e.g. get_component_doc)
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

/// Options layered over the configuration file.
#[derive(Args, Debug)]
struct ConfigOptions {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cache directory
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Disable the disk cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Cache time-to-live in milliseconds
    #[arg(long, global = true)]
    ttl_ms: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Attempts per page fetch
    #[arg(long, global = true)]
    retries: Option<u32>,

    /// Minimum log level (debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Documentation site root
    #[arg(long, global = true)]
    base_url: Option<String>,
}

impl ConfigOptions {
    fn load(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(dir) = &self.cache_dir {
            config.cache.location = dir.clone();
        }
        if self.no_cache {
            config.cache.enabled = false;
        }
        if let Some(ttl) = self.ttl_ms {
            config.cache.ttl = ttl;
        }
        if let Some(timeout) = self.timeout_ms {
            config.scraping.timeout = timeout;
        }
        if let Some(retries) = self.retries {
            config.scraping.retries = retries;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(url) = &self.base_url {
            config.scraping.base_url = url.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.overrides.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("primeng-docs: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(config.logging.level) {
        eprintln!("primeng-docs: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli.command.unwrap_or(Command::Serve), &config).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &ServerConfig) -> Result<ExitCode> {
    let mut server = DocsServer::new(config).context("failed to build server")?;
    server.initialize().await.context("failed to initialize server")?;

    match command {
        Command::Serve => {
            let server = Arc::new(server);
            DocsService::new(Arc::clone(&server)).run_stdio().await?;
            server.shutdown().await;
            Ok(ExitCode::SUCCESS)
        }
        Command::Call { tool, args } => {
            let arguments: Value = serde_json::from_str(&args).context("--args must be valid JSON")?;
            if !arguments.is_object() {
                bail!("--args must be a JSON object");
            }

            let response = server.call_tool(&tool, &arguments).await?;
            server.shutdown().await;

            println!("{}", response.text);
            Ok(if response.is_error { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
    }
}
