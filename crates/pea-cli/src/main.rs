//! # pea-fetch
//!
//! Command line front end for the Pea IPFS/IPNS fetchers.
//!
//! Parses commands, layers configuration (global file, project pea.toml,
//! environment, flags), sets up logging and dispatches to the command
//! handlers. Fetched documents go to stdout; status and logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pea_config::FetchSection;
use pea_core::error::{PeaError, PeaResult};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Fetch packages from IPFS and IPNS
#[derive(Parser)]
#[command(name = "pea-fetch", version, about = "Fetch packages from IPFS and IPNS")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// IPFS daemon API address (multiaddr or http URL)
    #[arg(long, global = true, value_name = "ADDR", alias = "ipfs-url")]
    pub endpoint_url: Option<String>,

    /// Tag preferred when it satisfies the wanted range
    #[arg(long, global = true, value_name = "TAG")]
    pub tag: Option<String>,

    /// Ignore versions published after this RFC 3339 instant
    #[arg(long, global = true, value_name = "TIME")]
    pub before: Option<String>,

    /// Let deprecated versions win selection
    #[arg(long, global = true)]
    pub include_deprecated: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the packument behind an ipns:// name
    Packument {
        spec: String,
    },
    /// Print the manifest selected for a spec
    Manifest {
        spec: String,
    },
    /// Download a tarball
    Tarball {
        spec: String,
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Resolve IPNS names to content ids
    Resolve {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

impl Cli {
    /// Flags that override configuration files and environment
    fn fetch_overrides(&self) -> FetchSection {
        FetchSection {
            endpoint_url: self.endpoint_url.clone(),
            default_tag: self.tag.clone(),
            enjoy_by: self.before.clone(),
            include_deprecated: self.include_deprecated.then_some(true),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting pea-fetch v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> PeaResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| PeaError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new(cli.fetch_overrides()).await?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pea_fetch={level},pea_ipfs={level},pea_config={level},pea_resolver={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("pea-fetch encountered an unexpected error: {}", panic_info);
        eprintln!("pea-fetch crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/pea-lang/pea/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
