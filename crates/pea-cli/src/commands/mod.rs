//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking the parsed arguments and a
//! shared [`CommandContext`].

use std::sync::Arc;

use camino::Utf8PathBuf;
use pea_config::{ConfigLoader, FetchOptions, FetchSection};
use pea_core::error::{PeaError, PeaResult};
use pea_ipfs::{FetchContext, FetchSpec};
use tracing::{debug, info};

pub mod manifest;
pub mod packument;
pub mod resolve;
pub mod tarball;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

const PROTOCOLS: [&str; 2] = ["ipfs", "ipns"];

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    /// Effective options after layering configuration
    pub options: FetchOptions,
    pub fetch: Arc<FetchContext>,
}

impl CommandContext {
    /// Create a new command context, loading configuration around the cwd
    pub async fn new(overrides: FetchSection) -> PeaResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| PeaError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| PeaError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("{} is not valid UTF-8", path.display()),
        })?;

        let options = ConfigLoader::new(cwd.clone()).load_fetch_options(overrides).await?;
        debug!("Effective fetch options: {:?}", options);

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
            options,
            fetch: Arc::new(FetchContext::default()),
        })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> PeaResult<()> {
    match command {
        Commands::Packument { spec } => {
            info!("Fetching packument: {}", spec);
            packument::execute(&spec, ctx).await
        },
        Commands::Manifest { spec } => {
            info!("Fetching manifest: {}", spec);
            manifest::execute(&spec, ctx).await
        },
        Commands::Tarball { spec, output } => {
            info!("Fetching tarball: {}", spec);
            tarball::execute(&spec, output, ctx).await
        },
        Commands::Resolve { names } => {
            info!("Resolving {} name(s)", names.len());
            resolve::execute(&names, ctx).await
        },
    }
}

/// Parse a request spec, pointing out likely protocol typos
pub fn parse_spec(raw: &str, ctx: &CommandContext) -> PeaResult<FetchSpec> {
    FetchSpec::parse(raw).map_err(|e| {
        let scheme = raw.split_once("://").map_or(raw, |(scheme, _)| scheme);
        if let Some(protocol) = suggest_protocol(scheme) {
            ctx.output.info(&format!("Did you mean '{}://'?", protocol));
        }
        e
    })
}

/// Suggest a protocol close to a mistyped one
pub fn suggest_protocol(input: &str) -> Option<&'static str> {
    let input = input.trim().to_ascii_lowercase();

    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for &protocol in &PROTOCOLS {
        let distance = edit_distance(&input, protocol);
        if distance < best_distance && (1..=2).contains(&distance) {
            best_distance = distance;
            best_match = Some(protocol);
        }
    }

    best_match
}

/// Calculate edit distance between two strings
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = std::cmp::min(
                std::cmp::min(
                    matrix[i - 1][j] + 1, // deletion
                    matrix[i][j - 1] + 1, // insertion
                ),
                matrix[i - 1][j - 1] + cost, // substitution
            );
        }
    }

    matrix[a_len][b_len]
}

/// Pretty JSON for printing
pub fn render_json<T: serde::Serialize>(value: &T) -> PeaResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| PeaError::PackumentParse {
        message: format!("Failed to render JSON: {}", e),
    })
}
