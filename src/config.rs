//! CLI arguments plus an optional TOML override file (§10.3).

use std::path::Path;

use clap::Parser;
use serde::Deserialize;

use crate::constants::{DEFAULT_READ_CHUNK, DEFAULT_SERVER_NAME};
use crate::errors::{ConfigError, ServerError};

/// `ircd <port> <password> [--config <path>]`, matching the reference
/// program's `argv[1]`/`argv[2]` usage.
#[derive(Debug, Parser)]
#[command(name = "ircd", about = "A single-threaded IRC server")]
pub struct Args {
    /// TCP port to listen on.
    pub port: u16,

    /// Shared server password required before NICK/USER.
    pub password: String,

    /// Optional TOML file overriding the server name and read chunk size.
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileOverrides {
    server_name: Option<String>,
    read_chunk_size: Option<usize>,
}

/// Fully resolved runtime configuration: CLI-mandatory values plus
/// whatever the optional file overrode.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub password: String,
    pub server_name: String,
    pub read_chunk_size: usize,
}

impl Config {
    pub fn load(args: Args) -> Result<Self, ServerError> {
        let overrides = match &args.config {
            Some(path) => load_overrides(path).map_err(|source| ServerError::Config {
                path: path.clone(),
                source,
            })?,
            None => FileOverrides::default(),
        };

        Ok(Config {
            port: args.port,
            password: args.password,
            server_name: overrides.server_name.unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            read_chunk_size: overrides.read_chunk_size.unwrap_or(DEFAULT_READ_CHUNK),
        })
    }
}

fn load_overrides(path: &str) -> Result<FileOverrides, ConfigError> {
    let content = std::fs::read_to_string(Path::new(path))?;
    let overrides: FileOverrides = toml::from_str(&content)?;
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_config_file() {
        let args = Args {
            port: 6667,
            password: "secret".into(),
            config: None,
        };
        let cfg = Config::load(args).unwrap();
        assert_eq!(cfg.server_name, DEFAULT_SERVER_NAME);
        assert_eq!(cfg.read_chunk_size, DEFAULT_READ_CHUNK);
    }
}
