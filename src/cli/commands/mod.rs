//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `normalize`: run a webhook document through the full pipeline
//! - `catalog`: exercise the two catalog operations directly

mod catalog;
mod normalize;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::catalog::ExternalSource;
use crate::config::{self, Config};
use crate::error::Result;

pub use catalog::{cmd_lookup, cmd_verify};
pub use normalize::cmd_normalize;

/// Media-server webhook normalizer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// TMDB API key (overrides the config file)
    #[arg(long, global = true, env = "TMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a webhook document and print the record as a JSON line
    Normalize {
        /// Path to the JSON document, or `-` for stdin
        path: PathBuf,
        /// Media server the document came from
        #[arg(long, default_value = "emby")]
        source: String,
        /// Skip TMDB verification and lookups
        #[arg(long)]
        no_enrich: bool,
    },
    /// Check whether a TMDB id is a series
    Verify {
        /// Numeric TMDB id
        tmdb_id: u64,
    },
    /// Find the TMDB show id for an IMDb or TVDB id
    Lookup {
        /// External id (e.g. tt0944947 or 121361)
        id: String,
        /// Which catalog the id belongs to
        #[arg(long, value_enum)]
        source: ExternalSource,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Normalize {
            path,
            source,
            no_enrich,
        } => cmd_normalize(&rt, &config, path, source, *no_enrich),
        Commands::Verify { tmdb_id } => cmd_verify(&rt, &config, *tmdb_id),
        Commands::Lookup { id, source } => cmd_lookup(&rt, &config, id, *source),
    }
}

/// Config from `--config` (strict) or the default location (lenient),
/// with the `--api-key` / `TMDB_API_KEY` override applied.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load(),
    };

    if let Some(key) = &cli.api_key {
        config.catalog.api_key = Some(key.clone());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalize() {
        let cli = Cli::try_parse_from(["hook-normalizer", "normalize", "-", "--no-enrich"]).unwrap();
        match cli.command {
            Commands::Normalize {
                path,
                source,
                no_enrich,
            } => {
                assert_eq!(path, PathBuf::from("-"));
                assert_eq!(source, "emby");
                assert!(no_enrich);
            }
            _ => panic!("expected normalize"),
        }
    }

    #[test]
    fn test_parse_lookup_source() {
        let cli = Cli::try_parse_from(["hook-normalizer", "lookup", "tt0944947", "--source", "imdb"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Lookup {
                source: ExternalSource::Imdb,
                ..
            }
        ));
    }

    #[test]
    fn test_api_key_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\napi_key = \"from-file\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "hook-normalizer",
            "--config",
            path.to_str().unwrap(),
            "--api-key",
            "from-flag",
            "verify",
            "1399",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();
        assert_eq!(config.catalog.api_key.as_deref(), Some("from-flag"));
    }

    #[test]
    fn test_unreadable_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog\n").unwrap();

        let cli = Cli::try_parse_from([
            "hook-normalizer",
            "--config",
            path.to_str().unwrap(),
            "verify",
            "1399",
        ])
        .unwrap();

        let err = load_config(&cli).unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(config::ConfigError::Parse(_, _))));
    }
}
