//! Direct access to the two catalog operations, for checking ids by hand.

use tokio::runtime::Runtime;

use crate::catalog::{ExternalSource, TmdbClient, adapter};
use crate::config::Config;
use crate::error::NormalizeError;

/// Check whether a TMDB id is a series
pub fn cmd_verify(rt: &Runtime, config: &Config, tmdb_id: u64) -> anyhow::Result<()> {
    let client = client(config)?;
    let verified = rt
        .block_on(client.verify_series(tmdb_id))
        .map_err(NormalizeError::from)?;

    if verified {
        println!("✓ {} is a TMDB series id", tmdb_id);
    } else {
        println!("✗ {} is not a TMDB series id", tmdb_id);
    }
    Ok(())
}

/// Find the TMDB show id for an external id
pub fn cmd_lookup(
    rt: &Runtime,
    config: &Config,
    external_id: &str,
    source: ExternalSource,
) -> anyhow::Result<()> {
    let client = client(config)?;
    let response = rt
        .block_on(client.find_by_external_id(external_id, source))
        .map_err(NormalizeError::from)?;

    match adapter::show_id(&response) {
        Some(show_id) => println!("✓ {} {} -> TMDB {}", source, external_id, show_id),
        None => println!("✗ No TMDB show found for {} {}", source, external_id),
    }
    Ok(())
}

fn client(config: &Config) -> anyhow::Result<TmdbClient> {
    let Some(api_key) = config.catalog.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
        anyhow::bail!("TMDB API key required: use --api-key, set TMDB_API_KEY, or add it to the config file");
    };
    Ok(TmdbClient::from_config(&config.catalog, api_key))
}
