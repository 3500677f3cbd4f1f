//! Webhook normalization command.

use std::io::Read;
use std::path::Path;

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::{Error, ResultExt};
use crate::processor::{self, ProcessorRegistry, Source};
use crate::record::{JsonLinesSink, RecordSink};

/// Normalize one webhook document and write the record to stdout
pub fn cmd_normalize(
    rt: &Runtime,
    config: &Config,
    path: &Path,
    source: &str,
    no_enrich: bool,
) -> anyhow::Result<()> {
    let source: Source = source.parse()?;
    let body = read_input(path)?;
    let raw = processor::parse_payload(&body).map_err(|e| Error::normalize(source.name(), e))?;

    let mut config = config.clone();
    if no_enrich {
        config.features.tmdb_enabled = false;
    }
    if config.features.tmdb_enabled && !config.enrichment_enabled() {
        tracing::warn!("No TMDB API key configured, TMDB ids will not be resolved");
    }

    let registry = ProcessorRegistry::from_config(&config);
    let sink = JsonLinesSink::new(std::io::stdout());

    rt.block_on(async {
        let record = registry.process(source, &raw).await?;
        sink.persist(&record).await?;
        Ok::<(), anyhow::Error>(())
    })
}

/// Read the document from a file, or stdin for `-`
fn read_input(path: &Path) -> crate::error::Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .with_context("reading payload from stdin")?;
        return Ok(body);
    }

    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).with_context(format!("reading payload from {}", path.display()))
}
