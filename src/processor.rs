//! Payload processors and the source routing table.
//!
//! A [`PayloadProcessor`] turns one webhook document from a particular media
//! server into a [`CanonicalRecord`]. The [`ProcessorRegistry`] maps each
//! [`Source`] to its processor; it is built once at startup and only read
//! afterwards, so it can be shared freely behind an `Arc`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::catalog::{CatalogApi, TmdbClient};
use crate::config::Config;
use crate::error::{Error, NormalizeError, Result};
use crate::payload;
use crate::record::{self, CanonicalRecord};
use crate::resolver::IdResolver;

/// Media servers we accept webhooks from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Emby,
}

impl Source {
    pub fn name(self) -> &'static str {
        match self {
            Self::Emby => "emby",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "emby" => Ok(Self::Emby),
            _ => Err(Error::UnknownSource(s.to_string())),
        }
    }
}

/// Turns a webhook document into a canonical record.
#[async_trait]
pub trait PayloadProcessor: Send + Sync {
    fn source(&self) -> Source;

    async fn process(&self, payload: &Value) -> Result<CanonicalRecord>;
}

/// Parse webhook body text; anything that is not JSON is an unsupported shape.
pub fn parse_payload(body: &str) -> std::result::Result<Value, NormalizeError> {
    if body.trim().is_empty() {
        return Err(NormalizeError::UnsupportedInputShape("empty payload".to_string()));
    }
    serde_json::from_str(body).map_err(|e| NormalizeError::UnsupportedInputShape(e.to_string()))
}

/// Processor for Emby webhooks
pub struct EmbyProcessor<C = TmdbClient> {
    resolver: IdResolver<C>,
}

impl<C: CatalogApi> EmbyProcessor<C> {
    pub fn new(resolver: IdResolver<C>) -> Self {
        Self { resolver }
    }

    /// Extract, resolve and assemble.
    ///
    /// Only structurally invalid input fails; catalog trouble just leaves the
    /// TMDB id empty.
    pub async fn normalize(
        &self,
        raw: &Value,
    ) -> std::result::Result<CanonicalRecord, NormalizeError> {
        let extracted = payload::extract(raw)?;
        let ids = self.resolver.resolve(&extracted.candidates).await;
        let record = record::assemble(extracted, ids, raw);

        tracing::info!(
            source = %Source::Emby,
            item_type = %record.item_type,
            title = ?record.title,
            tmdb_id = ?record.tmdb_id,
            "Payload normalized, ready to persist"
        );
        Ok(record)
    }
}

#[async_trait]
impl<C: CatalogApi> PayloadProcessor for EmbyProcessor<C> {
    fn source(&self) -> Source {
        Source::Emby
    }

    async fn process(&self, payload: &Value) -> Result<CanonicalRecord> {
        self.normalize(payload).await.map_err(|e| {
            tracing::error!(source = %Source::Emby, error = %e, "Payload normalization failed");
            Error::normalize(Source::Emby.name(), e)
        })
    }
}

/// Source -> processor table.
pub struct ProcessorRegistry {
    processors: HashMap<Source, Arc<dyn PayloadProcessor>>,
}

impl ProcessorRegistry {
    /// An empty table; add processors with [`register`](Self::register).
    pub fn new() -> Self {
        Self {
            processors: HashMap::new(),
        }
    }

    /// Add a processor, replacing any earlier one for the same source.
    pub fn register(mut self, processor: impl PayloadProcessor + 'static) -> Self {
        self.processors.insert(processor.source(), Arc::new(processor));
        self
    }

    /// The standard table, wired to the TMDB client described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let enabled = config.enrichment_enabled();
        let api_key = config.catalog.api_key.clone().unwrap_or_default();
        let client = TmdbClient::from_config(&config.catalog, api_key);

        tracing::info!(tmdb_enabled = enabled, "Building processor registry");
        Self::new().register(EmbyProcessor::new(IdResolver::new(client, enabled)))
    }

    pub fn get(&self, source: Source) -> Option<Arc<dyn PayloadProcessor>> {
        self.processors.get(&source).cloned()
    }

    /// Route a payload to the processor registered for `source`.
    pub async fn process(&self, source: Source, payload: &Value) -> Result<CanonicalRecord> {
        let processor = self
            .get(source)
            .ok_or_else(|| Error::UnknownSource(source.to_string()))?;
        processor.process(payload).await
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
