//! Identifier resolver - decides which TMDB id, if any, a record gets.
//!
//! Flow for one payload:
//! 1. Enrichment off, or no provider ids at all: pass candidates through, no calls
//! 2. Primary (TMDB) candidate present: verify it with one catalog call
//! 3. Verified: done, alternates are never queried
//! 4. Otherwise: look up by IMDb id and by TVDB id concurrently
//! 5. Reconcile: IMDb-sourced show id beats TVDB-sourced
//! 6. Nothing found: the record simply has no TMDB id
//!
//! Catalog failures never escape [`IdResolver::resolve`]; each branch that
//! fails degrades to "no identifier" and is logged.

use crate::catalog::{CatalogApi, CatalogError, ExternalSource, TmdbClient, adapter};
use crate::domain::CandidateIds;

/// How the final TMDB id was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Enrichment is switched off; candidates passed through
    Disabled,
    /// The payload carried no provider ids
    NoCandidates,
    /// The payload's own TMDB id was confirmed by the catalog
    Verified,
    /// Found through an alternate external id
    Alternate(ExternalSource),
    /// Nothing trustworthy was found
    Unresolved,
}

/// Resolver output: the trusted TMDB id plus the untouched IMDb/TVDB candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIds {
    pub tmdb: Option<String>,
    pub imdb: Option<String>,
    pub tvdb: Option<String>,
    pub resolution: Resolution,
}

impl ResolvedIds {
    fn new(tmdb: Option<String>, candidates: &CandidateIds, resolution: Resolution) -> Self {
        Self {
            tmdb,
            imdb: candidates.imdb.clone(),
            tvdb: candidates.tvdb.clone(),
            resolution,
        }
    }
}

/// Resolves TMDB ids against a catalog.
///
/// Holds no per-call state, so one resolver can serve concurrent payloads.
pub struct IdResolver<C = TmdbClient> {
    catalog: C,
    enabled: bool,
}

impl<C: CatalogApi> IdResolver<C> {
    /// `enabled` is the process-wide enrichment toggle, read once by the caller.
    pub fn new(catalog: C, enabled: bool) -> Self {
        Self { catalog, enabled }
    }

    /// Resolve the TMDB id for one payload's candidates.
    pub async fn resolve(&self, candidates: &CandidateIds) -> ResolvedIds {
        if candidates.is_empty() {
            tracing::warn!("Payload has no ProviderIds, leaving identifiers empty");
            return ResolvedIds::new(None, candidates, Resolution::NoCandidates);
        }

        if !self.enabled {
            tracing::warn!("TMDB enrichment disabled, cannot verify or resolve TMDB id");
            return ResolvedIds::new(None, candidates, Resolution::Disabled);
        }

        if let Some(tmdb_id) = candidates.tmdb.as_deref()
            && self.verify_primary(tmdb_id).await
        {
            tracing::info!(tmdb_id, "TMDB id verified");
            return ResolvedIds::new(Some(tmdb_id.to_string()), candidates, Resolution::Verified);
        }

        self.reconcile(candidates).await
    }

    /// Whether the payload's own TMDB id can be trusted.
    async fn verify_primary(&self, tmdb_id: &str) -> bool {
        let numeric = match tmdb_id.parse::<u64>() {
            Ok(id) if id > 0 => id,
            _ => {
                tracing::warn!(tmdb_id, "TMDB id is not a positive integer, not trusting it");
                return false;
            }
        };

        match self.catalog.verify_series(numeric).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!(tmdb_id, "TMDB id is not a series id, not trusting it");
                false
            }
            Err(e) => {
                tracing::warn!(tmdb_id, error = %e, "TMDB id verification failed, not trusting it");
                false
            }
        }
    }

    /// Query both alternates concurrently and pick by priority.
    ///
    /// Both lookups are polled inside this future, so dropping it cancels them.
    async fn reconcile(&self, candidates: &CandidateIds) -> ResolvedIds {
        let (imdb_result, tvdb_result) = tokio::join!(
            self.lookup(candidates.imdb.as_deref(), ExternalSource::Imdb),
            self.lookup(candidates.tvdb.as_deref(), ExternalSource::Tvdb),
        );

        if imdb_result.is_err() && tvdb_result.is_err() {
            tracing::warn!("All TMDB lookups failed, leaving TMDB id empty");
        }

        let from_imdb = settle(ExternalSource::Imdb, imdb_result);
        let from_tvdb = settle(ExternalSource::Tvdb, tvdb_result);

        let (tmdb, resolution) = match (from_imdb, from_tvdb) {
            (Some(id), _) => (Some(id), Resolution::Alternate(ExternalSource::Imdb)),
            (None, Some(id)) => (Some(id), Resolution::Alternate(ExternalSource::Tvdb)),
            (None, None) => {
                tracing::info!("No lookup produced a TMDB id, leaving it empty");
                (None, Resolution::Unresolved)
            }
        };

        if let (Some(tmdb_id), Resolution::Alternate(source)) = (&tmdb, resolution) {
            tracing::info!(tmdb_id = %tmdb_id, %source, "Resolved TMDB id from alternate source");
        }

        ResolvedIds::new(tmdb, candidates, resolution)
    }

    /// One alternate lookup. An absent candidate is skipped without a call.
    async fn lookup(
        &self,
        candidate: Option<&str>,
        source: ExternalSource,
    ) -> Result<Option<String>, CatalogError> {
        let Some(external_id) = candidate else {
            tracing::debug!(%source, "No candidate id, skipping lookup");
            return Ok(None);
        };

        let response = self.catalog.find_by_external_id(external_id, source).await?;
        Ok(adapter::show_id(&response))
    }
}

/// Turn one lookup's result into "an id or nothing", logging failures.
fn settle(source: ExternalSource, result: Result<Option<String>, CatalogError>) -> Option<String> {
    match result {
        Ok(id) => id,
        Err(CatalogError::NotFound) => {
            tracing::debug!(%source, "External id not known to TMDB");
            None
        }
        Err(e) => {
            tracing::warn!(%source, error = %e, "TMDB lookup failed");
            None
        }
    }
}
