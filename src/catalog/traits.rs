//! Trait definition for the external catalog.
//!
//! The resolver is generic over [`CatalogApi`], so production code uses
//! [`TmdbClient`](super::TmdbClient) while tests substitute the call-counting
//! doubles in [`mocks`].

use std::sync::Arc;

use async_trait::async_trait;

use super::dto::FindResponse;
use super::{CatalogError, ExternalSource};

/// The two catalog operations the resolver consumes.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// True iff the catalog confirms `tmdb_id` as a top-level series entry.
    ///
    /// An explicit "not found" is `Ok(false)`, not an error.
    async fn verify_series(&self, tmdb_id: u64) -> Result<bool, CatalogError>;

    /// Candidate matches for an external id.
    async fn find_by_external_id(
        &self,
        external_id: &str,
        source: ExternalSource,
    ) -> Result<FindResponse, CatalogError>;
}

#[async_trait]
impl CatalogApi for super::TmdbClient {
    async fn verify_series(&self, tmdb_id: u64) -> Result<bool, CatalogError> {
        self.verify_series(tmdb_id).await
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
        source: ExternalSource,
    ) -> Result<FindResponse, CatalogError> {
        self.find_by_external_id(external_id, source).await
    }
}

#[async_trait]
impl<T: CatalogApi + ?Sized> CatalogApi for Arc<T> {
    async fn verify_series(&self, tmdb_id: u64) -> Result<bool, CatalogError> {
        (**self).verify_series(tmdb_id).await
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
        source: ExternalSource,
    ) -> Result<FindResponse, CatalogError> {
        (**self).find_by_external_id(external_id, source).await
    }
}
