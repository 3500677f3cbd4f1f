//! External catalog (TMDB) integration
//!
//! Two operations are consumed by the resolver:
//! - verify that an id is a top-level series entry
//! - look up show ids by an external (IMDb / TVDB) id
//!
//! Layout follows the usual split:
//! - **DTOs** (`dto.rs`) - exact API response shapes
//! - **Adapter** (`adapter.rs`) - DTOs -> the answers the resolver needs
//! - **Client** (`client.rs`) - reqwest transport
//! - **Traits** (`traits.rs`) - [`CatalogApi`] seam for injection and mocking
//!
//! API docs: https://developer.themoviedb.org/reference/intro/getting-started

pub mod adapter;
mod client;
pub mod dto;
pub mod traits;

use std::fmt;

pub use client::TmdbClient;
pub use traits::CatalogApi;

/// Which external id a lookup is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExternalSource {
    Imdb,
    Tvdb,
}

impl ExternalSource {
    /// Value of the `external_source` query parameter
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Imdb => "imdb_id",
            Self::Tvdb => "tvdb_id",
        }
    }
}

impl fmt::Display for ExternalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Imdb => "IMDB",
            Self::Tvdb => "TVDB",
        })
    }
}

/// Errors that can occur talking to the catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Not found in catalog")]
    NotFound,

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited - try again later")]
    RateLimited,
}
