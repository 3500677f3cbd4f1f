//! Webhook Data Transfer Objects
//!
//! These types mirror the `Item` and `Server` objects a media server posts in
//! its webhook body. Only the keys the extractor reads are modelled; unknown
//! keys are ignored here and survive untouched in the raw payload capture.
//! Every field is optional and lenient: a value of the wrong JSON type reads
//! as `None`, so only a missing `Item`, `Item.Type` or `Server` rejects a body.
//!
//! DO NOT use these types outside the payload module - convert to the
//! extracted field sets instead.

use serde::{Deserialize, Serialize};

use crate::serde_ext::{deserialize_lenient, deserialize_optional_id};

/// The `Item` object: one series or episode.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebhookItem {
    /// Type discriminator ("Series", "Episode", ...)
    #[serde(rename = "Type", default, deserialize_with = "deserialize_lenient")]
    pub item_type: Option<String>,
    /// Series name for Series items, episode name for Episode items
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub name: Option<String>,
    /// Parent series name (Episode items only)
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub series_name: Option<String>,
    /// Synopsis
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub overview: Option<String>,
    /// Season number (Episode items only)
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub parent_index_number: Option<i64>,
    /// Episode number within the season (Episode items only)
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub index_number: Option<i64>,
    /// External catalog identifiers supplied by the server's metadata agents
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub provider_ids: Option<ProviderIds>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub series_id: Option<String>,
    /// Season id (Episode items only)
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub image_tags: Option<ImageTags>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub series_primary_image_tag: Option<String>,
}

/// The `ProviderIds` block. Keys are case-sensitive in practice.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderIds {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub tmdb: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub imdb: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub tvdb: Option<String>,
}

/// Image tags keyed by image kind
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageTags {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub primary: Option<String>,
}

/// The `Server` object identifying the sending media server
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebhookServer {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub name: Option<String>,
}
