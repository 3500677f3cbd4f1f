//! Field extraction: raw webhook document -> typed field sets.
//!
//! The item-type discriminator is matched exactly once, in [`extract_fields`].
//! Each branch produces its own field set, so the assembler never has to
//! re-check the type per field.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::dto::{WebhookItem, WebhookServer};
use crate::domain::{CandidateIds, ItemType, ServerInfo};
use crate::error::NormalizeError;

/// "N items were added" as the Chinese-localized server phrases it in the
/// webhook title of a merged (multi-episode) Series notification.
static MERGED_EPISODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"已添加了\s*(\d+)\s*项").expect("merged episode pattern is valid")
});

/// Fields of a Series event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesFields {
    /// `Item.Name`
    pub title: Option<String>,
    /// `Item.Id`
    pub series_id: Option<String>,
    /// `Item.ImageTags.Primary`
    pub series_tag: Option<String>,
    /// Parsed from the top-level `Title`; `None` when the phrase is absent
    pub merged_episode_count: Option<u64>,
}

/// Fields of an Episode event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeFields {
    /// `Item.SeriesName`
    pub title: Option<String>,
    /// `Item.ParentIndexNumber`
    pub season: Option<i64>,
    /// `Item.IndexNumber`
    pub episode: Option<i64>,
    /// `Item.Name`
    pub episode_title: Option<String>,
    /// `Item.SeriesId`
    pub series_id: Option<String>,
    /// `Item.ParentId`
    pub season_id: Option<String>,
    /// `Item.Id`
    pub episode_id: Option<String>,
    /// `Item.SeriesPrimaryImageTag`
    pub series_tag: Option<String>,
    /// `Item.ImageTags.Primary`
    pub episode_tag: Option<String>,
}

/// Type-dependent fields, one variant per supported item type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemFields {
    Series(SeriesFields),
    Episode(EpisodeFields),
    /// Unsupported item types carry no type-dependent fields.
    Other,
}

/// Everything the extractor pulls out of one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPayload {
    pub item_type: ItemType,
    pub fields: ItemFields,
    /// `Item.Overview`, type-independent
    pub description: Option<String>,
    pub candidates: CandidateIds,
    pub server: ServerInfo,
}

/// Extract every field from a webhook document.
///
/// Fails on the first missing required key; nothing partial is returned.
pub fn extract(payload: &Value) -> Result<ExtractedPayload, NormalizeError> {
    let root = root_object(payload)?;
    let item = extract_item(root)?;
    let item_type = extract_item_type(&item)?;
    let fields = extract_fields(&item_type, &item, root)?;
    let server = extract_server(root)?;

    Ok(ExtractedPayload {
        description: item.overview.clone(),
        candidates: extract_candidates(&item),
        item_type,
        fields,
        server,
    })
}

/// The document itself must be a JSON object.
fn root_object(payload: &Value) -> Result<&Map<String, Value>, NormalizeError> {
    payload.as_object().ok_or_else(|| {
        NormalizeError::UnsupportedInputShape(format!(
            "expected a JSON object, got {}",
            json_kind(payload)
        ))
    })
}

/// Pull a required nested object out of the root and deserialize it.
///
/// Absent, `null` and `{}` all count as missing.
fn required_object<T: DeserializeOwned>(
    root: &Map<String, Value>,
    key: &str,
) -> Result<T, NormalizeError> {
    let value = match root.get(key) {
        None | Some(Value::Null) => return Err(NormalizeError::missing(key)),
        Some(Value::Object(map)) if map.is_empty() => return Err(NormalizeError::missing(key)),
        Some(value @ Value::Object(_)) => value,
        Some(other) => {
            return Err(NormalizeError::UnsupportedInputShape(format!(
                "{key} must be an object, got {}",
                json_kind(other)
            )));
        }
    };

    serde_json::from_value(value.clone())
        .map_err(|e| NormalizeError::UnsupportedInputShape(format!("{key}: {e}")))
}

pub fn extract_item(root: &Map<String, Value>) -> Result<WebhookItem, NormalizeError> {
    required_object(root, "Item")
}

pub fn extract_item_type(item: &WebhookItem) -> Result<ItemType, NormalizeError> {
    match item.item_type.as_deref() {
        Some(raw) if !raw.is_empty() => Ok(ItemType::parse(raw)),
        _ => Err(NormalizeError::missing("Item.Type")),
    }
}

/// Branch on the item type once and build that type's field set.
pub fn extract_fields(
    item_type: &ItemType,
    item: &WebhookItem,
    root: &Map<String, Value>,
) -> Result<ItemFields, NormalizeError> {
    let primary_tag = item.image_tags.as_ref().and_then(|t| t.primary.clone());

    let fields = match item_type {
        ItemType::Series => {
            let webhook_title = match root.get("Title").and_then(Value::as_str) {
                Some(title) if !title.is_empty() => title,
                _ => return Err(NormalizeError::missing("Title")),
            };
            ItemFields::Series(SeriesFields {
                title: item.name.clone(),
                series_id: item.id.clone(),
                series_tag: primary_tag,
                merged_episode_count: extract_merged_episode_count(webhook_title),
            })
        }
        ItemType::Episode => ItemFields::Episode(EpisodeFields {
            title: item.series_name.clone(),
            season: item.parent_index_number,
            episode: item.index_number,
            episode_title: item.name.clone(),
            series_id: item.series_id.clone(),
            season_id: item.parent_id.clone(),
            episode_id: item.id.clone(),
            series_tag: item.series_primary_image_tag.clone(),
            episode_tag: primary_tag,
        }),
        ItemType::Other(raw) => {
            tracing::debug!(item_type = %raw, "No type-dependent fields for item type");
            ItemFields::Other
        }
    };

    Ok(fields)
}

/// Parse the merged-episode count from a webhook title.
///
/// A title without the phrase is not an error, the count is just unknown.
/// The same goes for a count too large to represent.
pub fn extract_merged_episode_count(webhook_title: &str) -> Option<u64> {
    let Some(digits) = MERGED_EPISODE_PATTERN
        .captures(webhook_title)
        .and_then(|caps| caps.get(1))
    else {
        tracing::info!(title = webhook_title, "Could not read merged episode count from title");
        return None;
    };

    match digits.as_str().parse() {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(
                title = webhook_title,
                count = digits.as_str(),
                error = %e,
                "Merged episode count out of range"
            );
            None
        }
    }
}

pub fn extract_candidates(item: &WebhookItem) -> CandidateIds {
    match &item.provider_ids {
        Some(ids) => CandidateIds {
            tmdb: ids.tmdb.clone(),
            imdb: ids.imdb.clone(),
            tvdb: ids.tvdb.clone(),
        },
        None => CandidateIds::default(),
    }
}

pub fn extract_server(root: &Map<String, Value>) -> Result<ServerInfo, NormalizeError> {
    let server: WebhookServer = required_object(root, "Server")?;
    Ok(ServerInfo {
        id: server.id,
        name: server.name,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
