//! Canonical record assembly.
//!
//! Merges the extractor's field sets, the resolver's identifiers, the server
//! identity, a creation timestamp and a re-encoding of the original document
//! into one flat [`CanonicalRecord`]. Nothing here can fail: all validation
//! already happened during extraction.

mod sink;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::{ExtractedPayload, ItemFields};
use crate::resolver::ResolvedIds;

pub use sink::{JsonLinesSink, RecordSink};

/// The normalized record handed to persistence.
///
/// Exactly one of the series-oriented or episode-oriented field groups is
/// populated, depending on `item_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Owned by the delivery side; always starts out false
    pub send_status: bool,
    /// RFC 3339 creation time
    pub timestamp: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub season: Option<i64>,
    pub episode: Option<i64>,
    pub episode_title: Option<String>,
    pub tmdb_id: Option<String>,
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<String>,
    pub series_id: Option<String>,
    pub season_id: Option<String>,
    pub episode_id: Option<String>,
    pub series_tag: Option<String>,
    pub season_tag: Option<String>,
    pub episode_tag: Option<String>,
    pub server_name: Option<String>,
    pub server_id: Option<String>,
    /// Number of episodes folded into one Series notification
    pub merged_episode: Option<u64>,
    /// The original webhook document, re-encoded as JSON
    pub raw_data: String,
}

/// Assemble a record stamped with the current time.
pub fn assemble(extracted: ExtractedPayload, ids: ResolvedIds, raw: &Value) -> CanonicalRecord {
    assemble_at(extracted, ids, raw, chrono::Utc::now().to_rfc3339())
}

/// Assemble a record with an explicit timestamp.
pub fn assemble_at(
    extracted: ExtractedPayload,
    ids: ResolvedIds,
    raw: &Value,
    timestamp: String,
) -> CanonicalRecord {
    let mut record = CanonicalRecord {
        send_status: false,
        timestamp,
        item_type: extracted.item_type.as_str().to_string(),
        title: None,
        description: extracted.description,
        season: None,
        episode: None,
        episode_title: None,
        tmdb_id: ids.tmdb,
        imdb_id: ids.imdb,
        tvdb_id: ids.tvdb,
        series_id: None,
        season_id: None,
        episode_id: None,
        series_tag: None,
        // Season artwork is not carried by either event shape
        season_tag: None,
        episode_tag: None,
        server_name: extracted.server.name,
        server_id: extracted.server.id,
        merged_episode: None,
        // Compact JSON, document key order and non-ASCII text kept as-is
        raw_data: raw.to_string(),
    };

    match extracted.fields {
        ItemFields::Series(series) => {
            record.title = series.title;
            record.series_id = series.series_id;
            record.series_tag = series.series_tag;
            record.merged_episode = series.merged_episode_count;
        }
        ItemFields::Episode(episode) => {
            record.title = episode.title;
            record.season = episode.season;
            record.episode = episode.episode;
            record.episode_title = episode.episode_title;
            record.series_id = episode.series_id;
            record.season_id = episode.season_id;
            record.episode_id = episode.episode_id;
            record.series_tag = episode.series_tag;
            record.episode_tag = episode.episode_tag;
        }
        ItemFields::Other => {}
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::extract;
    use crate::resolver::Resolution;
    use crate::test_utils::{episode_payload, series_payload};

    fn unresolved(extracted: &ExtractedPayload) -> ResolvedIds {
        ResolvedIds {
            tmdb: None,
            imdb: extracted.candidates.imdb.clone(),
            tvdb: extracted.candidates.tvdb.clone(),
            resolution: Resolution::Unresolved,
        }
    }

    #[test]
    fn test_series_record() {
        let raw = series_payload();
        let extracted = extract(&raw).unwrap();
        let ids = unresolved(&extracted);
        let record = assemble_at(extracted, ids, &raw, "2026-01-01T00:00:00+00:00".into());

        assert!(!record.send_status);
        assert_eq!(record.item_type, "Series");
        assert_eq!(record.title.as_deref(), Some("Foo"));
        assert_eq!(record.series_id.as_deref(), Some("S1"));
        assert_eq!(record.series_tag.as_deref(), Some("series-tag"));
        assert_eq!(record.merged_episode, Some(3));
        assert_eq!(record.season, None);
        assert_eq!(record.episode, None);
        assert_eq!(record.episode_title, None);
        assert_eq!(record.episode_id, None);
        assert_eq!(record.episode_tag, None);
        assert_eq!(record.season_tag, None);
        assert_eq!(record.server_id.as_deref(), Some("srv1"));
        assert_eq!(record.server_name.as_deref(), Some("Home"));
    }

    #[test]
    fn test_episode_record() {
        let raw = episode_payload();
        let extracted = extract(&raw).unwrap();
        let ids = ResolvedIds {
            tmdb: Some("1399".to_string()),
            ..unresolved(&extracted)
        };
        let record = assemble(extracted, ids, &raw);

        assert_eq!(record.item_type, "Episode");
        assert_eq!(record.title.as_deref(), Some("Foo"));
        assert_eq!(record.season, Some(2));
        assert_eq!(record.episode, Some(5));
        assert_eq!(record.episode_title.as_deref(), Some("The One"));
        assert_eq!(record.season_id.as_deref(), Some("SEA2"));
        assert_eq!(record.episode_id.as_deref(), Some("E5"));
        assert_eq!(record.episode_tag.as_deref(), Some("episode-tag"));
        assert_eq!(record.merged_episode, None);
        assert_eq!(record.tmdb_id.as_deref(), Some("1399"));
        assert_eq!(record.imdb_id.as_deref(), Some("tt0944947"));
        assert!(chrono::DateTime::parse_from_rfc3339(&record.timestamp).is_ok());
    }

    #[test]
    fn test_raw_data_is_lossless() {
        let raw = series_payload();
        let extracted = extract(&raw).unwrap();
        let ids = unresolved(&extracted);
        let record = assemble(extracted, ids, &raw);

        assert!(record.raw_data.contains("已添加了"));
        let reparsed: Value = serde_json::from_str(&record.raw_data).unwrap();
        assert_eq!(reparsed, raw);
    }

    #[test]
    fn test_raw_data_keeps_document_key_order() {
        let body = r#"{"Title":"t","Item":{"Type":"Episode","SeriesName":"Foo","Name":"第一集"},"Server":{"Name":"Home","Id":"srv1"}}"#;
        let raw: Value = serde_json::from_str(body).unwrap();
        let extracted = extract(&raw).unwrap();
        let ids = unresolved(&extracted);
        let record = assemble(extracted, ids, &raw);

        assert_eq!(record.raw_data, body);
    }

    #[test]
    fn test_record_serializes_type_key() {
        let raw = episode_payload();
        let extracted = extract(&raw).unwrap();
        let ids = unresolved(&extracted);
        let record = assemble(extracted, ids, &raw);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Episode");
        assert_eq!(json["send_status"], false);
    }
}
