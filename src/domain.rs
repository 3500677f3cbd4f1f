//! Internal domain models shared by the extractor, resolver and assembler.
//!
//! These types are OUR types - they don't change when the webhook shape or
//! the catalog API changes. DTOs from either side get converted into these.

use std::fmt;

/// The item-type discriminator of a webhook `Item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemType {
    Series,
    Episode,
    /// Any other discriminator (Movie, Audio, ...); the raw value is kept for the record.
    Other(String),
}

impl ItemType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Series" => Self::Series,
            "Episode" => Self::Episode,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Series => "Series",
            Self::Episode => "Episode",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-reference identifiers suggested by the payload's `ProviderIds` block.
///
/// None of these are trusted yet; the resolver decides what survives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateIds {
    pub tmdb: Option<String>,
    pub imdb: Option<String>,
    pub tvdb: Option<String>,
}

impl CandidateIds {
    /// True when the payload supplied no identifier at all.
    pub fn is_empty(&self) -> bool {
        self.tmdb.is_none() && self.imdb.is_none() && self.tvdb.is_none()
    }
}

/// Identity of the media server that sent the webhook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_parse() {
        assert_eq!(ItemType::parse("Series"), ItemType::Series);
        assert_eq!(ItemType::parse("Episode"), ItemType::Episode);
        assert_eq!(ItemType::parse("Movie"), ItemType::Other("Movie".to_string()));
        // Discriminators are case-sensitive
        assert_eq!(ItemType::parse("series").as_str(), "series");
    }

    #[test]
    fn test_candidate_ids_empty() {
        assert!(CandidateIds::default().is_empty());
        let ids = CandidateIds {
            tvdb: Some("121361".to_string()),
            ..Default::default()
        };
        assert!(!ids.is_empty());
    }
}
