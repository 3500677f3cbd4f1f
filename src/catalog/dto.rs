//! TMDB API Data Transfer Objects
//!
//! These types match what the TMDB v3 API returns for the two endpoints we
//! call. Only the fields we read are modelled.
//!
//! API Reference: https://developer.themoviedb.org/reference/find-by-id

use serde::{Deserialize, Serialize};

use crate::serde_ext::deserialize_optional_id;

/// Response of `GET /find/{external_id}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FindResponse {
    /// Series matches
    #[serde(default)]
    pub tv_results: Vec<FindResult>,
    /// Episode matches; each carries the id of its parent show
    #[serde(default)]
    pub tv_episode_results: Vec<FindResult>,
}

/// One entry of a find result list
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FindResult {
    /// Catalog id of the entry itself
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    /// Catalog id of the show the entry belongs to
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub show_id: Option<String>,
    pub name: Option<String>,
}

/// Status envelope. TMDB error bodies carry `status_code`/`success`; a
/// successful TV details body carries neither.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatusResponse {
    pub status_code: Option<i64>,
    pub status_message: Option<String>,
    pub success: Option<bool>,
}

/// TMDB status code for "The resource you requested could not be found."
pub const STATUS_NOT_FOUND: i64 = 34;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_response_with_numeric_show_id() {
        let json = r#"{
            "movie_results": [],
            "tv_results": [],
            "tv_episode_results": [{"id": 63056, "show_id": 1399, "name": "Winter Is Coming"}]
        }"#;
        let response: FindResponse = serde_json::from_str(json).unwrap();
        assert!(response.tv_results.is_empty());
        assert_eq!(response.tv_episode_results[0].show_id.as_deref(), Some("1399"));
    }

    #[test]
    fn test_find_response_missing_lists() {
        let response: FindResponse = serde_json::from_str("{}").unwrap();
        assert!(response.tv_results.is_empty());
        assert!(response.tv_episode_results.is_empty());
    }

    #[test]
    fn test_status_response() {
        let json = r#"{"success": false, "status_code": 34, "status_message": "The resource you requested could not be found."}"#;
        let status: StatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(status.status_code, Some(STATUS_NOT_FOUND));
        assert_eq!(status.success, Some(false));
    }
}
