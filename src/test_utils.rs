//! Test fixtures for hook-normalizer tests.
//!
//! Webhook documents shaped like what an Emby server posts. Customize by
//! mutating the returned value:
//!
//! ```ignore
//! let mut payload = episode_payload();
//! payload["Item"]["IndexNumber"] = json!(7);
//! ```

use serde_json::{Value, json};

/// A merged Series notification ("3 items added").
pub fn series_payload() -> Value {
    json!({
        "Title": "Foo 已添加了 3 项",
        "Event": "library.new",
        "Item": {
            "Type": "Series",
            "Name": "Foo",
            "Id": "S1",
            "Overview": "A show about dragons.",
            "ImageTags": {"Primary": "series-tag"},
            "ProviderIds": {"Tmdb": "1399", "Imdb": "tt0944947", "Tvdb": "121361"}
        },
        "Server": {"Id": "srv1", "Name": "Home", "Version": "4.8.0.0"}
    })
}

/// A single Episode notification.
pub fn episode_payload() -> Value {
    json!({
        "Title": "新 Foo S02E05",
        "Event": "library.new",
        "Item": {
            "Type": "Episode",
            "Name": "The One",
            "SeriesName": "Foo",
            "Overview": "Things happen.",
            "ParentIndexNumber": 2,
            "IndexNumber": 5,
            "Id": "E5",
            "SeriesId": "S1",
            "ParentId": "SEA2",
            "ImageTags": {"Primary": "episode-tag"},
            "SeriesPrimaryImageTag": "series-tag",
            "ProviderIds": {"Tmdb": "1399", "Imdb": "tt0944947", "Tvdb": "121361"}
        },
        "Server": {"Id": "srv1", "Name": "Home"}
    })
}
