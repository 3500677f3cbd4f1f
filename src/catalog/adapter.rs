//! Adapter layer: TMDB DTOs -> the answers the resolver needs.

use super::dto;

/// Show id of the first usable match, preferring series matches over episode matches.
pub fn show_id(response: &dto::FindResponse) -> Option<String> {
    first_show_id(&response.tv_results).or_else(|| first_show_id(&response.tv_episode_results))
}

fn first_show_id(results: &[dto::FindResult]) -> Option<String> {
    results.first().and_then(|r| r.show_id.clone())
}

/// Whether a TV details body confirms the id.
///
/// Explicit "not found" (status code 34) and `success: false` are rejections;
/// a body carrying neither marker is a real series entry.
pub fn is_verified(status: &dto::StatusResponse) -> bool {
    if status.status_code == Some(dto::STATUS_NOT_FOUND) {
        return false;
    }
    status.success != Some(false)
}
