//! Webhook payload extraction - pure functions, no I/O.
//!
//! - **DTOs** (`dto.rs`) - the webhook `Item` / `Server` shapes as the server sends them
//! - **Extraction** (`extract.rs`) - DTOs -> per-item-type field sets
//!
//! ```ignore
//! let extracted = payload::extract(&raw)?;
//! match extracted.fields {
//!     ItemFields::Series(series) => println!("{:?}", series.title),
//!     ItemFields::Episode(episode) => println!("S{:?}E{:?}", episode.season, episode.episode),
//!     ItemFields::Other => {}
//! }
//! ```

pub mod dto;
mod extract;

pub use extract::{
    EpisodeFields, ExtractedPayload, ItemFields, SeriesFields, extract, extract_merged_episode_count,
};
