//! Hook Normalizer - turns media-server webhook payloads into one canonical record.
//!
//! Series and Episode events arrive in different shapes. The pipeline:
//! 1. [`payload`] extracts typed field sets, branching on the item type once
//! 2. [`resolver`] settles the TMDB id: verify the payload's own candidate,
//!    else look it up concurrently by IMDb and TVDB id
//! 3. [`record`] merges everything into a [`CanonicalRecord`](record::CanonicalRecord)
//!
//! [`processor`] wires the three together per media server and routes
//! incoming payloads by source.
//!
//! # Usage
//!
//! ```ignore
//! use hook_normalizer::{config, processor::{ProcessorRegistry, Source}};
//!
//! let registry = ProcessorRegistry::from_config(&config::load());
//! let record = registry.process(Source::Emby, &payload).await?;
//! println!("{:?} -> tmdb {:?}", record.title, record.tmdb_id);
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod payload;
pub mod processor;
pub mod record;
pub mod resolver;
mod serde_ext;
#[cfg(test)]
pub mod test_utils;
