//! Persistence hand-off.
//!
//! The crate does not own storage. Whoever does implements [`RecordSink`];
//! [`JsonLinesSink`] is the one shipped here, used by the CLI.

use std::io::Write;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::CanonicalRecord;
use crate::error::{Error, Result};

/// Receives finished records.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn persist(&self, record: &CanonicalRecord) -> Result<()>;
}

/// Writes each record as one line of JSON.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W: Write + Send> RecordSink for JsonLinesSink<W> {
    async fn persist(&self, record: &CanonicalRecord) -> Result<()> {
        let line = serde_json::to_string(record).map_err(|e| Error::sink(e.to_string()))?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{line}").map_err(|e| Error::sink(e.to_string()))?;
        writer.flush().map_err(|e| Error::sink(e.to_string()))?;
        tracing::debug!(title = ?record.title, "Record handed off");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::extract;
    use crate::record::assemble;
    use crate::resolver::{Resolution, ResolvedIds};
    use crate::test_utils::{episode_payload, series_payload};

    fn record_for(raw: serde_json::Value) -> CanonicalRecord {
        let extracted = extract(&raw).unwrap();
        let ids = ResolvedIds {
            tmdb: None,
            imdb: None,
            tvdb: None,
            resolution: Resolution::Disabled,
        };
        assemble(extracted, ids, &raw)
    }

    #[tokio::test]
    async fn test_json_lines_one_record_per_line() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.persist(&record_for(series_payload())).await.unwrap();
        sink.persist(&record_for(episode_payload())).await.unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: CanonicalRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.item_type, "Series");
        let second: CanonicalRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.item_type, "Episode");
    }
}
