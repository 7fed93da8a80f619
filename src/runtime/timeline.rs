//! Timeline artifact generation from an event log.

use serde::ser::Serializer as _;
use serde::{Deserialize, Serialize};

use std::path::Path;

use crate::{Event, EventLog, ReplayState, SortResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub index: usize,
    pub event: Event,
    pub comparisons: u64,
    pub writes: u64,
    #[serde(rename = "sortedCount")]
    pub sorted_count: usize,
}

/// One entry per event, with the counters as they stand after applying it.
pub fn build_timeline(input: &[u32], log: &EventLog) -> Vec<TimelineEntry> {
    let mut replay = ReplayState::new(input.to_vec(), log.clone());
    let mut out = Vec::with_capacity(log.len());
    while let Some(applied) = replay.apply_next() {
        out.push(TimelineEntry {
            index: applied.index,
            event: applied.event,
            comparisons: replay.comparisons(),
            writes: replay.writes(),
            sorted_count: applied.highlight.sorted.len(),
        });
    }
    out
}

pub fn write_timeline(entries: &[TimelineEntry], out_path: &Path) -> SortResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut buf = Vec::with_capacity(entries.len().saturating_mul(64));
    {
        let mut ser = serde_json::Serializer::new(&mut buf);
        use serde::ser::SerializeSeq as _;
        let mut seq = ser.serialize_seq(Some(entries.len()))?;
        for entry in entries {
            seq.serialize_element(entry)?;
        }
        seq.end()?;
    }
    std::fs::write(out_path, buf)?;
    Ok(())
}
