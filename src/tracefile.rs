//! Trace file format (.sortreel) read/write.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use std::path::Path;

use crate::{Algorithm, Event, EventLog, ReplayState, SortError, SortResult};

pub const TRACE_FORMAT: &str = "sortreel-trace";
pub const CURRENT_TRACE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFile {
    pub format: String,
    pub version: u32,
    pub id: uuid::Uuid,
    #[serde(rename = "recordedAt")]
    pub recorded_at: String,
    pub algorithm: Algorithm,
    pub input: Vec<u32>,
    pub digest: String,
    pub summary: TraceSummary,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub events: usize,
    pub comparisons: u64,
    pub writes: u64,
}

/// Outcome of replaying a trace against its recorded input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceVerification {
    pub algorithm: Algorithm,
    pub events: usize,
    pub sorted: bool,
    #[serde(rename = "countersMatch")]
    pub counters_match: bool,
    /// Whether the runner still produces this exact log for the recorded input.
    pub reproducible: bool,
}

impl TraceVerification {
    pub fn ok(&self) -> bool {
        self.sorted && self.counters_match && self.reproducible
    }
}

impl TraceFile {
    pub fn record(algorithm: Algorithm, input: Vec<u32>) -> SortResult<Self> {
        let log = algorithm.generate_log(&input);
        let mut summary = TraceSummary {
            events: log.len(),
            comparisons: 0,
            writes: 0,
        };
        for event in &log {
            match event {
                Event::Compare { .. } => summary.comparisons += 1,
                Event::Swap { .. } | Event::Write { .. } => summary.writes += 1,
                _ => {}
            }
        }
        Ok(Self {
            format: TRACE_FORMAT.to_string(),
            version: CURRENT_TRACE_VERSION,
            id: uuid::Uuid::new_v4(),
            recorded_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .map_err(|e| SortError::Trace(format!("timestamp: {e}")))?,
            algorithm,
            digest: log.digest()?,
            summary,
            events: log.events().to_vec(),
            input,
        })
    }

    /// The validated log; checks the digest as well as the event invariants.
    pub fn log(&self) -> SortResult<EventLog> {
        let log = EventLog::from_events(self.events.clone(), self.input.len())?;
        let digest = log.digest()?;
        if digest != self.digest {
            return Err(SortError::Trace(format!(
                "digest mismatch: recorded {} but events hash to {digest}",
                self.digest
            )));
        }
        Ok(log)
    }

    pub fn verify(&self) -> SortResult<TraceVerification> {
        let log = self.log()?;
        let reproducible = self.algorithm.generate_log(&self.input) == log;
        let mut replay = ReplayState::new(self.input.clone(), log);
        replay.run_to_end();

        let mut expected = self.input.clone();
        expected.sort_unstable();
        Ok(TraceVerification {
            algorithm: self.algorithm,
            events: self.events.len(),
            sorted: replay.values() == expected.as_slice(),
            counters_match: replay.comparisons() == self.summary.comparisons
                && replay.writes() == self.summary.writes,
            reproducible,
        })
    }

    pub fn write_json(&self, path: &Path) -> SortResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn read_json(path: &Path) -> SortResult<Self> {
        let bytes = std::fs::read(path)?;
        let t: TraceFile = serde_json::from_slice(&bytes)?;
        if t.format != TRACE_FORMAT {
            return Err(SortError::Trace(format!(
                "{} is not a {TRACE_FORMAT} file (format {:?})",
                path.display(),
                t.format
            )));
        }
        if t.version != CURRENT_TRACE_VERSION {
            return Err(SortError::Trace(format!(
                "unsupported trace version {} (expected {CURRENT_TRACE_VERSION})",
                t.version
            )));
        }
        Ok(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("sortreel-trace-{name}-{}", uuid::Uuid::new_v4()))
            .join("trace.sortreel")
    }

    #[test]
    fn write_then_verify() {
        let trace = TraceFile::record(Algorithm::Merge, vec![9, 2, 7, 4, 4]).expect("record");
        let path = temp_path("roundtrip");
        trace.write_json(&path).expect("write");

        let loaded = TraceFile::read_json(&path).expect("read");
        assert_eq!(loaded.events, trace.events);
        let report = loaded.verify().expect("verify");
        assert!(report.ok(), "{report:?}");
        assert_eq!(report.events, loaded.summary.events);
    }

    #[test]
    fn tampered_events_fail_digest() {
        let mut trace = TraceFile::record(Algorithm::Bubble, vec![3, 1, 2]).expect("record");
        trace.events.swap(0, 1);
        assert!(matches!(trace.log(), Err(SortError::Trace(_))));
    }

    #[test]
    fn invalid_log_is_rejected_before_replay() {
        let mut trace = TraceFile::record(Algorithm::Quick, vec![3, 1, 2]).expect("record");
        trace.events.pop();
        assert!(matches!(trace.verify(), Err(SortError::InvalidLog(_))));
    }

    #[test]
    fn foreign_format_is_rejected() {
        let mut trace = TraceFile::record(Algorithm::Quick, vec![2, 1]).expect("record");
        trace.format = "something-else".to_string();
        let path = temp_path("foreign");
        trace.write_json(&path).expect("write");
        assert!(matches!(TraceFile::read_json(&path), Err(SortError::Trace(_))));
    }
}
