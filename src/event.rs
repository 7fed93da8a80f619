//! Recordable sorting operations and the immutable event log built from them.

use serde::{Deserialize, Serialize};

use crate::{SortError, SortResult};

/// One elementary operation performed by a sorting algorithm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Compare { i: usize, j: usize },
    Swap { i: usize, j: usize },
    Write { i: usize, value: u32 },
    Pivot { i: usize },
    MarkSorted { i: usize },
    MarkRangeSorted { l: usize, r: usize },
    Done,
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Compare { .. } => "compare",
            Self::Swap { .. } => "swap",
            Self::Write { .. } => "write",
            Self::Pivot { .. } => "pivot",
            Self::MarkSorted { .. } => "mark_sorted",
            Self::MarkRangeSorted { .. } => "mark_range_sorted",
            Self::Done => "done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Largest position this event touches, if any.
    fn max_index(&self) -> Option<usize> {
        match *self {
            Self::Compare { i, j } | Self::Swap { i, j } => Some(i.max(j)),
            Self::Write { i, .. } | Self::Pivot { i } | Self::MarkSorted { i } => Some(i),
            Self::MarkRangeSorted { l, r } => Some(l.max(r)),
            Self::Done => None,
        }
    }
}

pub const EVENT_KINDS: [&str; 7] = [
    "compare",
    "swap",
    "write",
    "pivot",
    "mark_sorted",
    "mark_range_sorted",
    "done",
];

/// A finished, replayable log. Always ends in exactly one `Done`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Validates an externally supplied event sequence against a sequence of `len` values.
    pub fn from_events(events: Vec<Event>, len: usize) -> SortResult<Self> {
        match events.iter().position(Event::is_done) {
            None => {
                return Err(SortError::InvalidLog(
                    "log does not end with a done event".to_string(),
                ));
            }
            Some(pos) if pos + 1 != events.len() => {
                return Err(SortError::InvalidLog(format!(
                    "done event at index {pos} is followed by {} more event(s)",
                    events.len() - pos - 1
                )));
            }
            Some(_) => {}
        }

        for (idx, event) in events.iter().enumerate() {
            if let Event::MarkRangeSorted { l, r } = *event
                && l > r
            {
                return Err(SortError::InvalidLog(format!(
                    "event {idx}: empty range {l}..={r}"
                )));
            }
            if let Some(max) = event.max_index()
                && max >= len
            {
                return Err(SortError::InvalidLog(format!(
                    "event {idx} ({}) touches position {max} outside a sequence of {len}",
                    event.kind()
                )));
            }
        }
        Ok(Self { events })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    /// Hex blake3 digest of the serialized events; equal logs give equal digests.
    pub fn digest(&self) -> SortResult<String> {
        let bytes = serde_json::to_vec(&self.events)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Append-only builder that algorithm runners record into.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compare(&mut self, i: usize, j: usize) {
        self.events.push(Event::Compare { i, j });
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.events.push(Event::Swap { i, j });
    }

    pub fn write(&mut self, i: usize, value: u32) {
        self.events.push(Event::Write { i, value });
    }

    pub fn pivot(&mut self, i: usize) {
        self.events.push(Event::Pivot { i });
    }

    pub fn mark_sorted(&mut self, i: usize) {
        self.events.push(Event::MarkSorted { i });
    }

    pub fn mark_range_sorted(&mut self, l: usize, r: usize) {
        self.events.push(Event::MarkRangeSorted { l, r });
    }

    /// Seals the log with the trailing `Done`.
    pub fn finish(mut self) -> EventLog {
        self.events.push(Event::Done);
        EventLog {
            events: self.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_appends_single_trailing_done() {
        let mut rec = Recorder::new();
        rec.compare(0, 1);
        rec.swap(0, 1);
        let log = rec.finish();
        assert_eq!(log.len(), 3);
        assert_eq!(log.events().last(), Some(&Event::Done));
        assert_eq!(log.count("done"), 1);
    }

    #[test]
    fn from_events_rejects_missing_or_early_done() {
        let missing = EventLog::from_events(vec![Event::Compare { i: 0, j: 1 }], 2);
        assert!(matches!(missing, Err(SortError::InvalidLog(_))));

        let early = EventLog::from_events(vec![Event::Done, Event::MarkSorted { i: 0 }], 1);
        assert!(matches!(early, Err(SortError::InvalidLog(_))));

        let twice = EventLog::from_events(vec![Event::Done, Event::Done], 1);
        assert!(matches!(twice, Err(SortError::InvalidLog(_))));
    }

    #[test]
    fn from_events_rejects_out_of_bounds_positions() {
        let log = EventLog::from_events(vec![Event::Swap { i: 0, j: 3 }, Event::Done], 3);
        assert!(matches!(log, Err(SortError::InvalidLog(_))));

        let range = EventLog::from_events(vec![Event::MarkRangeSorted { l: 2, r: 1 }, Event::Done], 3);
        assert!(matches!(range, Err(SortError::InvalidLog(_))));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(Event::Write { i: 2, value: 40 }).expect("json");
        assert_eq!(json, serde_json::json!({"kind": "write", "i": 2, "value": 40}));

        let done: Event = serde_json::from_str(r#"{"kind":"done"}"#).expect("parse");
        assert_eq!(done, Event::Done);
    }

    #[test]
    fn digest_tracks_content() {
        let mut a = Recorder::new();
        a.compare(0, 1);
        let mut b = Recorder::new();
        b.compare(1, 0);
        let a = a.finish();
        let b = b.finish();
        assert_eq!(a.digest().expect("digest"), a.clone().digest().expect("digest"));
        assert_ne!(a.digest().expect("digest"), b.digest().expect("digest"));
    }
}
