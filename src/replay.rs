//! Replay state: a cursor over an event log plus everything derived from it.

use serde::Serialize;

use std::collections::BTreeSet;

use crate::{Event, EventLog};

/// What a renderer should emphasize after one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub compare: Option<(usize, usize)>,
    pub swap: Option<(usize, usize)>,
    pub write: Option<usize>,
    pub pivot: Option<usize>,
    /// Cumulative sorted set, always present.
    pub sorted: BTreeSet<usize>,
}

#[derive(Debug, Clone)]
pub struct Applied {
    pub index: usize,
    pub event: Event,
    pub highlight: Highlight,
}

/// Comparable view of the derived state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaySnapshot {
    pub values: Vec<u32>,
    pub cursor: usize,
    pub comparisons: u64,
    pub writes: u64,
    pub sorted: BTreeSet<usize>,
}

/// Owns the live sequence and replays a log over it one event at a time.
///
/// Applying events `[0, cursor)` to `original` always reproduces `values`.
#[derive(Debug, Clone)]
pub struct ReplayState {
    original: Vec<u32>,
    values: Vec<u32>,
    log: EventLog,
    cursor: usize,
    comparisons: u64,
    writes: u64,
    sorted: BTreeSet<usize>,
}

impl ReplayState {
    /// `log` must have been built for a sequence of `original.len()` values.
    pub fn new(original: Vec<u32>, log: EventLog) -> Self {
        debug_assert!(!log.is_empty(), "event logs always end in done");
        Self {
            values: original.clone(),
            original,
            log,
            cursor: 0,
            comparisons: 0,
            writes: 0,
            sorted: BTreeSet::new(),
        }
    }

    pub fn original(&self) -> &[u32] {
        &self.original
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn sorted_indices(&self) -> &BTreeSet<usize> {
        &self.sorted
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.log.len()
    }

    /// Applies the event under the cursor and advances. `None` once the log is exhausted.
    pub fn apply_next(&mut self) -> Option<Applied> {
        let event = *self.log.get(self.cursor)?;
        let mut highlight = Highlight::default();

        match event {
            Event::Compare { i, j } => {
                self.comparisons += 1;
                highlight.compare = Some((i, j));
            }
            Event::Swap { i, j } => {
                self.writes += 1;
                self.values.swap(i, j);
                highlight.swap = Some((i, j));
            }
            Event::Write { i, value } => {
                self.writes += 1;
                self.values[i] = value;
                highlight.write = Some(i);
            }
            Event::Pivot { i } => {
                highlight.pivot = Some(i);
            }
            Event::MarkSorted { i } => {
                self.sorted.insert(i);
            }
            Event::MarkRangeSorted { l, r } => {
                self.sorted.extend(l..=r);
            }
            Event::Done => {
                self.sorted.extend(0..self.values.len());
            }
        }

        let index = self.cursor;
        self.cursor += 1;
        highlight.sorted = self.sorted.clone();
        tracing::trace!(index, kind = event.kind(), "applied event");
        Some(Applied {
            index,
            event,
            highlight,
        })
    }

    /// Applies every remaining event.
    pub fn run_to_end(&mut self) -> Option<Applied> {
        let mut last = None;
        while let Some(applied) = self.apply_next() {
            last = Some(applied);
        }
        last
    }

    /// Back to the pre-run sequence. The log is kept.
    pub fn reset(&mut self) {
        self.values.clone_from(&self.original);
        self.cursor = 0;
        self.comparisons = 0;
        self.writes = 0;
        self.sorted.clear();
    }

    pub fn snapshot(&self) -> ReplaySnapshot {
        ReplaySnapshot {
            values: self.values.clone(),
            cursor: self.cursor,
            comparisons: self.comparisons,
            writes: self.writes,
            sorted: self.sorted.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Algorithm;

    fn state_for(algorithm: Algorithm, input: &[u32]) -> ReplayState {
        ReplayState::new(input.to_vec(), algorithm.generate_log(input))
    }

    #[test]
    fn counters_track_applied_events() {
        let input = [6, 2, 9, 4, 4, 1, 7];
        for algorithm in Algorithm::ALL {
            let mut state = state_for(algorithm, &input);
            for _ in 0..state.log().len() / 2 {
                state.apply_next().expect("event");
            }
            let applied = &state.log().events()[..state.cursor()];
            let compares = applied.iter().filter(|e| matches!(e, Event::Compare { .. })).count();
            let writes = applied
                .iter()
                .filter(|e| matches!(e, Event::Swap { .. } | Event::Write { .. }))
                .count();
            assert_eq!(state.comparisons(), compares as u64, "{algorithm}");
            assert_eq!(state.writes(), writes as u64, "{algorithm}");
        }
    }

    #[test]
    fn highlight_reports_touched_positions() {
        let mut state = state_for(Algorithm::Quick, &[3, 1, 2]);
        let pivot = state.apply_next().expect("pivot");
        assert_eq!(pivot.highlight.pivot, Some(2));

        let compare = state.apply_next().expect("compare");
        assert_eq!(compare.highlight.compare, Some((0, 2)));
        assert!(compare.highlight.sorted.is_empty());

        state.apply_next().expect("compare");
        let swap = state.apply_next().expect("swap");
        assert_eq!(swap.highlight.swap, Some((0, 1)));
        assert_eq!(state.values(), &[1, 3, 2]);
    }

    #[test]
    fn done_marks_everything_sorted() {
        let mut state = state_for(Algorithm::Bubble, &[4, 1, 3]);
        let last = state.run_to_end().expect("events");
        assert_eq!(last.event, Event::Done);
        assert_eq!(last.highlight.sorted, (0..3).collect::<BTreeSet<_>>());
        assert!(state.is_finished());
        assert!(state.apply_next().is_none());
    }

    #[test]
    fn reset_restores_original_and_keeps_log() {
        let input = [5, 9, 1, 3, 7];
        let mut state = state_for(Algorithm::Merge, &input);
        let log_len = state.log().len();
        for _ in 0..6 {
            state.apply_next();
        }
        assert_ne!(state.cursor(), 0);

        state.reset();
        assert_eq!(state.values(), &input);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.comparisons(), 0);
        assert_eq!(state.writes(), 0);
        assert!(state.sorted_indices().is_empty());
        assert_eq!(state.log().len(), log_len);
    }

    #[test]
    fn prefix_replay_reproduces_live_values() {
        let input = [8, 6, 7, 5, 3, 0, 9];
        for algorithm in Algorithm::ALL {
            let mut state = state_for(algorithm, &input);
            let mut steps = 0;
            while state.apply_next().is_some() {
                steps += 1;
                let mut fresh = state_for(algorithm, &input);
                for _ in 0..steps {
                    fresh.apply_next();
                }
                assert_eq!(fresh.snapshot(), state.snapshot(), "{algorithm} at {steps}");
            }
        }
    }
}
