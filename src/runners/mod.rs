//! Algorithm runners: simulate a sort against a private copy and record every operation.

mod bubble;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::Bubble;
pub use insertion::Insertion;
pub use merge::Merge;
pub use quick::Quick;
pub use selection::Selection;

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::{EventLog, Recorder, SortError};

/// A sorting algorithm that can be simulated into a replayable log.
///
/// Implementations never touch the caller's slice; they sort a private copy.
pub trait AlgorithmRunner {
    fn name(&self) -> &'static str;

    fn generate_log(&self, input: &[u32]) -> EventLog;
}

/// Sequences shorter than two are already sorted: the log is just `Done`.
fn trivial_log(input: &[u32]) -> Option<EventLog> {
    (input.len() < 2).then(|| Recorder::new().finish())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    #[default]
    Quick,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
    ];

    pub fn runner(self) -> &'static dyn AlgorithmRunner {
        match self {
            Self::Bubble => &Bubble,
            Self::Selection => &Selection,
            Self::Insertion => &Insertion,
            Self::Merge => &Merge,
            Self::Quick => &Quick,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.runner().name()
    }

    pub fn generate_log(self, input: &[u32]) -> EventLog {
        self.runner().generate_log(input)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SortError::InvalidArgument(format!("unknown algorithm {s:?}")))
    }
}

impl clap::ValueEnum for Algorithm {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}
