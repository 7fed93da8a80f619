//! Event log commands (`sortreel log ...`).

use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};

use std::path::PathBuf;

use crate::{
    Algorithm, ChaChaSource, Config, Event, RandomSource, SortError, SortResult, TraceFile,
    build_timeline, write_timeline,
};

/// Where a log's input comes from: explicit values, or the configured generator.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    #[arg(long)]
    pub algorithm: Option<Algorithm>,
    /// Comma-separated input values; overrides --size/--seed.
    #[arg(long, value_delimiter = ',')]
    pub values: Vec<u32>,
    #[arg(long)]
    pub size: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
}

impl InputArgs {
    pub fn resolve(&self, config: &Config) -> SortResult<(Algorithm, Vec<u32>)> {
        let algorithm = self.algorithm.unwrap_or(config.algorithm);
        if !self.values.is_empty() {
            if self.values.len() > crate::MAX_SIZE {
                return Err(SortError::InvalidArgument(format!(
                    "{} values exceed the maximum of {}",
                    self.values.len(),
                    crate::MAX_SIZE
                )));
            }
            return Ok((algorithm, self.values.clone()));
        }
        let size = self.size.unwrap_or(config.size);
        if size > crate::MAX_SIZE {
            return Err(SortError::InvalidArgument(format!(
                "size {size} exceeds the maximum of {}",
                crate::MAX_SIZE
            )));
        }
        let range = config.value_range()?;
        let mut source = match self.seed.or(config.seed) {
            Some(seed) => ChaChaSource::seeded(seed, range),
            None => ChaChaSource::from_entropy(range),
        };
        Ok((algorithm, source.generate(size)))
    }
}

#[derive(Debug, Subcommand)]
pub enum LogCommand {
    /// Build a log and print its events
    Show {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Build a log and write it as a trace file
    Export {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the per-event timeline of a trace file
    Timeline {
        #[arg(value_name = "TRACE")]
        trace: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replay a trace file and check it sorts its recorded input
    Verify {
        #[arg(value_name = "TRACE")]
        trace: PathBuf,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogListing {
    pub algorithm: Algorithm,
    pub input: Vec<u32>,
    pub digest: String,
    pub events: Vec<Event>,
}

pub fn log_command(config: &Config, command: &LogCommand) -> SortResult<serde_json::Value> {
    match command {
        LogCommand::Show { input } => {
            let (algorithm, values) = input.resolve(config)?;
            let log = algorithm.generate_log(&values);
            let listing = LogListing {
                algorithm,
                input: values,
                digest: log.digest()?,
                events: log.into_iter().copied().collect(),
            };
            Ok(serde_json::to_value(listing)?)
        }

        LogCommand::Export { input, out } => {
            let (algorithm, values) = input.resolve(config)?;
            let trace = TraceFile::record(algorithm, values)?;
            trace.write_json(out)?;
            tracing::info!(path = %out.display(), events = trace.summary.events, "exported trace");
            Ok(serde_json::json!({
                "trace": out.to_string_lossy().to_string(),
                "algorithm": algorithm,
                "events": trace.summary.events,
                "digest": trace.digest,
            }))
        }

        LogCommand::Timeline { trace, out } => {
            let file = TraceFile::read_json(trace)?;
            let log = file.log()?;
            let timeline = build_timeline(&file.input, &log);
            if let Some(out_path) = out {
                write_timeline(&timeline, out_path)?;
            }
            Ok(serde_json::to_value(timeline)?)
        }

        LogCommand::Verify { trace } => {
            let file = TraceFile::read_json(trace)?;
            let report = file.verify()?;
            if !report.ok() {
                return Err(SortError::Trace(format!(
                    "trace {} failed verification: {}",
                    trace.display(),
                    serde_json::to_string(&report)?
                )));
            }
            Ok(serde_json::to_value(report)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_trace(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("sortreel-log-{name}-{}", uuid::Uuid::new_v4()))
            .join("trace.sortreel")
    }

    #[test]
    fn explicit_values_win_over_generator() {
        let input = InputArgs {
            algorithm: Some(Algorithm::Insertion),
            values: vec![4, 2, 9],
            size: Some(100),
            seed: Some(1),
        };
        let (algorithm, values) = input.resolve(&Config::default()).expect("resolve");
        assert_eq!(algorithm, Algorithm::Insertion);
        assert_eq!(values, vec![4, 2, 9]);
    }

    #[test]
    fn seeded_generation_is_stable() {
        let input = InputArgs {
            size: Some(12),
            seed: Some(99),
            ..InputArgs::default()
        };
        let config = Config::default();
        let (algorithm, a) = input.resolve(&config).expect("resolve");
        let (_, b) = input.resolve(&config).expect("resolve");
        assert_eq!(algorithm, config.algorithm);
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn oversized_requests_are_rejected() {
        let input = InputArgs {
            size: Some(crate::MAX_SIZE + 1),
            ..InputArgs::default()
        };
        assert!(matches!(
            input.resolve(&Config::default()),
            Err(SortError::InvalidArgument(_))
        ));
    }

    #[test]
    fn export_then_verify_and_timeline() {
        let config = Config::default();
        let out = temp_trace("export");
        let input = InputArgs {
            algorithm: Some(Algorithm::Quick),
            values: vec![3, 1, 2],
            ..InputArgs::default()
        };
        let exported = log_command(
            &config,
            &LogCommand::Export {
                input,
                out: out.clone(),
            },
        )
        .expect("export");
        assert_eq!(exported["events"], 9);

        let verified = log_command(&config, &LogCommand::Verify { trace: out.clone() }).expect("verify");
        assert_eq!(verified["sorted"], true);

        let timeline = log_command(&config, &LogCommand::Timeline { trace: out, out: None }).expect("timeline");
        assert_eq!(timeline.as_array().expect("array").len(), 9);
    }

    #[test]
    fn show_lists_events() {
        let input = InputArgs {
            algorithm: Some(Algorithm::Bubble),
            values: vec![1, 2, 3, 4],
            ..InputArgs::default()
        };
        let shown = log_command(&Config::default(), &LogCommand::Show { input }).expect("show");
        let events = shown["events"].as_array().expect("events");
        assert_eq!(events.len(), 6);
        assert_eq!(events[4]["kind"], "mark_range_sorted");
        assert_eq!(events[5]["kind"], "done");
    }
}
