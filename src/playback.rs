//! Playback controller: the Idle/Running/Paused/Done state machine over a replay.
//!
//! The controller never sleeps itself. `tick` applies one event while running and
//! reports the delay to wait before the next one; `drive` is the cooperative loop
//! that renders, suspends through a [`Pacer`], and re-checks state on every wake-up.
//! Operations that are illegal in the current state are ignored and return `false`.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::time::Duration;

use crate::{
    Algorithm, Applied, Frame, Highlight, RandomSource, Renderer, ReplaySnapshot, ReplayState,
    SortResult, Speed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Idle,
    Running,
    Paused,
    Done,
}

impl PlaybackState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing status; `Stepping` follows a manual step that did not finish the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    Idle,
    Running,
    Paused,
    Stepping,
    Done,
}

impl StatusLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::Paused => "Paused",
            Self::Stepping => "Stepping",
            Self::Done => "Done",
        }
    }
}

/// Result of one applied event.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub applied: Applied,
    /// Wait before the next tick; `None` when playback stopped on this tick.
    pub next_delay: Option<Duration>,
}

/// Counters and position, suitable for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSummary {
    pub algorithm: Algorithm,
    pub state: PlaybackState,
    pub size: usize,
    pub cursor: usize,
    pub total: usize,
    pub comparisons: u64,
    pub writes: u64,
    pub sorted: usize,
    pub speed: Speed,
}

pub struct PlaybackController {
    algorithm: Algorithm,
    speed: Speed,
    state: PlaybackState,
    stepping: bool,
    replay: ReplayState,
    last_highlight: Highlight,
}

impl PlaybackController {
    pub fn new(algorithm: Algorithm, input: Vec<u32>, speed: Speed) -> Self {
        let log = algorithm.generate_log(&input);
        Self {
            algorithm,
            speed,
            state: PlaybackState::Idle,
            stepping: false,
            replay: ReplayState::new(input, log),
            last_highlight: Highlight::default(),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn replay(&self) -> &ReplayState {
        &self.replay
    }

    pub fn status_label(&self) -> StatusLabel {
        match self.state {
            PlaybackState::Idle if self.stepping => StatusLabel::Stepping,
            PlaybackState::Paused if self.stepping => StatusLabel::Stepping,
            PlaybackState::Idle => StatusLabel::Idle,
            PlaybackState::Running => StatusLabel::Running,
            PlaybackState::Paused => StatusLabel::Paused,
            PlaybackState::Done => StatusLabel::Done,
        }
    }

    /// Delay for the next tick, sampled from the current speed.
    pub fn delay(&self) -> Duration {
        self.speed.delay()
    }

    /// Takes effect on the next tick, also while running.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn start(&mut self) -> bool {
        if self.state != PlaybackState::Idle {
            tracing::debug!(state = %self.state, "start rejected");
            return false;
        }
        // The log already exists: it is rebuilt eagerly on every selection or input change.
        self.state = PlaybackState::Running;
        self.stepping = false;
        tracing::info!(algorithm = %self.algorithm, cursor = self.replay.cursor(), "playback started");
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Running {
            tracing::debug!(state = %self.state, "pause rejected");
            return false;
        }
        self.state = PlaybackState::Paused;
        tracing::info!(cursor = self.replay.cursor(), "playback paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            tracing::debug!(state = %self.state, "resume rejected");
            return false;
        }
        self.state = PlaybackState::Running;
        self.stepping = false;
        tracing::info!(cursor = self.replay.cursor(), "playback resumed");
        true
    }

    /// The single pause control: pauses when running, resumes when paused.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            PlaybackState::Running => self.pause(),
            PlaybackState::Paused => self.resume(),
            _ => {
                tracing::debug!(state = %self.state, "pause toggle rejected");
                false
            }
        }
    }

    /// Applies one event while running. `None` when not running.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.state != PlaybackState::Running {
            return None;
        }
        let Some(applied) = self.advance() else {
            self.finish();
            return None;
        };
        let next_delay = self.is_running().then(|| self.delay());
        Some(TickOutcome {
            applied,
            next_delay,
        })
    }

    /// Manual single tick from Idle or Paused. Does not enter Running.
    pub fn step(&mut self) -> Option<Applied> {
        if !matches!(self.state, PlaybackState::Idle | PlaybackState::Paused) {
            tracing::debug!(state = %self.state, "step rejected");
            return None;
        }
        let applied = self.advance()?;
        self.stepping = self.state != PlaybackState::Done;
        Some(applied)
    }

    /// Restores the original sequence and zeroes the counters. Rejected while running.
    pub fn reset(&mut self) -> bool {
        if self.is_running() {
            tracing::debug!("reset rejected while running");
            return false;
        }
        self.replay.reset();
        self.enter_idle();
        tracing::info!(algorithm = %self.algorithm, "playback reset");
        true
    }

    pub fn select_algorithm(&mut self, algorithm: Algorithm) -> bool {
        if self.is_running() {
            tracing::debug!(%algorithm, "algorithm change rejected while running");
            return false;
        }
        self.algorithm = algorithm;
        self.rebuild(self.replay.original().to_vec());
        true
    }

    /// Replaces the input with `values`. Rejected while running.
    pub fn load(&mut self, values: Vec<u32>) -> bool {
        if self.is_running() {
            tracing::debug!("input change rejected while running");
            return false;
        }
        self.rebuild(values);
        true
    }

    pub fn regenerate(&mut self, source: &mut dyn RandomSource, size: usize) -> bool {
        if self.is_running() {
            tracing::debug!("regenerate rejected while running");
            return false;
        }
        self.rebuild(source.generate(size));
        true
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            values: self.replay.values(),
            highlight: &self.last_highlight,
            comparisons: self.replay.comparisons(),
            writes: self.replay.writes(),
            cursor: self.replay.cursor(),
            total: self.replay.log().len(),
            status: self.status_label(),
        }
    }

    pub fn snapshot(&self) -> ReplaySnapshot {
        self.replay.snapshot()
    }

    pub fn summary(&self) -> PlaybackSummary {
        PlaybackSummary {
            algorithm: self.algorithm,
            state: self.state,
            size: self.replay.values().len(),
            cursor: self.replay.cursor(),
            total: self.replay.log().len(),
            comparisons: self.replay.comparisons(),
            writes: self.replay.writes(),
            sorted: self.replay.sorted_indices().len(),
            speed: self.speed,
        }
    }

    fn advance(&mut self) -> Option<Applied> {
        let applied = self.replay.apply_next()?;
        self.last_highlight = applied.highlight.clone();
        if applied.event.is_done() {
            self.finish();
        }
        Some(applied)
    }

    fn finish(&mut self) {
        self.state = PlaybackState::Done;
        self.stepping = false;
        tracing::info!(
            comparisons = self.replay.comparisons(),
            writes = self.replay.writes(),
            "playback done"
        );
    }

    fn rebuild(&mut self, input: Vec<u32>) {
        let log = self.algorithm.generate_log(&input);
        tracing::debug!(algorithm = %self.algorithm, size = input.len(), events = log.len(), "rebuilt event log");
        self.replay = ReplayState::new(input, log);
        self.enter_idle();
    }

    fn enter_idle(&mut self) {
        self.state = PlaybackState::Idle;
        self.stepping = false;
        self.last_highlight = Highlight::default();
    }
}

/// Suspends the driving loop between ticks.
///
/// The pacer gets the controller while the loop is suspended, so a host can pause,
/// change speed, or otherwise steer playback before the next wake-up check.
pub trait Pacer {
    fn suspend(&mut self, delay: Duration, controller: &mut PlaybackController);
}

/// Blocks the thread for the requested delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn suspend(&mut self, delay: Duration, _controller: &mut PlaybackController) {
        std::thread::sleep(delay);
    }
}

/// Returns immediately; used for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelayPacer;

impl Pacer for NoDelayPacer {
    fn suspend(&mut self, _delay: Duration, _controller: &mut PlaybackController) {}
}

/// Runs the cooperative loop until the controller leaves `Running`.
///
/// Renders after every applied event. Returns the state the loop exited in.
/// A render failure pauses the controller before the error is returned.
pub fn drive(
    controller: &mut PlaybackController,
    renderer: &mut dyn Renderer,
    pacer: &mut dyn Pacer,
) -> SortResult<PlaybackState> {
    while let Some(outcome) = controller.tick() {
        if let Err(err) = renderer.render(&controller.frame()) {
            tracing::warn!(cursor = controller.replay().cursor(), "render failed: {err}");
            controller.pause();
            return Err(err);
        }
        let Some(delay) = outcome.next_delay else {
            break;
        };
        pacer.suspend(delay, controller);
    }
    Ok(controller.state())
}
