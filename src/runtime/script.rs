//! Control scripts: a small deterministic step DSL that drives a playback controller.
//!
//! Scripts never sleep. `tick` applies events exactly as the timed loop would, and
//! `run_to_end` drives the loop with a no-delay pacer.

use serde::{Deserialize, Serialize};

use std::path::{Path, PathBuf};

use crate::{
    Algorithm, NoDelayPacer, PlaybackController, PlaybackState, PlaybackSummary, RandomSource,
    Renderer, SortError, SortResult, Speed, drive,
};

#[derive(Debug, Clone)]
pub struct ScriptPath {
    path: PathBuf,
}

impl ScriptPath {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptFile {
    pub version: u32,
    pub name: String,
    pub steps: Vec<ControlStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlStep {
    Start,
    Pause,
    Resume,
    TogglePause,
    Step {
        #[serde(default = "one")]
        count: usize,
    },
    Tick {
        #[serde(default = "one")]
        count: usize,
    },
    Reset,
    SetSpeed { speed: u8 },
    SelectAlgorithm { algorithm: Algorithm },
    Generate { size: usize },
    Load { values: Vec<u32> },
    RunToEnd,
    AssertStatus { status: PlaybackState },
    AssertCursor { at: usize },
    AssertCounters {
        #[serde(default)]
        comparisons: Option<u64>,
        #[serde(default)]
        writes: Option<u64>,
    },
    AssertSorted,
}

fn one() -> usize {
    1
}

pub const CONTROL_STEP_TYPES: [&str; 16] = [
    "start",
    "pause",
    "resume",
    "toggle_pause",
    "step",
    "tick",
    "reset",
    "set_speed",
    "select_algorithm",
    "generate",
    "load",
    "run_to_end",
    "assert_status",
    "assert_cursor",
    "assert_counters",
    "assert_sorted",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptReport {
    pub name: String,
    #[serde(rename = "stepsRun")]
    pub steps_run: usize,
    /// Operations the controller ignored because they were illegal in its state.
    pub rejected: usize,
    pub summary: PlaybackSummary,
}

#[derive(Debug, Clone)]
pub struct Script {
    pub name: String,
    pub steps: Vec<ControlStep>,
}

impl Script {
    pub fn load(path: &ScriptPath) -> SortResult<Self> {
        let bytes = std::fs::read(path.as_path())?;
        let file: ScriptFile = serde_json::from_slice(&bytes)?;
        Self::from_file(file)
    }

    pub fn from_file(file: ScriptFile) -> SortResult<Self> {
        if file.version != 1 {
            return Err(SortError::Script(format!(
                "unsupported script version {} (expected 1)",
                file.version
            )));
        }
        let script = Self {
            name: file.name,
            steps: file.steps,
        };
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> SortResult<()> {
        for (idx, step) in self.steps.iter().enumerate() {
            match step {
                ControlStep::SetSpeed { speed } => {
                    Speed::new(*speed).map_err(|e| SortError::Script(format!("step {idx}: {e}")))?;
                }
                ControlStep::Generate { size } if *size > crate::MAX_SIZE => {
                    return Err(SortError::Script(format!(
                        "step {idx}: generate size {size} exceeds {}",
                        crate::MAX_SIZE
                    )));
                }
                ControlStep::Load { values } if values.len() > crate::MAX_SIZE => {
                    return Err(SortError::Script(format!(
                        "step {idx}: load of {} values exceeds {}",
                        values.len(),
                        crate::MAX_SIZE
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Runs every step in order. Assertion failures stop the script with an error.
    pub fn run(
        &self,
        controller: &mut PlaybackController,
        source: &mut dyn RandomSource,
        renderer: &mut dyn Renderer,
    ) -> SortResult<ScriptReport> {
        let mut rejected = 0;
        for (idx, step) in self.steps.iter().enumerate() {
            tracing::debug!(script = %self.name, idx, ?step, "script step");
            let accepted = match step {
                ControlStep::Start => controller.start(),
                ControlStep::Pause => controller.pause(),
                ControlStep::Resume => controller.resume(),
                ControlStep::TogglePause => controller.toggle_pause(),
                ControlStep::Step { count } => {
                    let mut all = true;
                    for _ in 0..*count {
                        match controller.step() {
                            Some(_) => renderer.render(&controller.frame())?,
                            None => {
                                all = false;
                                break;
                            }
                        }
                    }
                    all
                }
                ControlStep::Tick { count } => {
                    let mut all = true;
                    for _ in 0..*count {
                        match controller.tick() {
                            Some(_) => renderer.render(&controller.frame())?,
                            None => {
                                all = false;
                                break;
                            }
                        }
                    }
                    all
                }
                ControlStep::Reset => controller.reset(),
                ControlStep::SetSpeed { speed } => {
                    controller.set_speed(Speed::new(*speed)?);
                    true
                }
                ControlStep::SelectAlgorithm { algorithm } => controller.select_algorithm(*algorithm),
                ControlStep::Generate { size } => controller.regenerate(source, *size),
                ControlStep::Load { values } => controller.load(values.clone()),
                ControlStep::RunToEnd => {
                    match controller.state() {
                        PlaybackState::Idle => {
                            controller.start();
                        }
                        PlaybackState::Paused => {
                            controller.resume();
                        }
                        PlaybackState::Running | PlaybackState::Done => {}
                    }
                    drive(controller, renderer, &mut NoDelayPacer)? == PlaybackState::Done
                }
                ControlStep::AssertStatus { status } => {
                    if controller.state() != *status {
                        return Err(self.failed(idx, format!(
                            "expected status {status}, found {}",
                            controller.state()
                        )));
                    }
                    true
                }
                ControlStep::AssertCursor { at } => {
                    let cursor = controller.replay().cursor();
                    if cursor != *at {
                        return Err(self.failed(idx, format!("expected cursor {at}, found {cursor}")));
                    }
                    true
                }
                ControlStep::AssertCounters { comparisons, writes } => {
                    let replay = controller.replay();
                    if let Some(expected) = comparisons
                        && replay.comparisons() != *expected
                    {
                        return Err(self.failed(idx, format!(
                            "expected {expected} comparisons, found {}",
                            replay.comparisons()
                        )));
                    }
                    if let Some(expected) = writes
                        && replay.writes() != *expected
                    {
                        return Err(self.failed(idx, format!(
                            "expected {expected} writes, found {}",
                            replay.writes()
                        )));
                    }
                    true
                }
                ControlStep::AssertSorted => {
                    let values = controller.replay().values();
                    if !values.windows(2).all(|w| w[0] <= w[1]) {
                        return Err(self.failed(idx, format!("values not sorted: {values:?}")));
                    }
                    true
                }
            };
            if !accepted {
                rejected += 1;
            }
        }

        Ok(ScriptReport {
            name: self.name.clone(),
            steps_run: self.steps.len(),
            rejected,
            summary: controller.summary(),
        })
    }

    fn failed(&self, idx: usize, msg: String) -> SortError {
        SortError::Script(format!("{} step {idx}: {msg}", self.name))
    }

    pub fn example() -> ScriptFile {
        ScriptFile {
            version: 1,
            name: "example".to_string(),
            steps: vec![
                ControlStep::Load {
                    values: vec![5, 3, 1],
                },
                ControlStep::SelectAlgorithm {
                    algorithm: Algorithm::Selection,
                },
                ControlStep::Step { count: 2 },
                ControlStep::AssertCounters {
                    comparisons: Some(2),
                    writes: Some(0),
                },
                ControlStep::Start,
                ControlStep::Tick { count: 1 },
                ControlStep::Pause,
                ControlStep::AssertStatus {
                    status: PlaybackState::Paused,
                },
                ControlStep::Resume,
                ControlStep::RunToEnd,
                ControlStep::AssertSorted,
            ],
        }
    }
}
