//! Sortreel core library: event-log simulation of sorting algorithms and controlled replay.

mod cmd;
mod config;
mod error;
mod event;
mod playback;
mod render;
mod replay;
mod runners;
mod runtime;
mod source;
mod speed;
mod tracefile;

pub use cmd::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use playback::*;
pub use render::*;
pub use replay::*;
pub use runners::*;
pub use runtime::*;
pub use source::*;
pub use speed::*;
pub use tracefile::*;
