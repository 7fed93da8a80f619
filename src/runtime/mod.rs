//! Headless drivers layered on the playback controller.

mod script;
mod timeline;

pub use script::*;
pub use timeline::*;
