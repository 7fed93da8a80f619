//! CLI subcommands that are not playback itself.

mod log_cmd;
mod schema;

pub use log_cmd::*;
pub use schema::*;
