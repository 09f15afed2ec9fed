// vconv-cli/src/lib.rs
//
// Library portion of the vconv CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
pub mod progress;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ConvertArgs};
pub use commands::codecs::run_codecs;
pub use commands::convert::run_convert;
