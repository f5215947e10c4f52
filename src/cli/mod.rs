//! The `hue-cli` command line front-end.

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{Cli, Commands};
pub use commands::{Options, execute_command};
pub use error::{CommandError, CommandResult};
