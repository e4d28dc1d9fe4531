//! Ticket CLI: command parsing, environment config and the interactive shell
//! behind the `ticket-sim` binary.

pub mod commands;
pub mod config;
pub mod shell;

pub use commands::{apply, parse_assignment, parse_command, Command, CommandError};
pub use config::CliConfig;
pub use shell::{Reply, Shell};
