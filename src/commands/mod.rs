//! Command implementations for mdschema.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod check;
mod derive;

use crate::cli::Command;
use crate::error::Result;

pub use check::run_check;
pub use derive::derive_schema;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Check(args) => check::cmd_check(args),
        Command::Derive(args) => derive::cmd_derive(args),
    }
}
