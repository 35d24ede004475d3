//! Runs the external commands bound to gateway operations.
//!
//! `CommandExecutor` is the seam between the capabilities and the operating
//! system. `ProcessExecutor` launches a child process, bounds it by the
//! configured timeout, and turns its exit status and output into either a JSON
//! object or a `CommandError`.

mod error;
mod process;

pub use error::CommandError;
#[cfg(test)]
pub use process::MockCommandExecutor;
pub use process::{CommandExecutor, CommandOutput, ProcessExecutor, interpret_output};
