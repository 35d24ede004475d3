//! Subcommands other than serving.

pub mod ctl;
pub mod probe;

pub use ctl::CtlArgs;
