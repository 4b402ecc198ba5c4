//! Command Line Interface (CLI) layer for inkprep.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `fetch` and `normalize`
//! subcommands. It wires user-provided options to the library API exposed
//! via `inkprep::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
