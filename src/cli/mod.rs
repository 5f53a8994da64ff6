//! Command Line Interface (CLI) layer for SARPROJ.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the projection, ROI statistics
//! and quicklook subcommands. It wires user-provided options to the
//! library functionality exposed via `sarproj::api`.
//!
//! If you are embedding SARPROJ into another application, prefer using
//! the high-level `sarproj::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
