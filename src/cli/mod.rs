//! Command Line Interface (CLI) layer for modrun.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for a single module run. It wires
//! user-provided options to the library functionality exposed via
//! `modrun::api`.
//!
//! If you are embedding modrun into another application, prefer using
//! the high-level `modrun::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
