//! Core composition building blocks: run-argument parsing, I/O descriptors,
//! module templates and their matching, and command assembly. These are
//! internal primitives consumed by the high-level `api` module.
pub mod command;
pub mod descriptor;
pub mod instance;
pub(crate) mod keys;
pub mod params;
pub mod run_args;
pub mod template;
