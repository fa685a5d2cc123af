//! Files written alongside a module run's outputs.
pub mod runlog;

pub use runlog::{RunRecord, write_run_log};
