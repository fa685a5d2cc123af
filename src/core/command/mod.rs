//! Turning a matched module instance into a program command: argument units
//! and flattening (`units`), position-coded insertion (`insert`) and the
//! fixed-order assembly of the final command (`assemble`).
pub mod assemble;
pub mod insert;
pub mod units;

pub use assemble::{CommandLine, DRYRUN_MARKER, assemble};
pub use insert::{insert, insertion_index};
pub use units::{ArgUnit, ArgValue, flatten};
