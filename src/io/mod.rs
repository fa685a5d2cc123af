//! I/O layer around the composition pipeline.
//! Provides path helpers, the `Stager` trait for moving run files, loaders for
//! templates and run arguments, program execution, working directories and
//! `writers` for run logs.
pub mod paths;

pub mod staging;
pub use staging::{LocalStager, Stager};

pub mod load;
pub use load::{load_io_descriptor, load_job_json, load_run_arguments, load_template};

pub mod exec;
pub use exec::{ExecOutcome, execute};

pub mod workdir;
pub use workdir::generate_working_dir;

pub mod writers;
