#![doc = r##"
modrun — compose and run bioinformatics programs from module templates.

A module template declares how a program takes its files: which file types it
accepts as primary and alternate inputs and outputs, whether each is a file or a
folder, the flag that introduces it, and a position code saying where it lands
on the command line. Given a run's concrete files, modrun matches them to the
template by file type and assembles the exact argument vector for the program.
It powers the modrun CLI and can be embedded in your own Rust applications.

Pipeline
--------
1. [`parse_run_input`] turns a run-argument string
   (`bwa mem -input=my.fastq -inputdir=s3://fastq/ -dryrun`) into key/value pairs.
2. [`build_io_descriptor`] resolves input and output paths.
3. [`match_template`] binds files to template slots by file type.
4. [`assemble`] stages inputs, inserts every argument at its position code and
   flattens the result into a [`CommandLine`].

Add dependency
--------------
```toml
[dependencies]
modrun = "0.1"
```

Quick start: compose a command
------------------------------
```rust
use modrun::{AssembleOptions, LocalStager, ModuleTemplate, OutputMode, compose_command};

fn main() -> modrun::Result<()> {
    let template: ModuleTemplate = serde_json::from_str(r#"{
        "program_name": "bwa",
        "program_subname": "mem",
        "program_arguments": "-S -t 4",
        "program_input": [
            {"input_type": "file", "input_file_type": "FASTQ", "input_position": -1, "input_prefix": ""}
        ],
        "program_output": [
            {"output_type": "file", "output_file_type": "SAM", "output_position": 0, "output_prefix": "-o"}
        ]
    }"#)?;

    let opts = AssembleOptions {
        input_dir: "/data/in/".to_string(),
        output_dir: "/data/out/".to_string(),
        mode: OutputMode::String,
        mock: true, // compute staged paths, transfer nothing
    };

    let cmd = compose_command(
        "bwa mem -input=s3://fastq/my.fastq -output=s3://align/my.sam -dryrun",
        &template,
        &opts,
        &LocalStager::new(),
    )?;
    assert_eq!(
        cmd.to_string(),
        "bwa mem -o /data/out/my.sam -S -t 4 /data/in/my.fastq -dryrun"
    );
    Ok(())
}
```

Carry out a whole module run
----------------------------
```rust,no_run
use std::path::PathBuf;
use modrun::{LocalStager, ModuleLayout, RunRequest, run_module};

fn main() -> modrun::Result<()> {
    let request = RunRequest {
        module: "bwamem".to_string(),
        run_arguments: PathBuf::from("/runs/bwamem.JOB1.io.json"),
        working_dir: PathBuf::from("/scratch"),
        layout: ModuleLayout::default(),
        mock: false,
        upload: true,
    };
    let report = run_module(&request, &LocalStager::new())?;
    println!("ran: {}", report.command);
    Ok(())
}
```

Error handling
--------------
All public functions return `modrun::Result<T>`; match on `modrun::Error` to
handle specific cases.

```rust
use modrun::{Error, parse_run_input};

match parse_run_input("bwa mem input=my.fastq") {
    Err(Error::Parse { token, .. }) => assert_eq!(token, "input=my.fastq"),
    other => panic!("unexpected: {other:?}"),
}
```

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — parsing, descriptors, templates, matching and command assembly.
- [`types`] — shared enums (`SlotKind`, `SlotCategory`, `FileSystem`, `OutputMode`).
- [`io`] — path helpers, staging, loaders, execution and run logs.
- [`error`] — crate-level `Error` and `Result`.
"##]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::command::{CommandLine, DRYRUN_MARKER};
pub use crate::core::descriptor::IoDescriptor;
pub use crate::core::instance::{Binding, MatchMiss, ModuleInstance};
pub use crate::core::params::{AssembleOptions, ModuleLayout, RunNameKind};
pub use crate::core::run_args::RunArgsDescriptor;
pub use crate::core::template::{ModuleTemplate, PositionCode, Slot};
pub use error::{Error, Result};
pub use types::{FileSystem, OutputMode, SlotCategory, SlotKind};

// Pipeline stages
pub use crate::core::command::assemble;
pub use crate::core::descriptor::build_io_descriptor;
pub use crate::core::instance::match_template;
pub use crate::core::run_args::parse_run_input;

// Collaborators
pub use io::exec::{ExecOutcome, execute};
pub use io::staging::{LocalStager, Stager};

// High-level API re-exports
pub use api::{RunReport, RunRequest, compose_command, compose_from_descriptor, run_module};
