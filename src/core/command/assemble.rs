use tracing::debug;

use crate::core::command::insert::insert;
use crate::core::command::units::{ArgUnit, ArgValue, flatten};
use crate::core::instance::{Binding, ModuleInstance};
use crate::core::params::AssembleOptions;
use crate::core::template::PositionCode;
use crate::error::Result;
use crate::io::paths::{full_path, full_paths, infer_file_system};
use crate::io::staging::Stager;
use crate::types::{OutputMode, SlotKind};

/// Token appended to commands built for a dry run.
pub const DRYRUN_MARKER: &str = "-dryrun";

/// A fully assembled program command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    Tokens(Vec<String>),
    Joined(String),
}

impl CommandLine {
    pub fn tokens(&self) -> Vec<String> {
        match self {
            CommandLine::Tokens(tokens) => tokens.clone(),
            CommandLine::Joined(s) => s
                .split(' ')
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    pub fn is_dryrun(&self) -> bool {
        match self {
            CommandLine::Tokens(tokens) => tokens.iter().any(|t| t == DRYRUN_MARKER),
            CommandLine::Joined(s) => s.split(' ').any(|t| t == DRYRUN_MARKER),
        }
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandLine::Tokens(tokens) => write!(f, "{}", tokens.join(" ")),
            CommandLine::Joined(s) => write!(f, "{}", s),
        }
    }
}

/// Stage an input binding and wrap the local path(s) with its prefix.
fn staged_input(binding: &Binding, opts: &AssembleOptions, stager: &dyn Stager) -> Result<ArgUnit> {
    let scheme = infer_file_system(&binding.directory);
    let remote = full_paths(&binding.directory, &binding.files);
    let value = match binding.kind {
        SlotKind::Folder => {
            let folder = remote.first().cloned().unwrap_or_else(|| binding.directory.clone());
            ArgValue::One(stager.download_folder(&folder, &opts.input_dir, scheme, opts.mock)?)
        }
        SlotKind::File => {
            ArgValue::Many(stager.download_files(&remote, &opts.input_dir, scheme, opts.mock)?)
        }
    };
    Ok(ArgUnit::prefixed(binding.prefix.clone(), value))
}

/// Local output path(s) of an output binding; nothing is transferred.
fn local_output(binding: &Binding, opts: &AssembleOptions) -> ArgUnit {
    let value = match binding.files.as_slice() {
        [single] => ArgValue::One(full_path(&opts.output_dir, single)),
        files => ArgValue::Many(full_paths(&opts.output_dir, files)),
    };
    ArgUnit::prefixed(binding.prefix.clone(), value)
}

/// Build the final command for a module instance.
///
/// Starts from the instance's program arguments and inserts, in this fixed
/// order, the primary input, the primary output, each alternate input and
/// each alternate output at their position codes, then the subprogram and
/// program names at the front. Inputs are staged into `opts.input_dir`;
/// outputs are only resolved under `opts.output_dir`.
pub fn assemble(
    instance: &ModuleInstance,
    opts: &AssembleOptions,
    stager: &dyn Stager,
) -> Result<CommandLine> {
    let mut units: Vec<ArgUnit> = instance
        .program_arguments
        .split(' ')
        .map(ArgUnit::literal)
        .collect();

    if let Some(input) = &instance.program_input {
        insert(&mut units, staged_input(input, opts, stager)?, input.position);
    }
    if let Some(output) = &instance.program_output {
        insert(&mut units, local_output(output, opts), output.position);
    }
    for alt in &instance.alternate_inputs {
        insert(&mut units, staged_input(alt, opts, stager)?, alt.position);
    }
    for alt in &instance.alternate_outputs {
        insert(&mut units, local_output(alt, opts), alt.position);
    }

    insert(
        &mut units,
        ArgUnit::literal(instance.program_subname.clone()),
        PositionCode::Front,
    );
    insert(
        &mut units,
        ArgUnit::literal(instance.program_name.clone()),
        PositionCode::Front,
    );

    let mut tokens = flatten(&units);
    if instance.dryrun {
        tokens.push(DRYRUN_MARKER.to_string());
    }
    debug!("Assembled {} argument token(s)", tokens.len());

    Ok(match opts.mode {
        OutputMode::List => CommandLine::Tokens(tokens),
        OutputMode::String => CommandLine::Joined(tokens.join(" ")),
    })
}
