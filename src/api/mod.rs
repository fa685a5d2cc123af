//! High-level, ergonomic library API: compose a program command from a
//! run-argument string and a module template, or carry out a whole module run
//! (staging, execution, upload and run log). Prefer these entrypoints over the
//! low-level `core` modules when integrating modrun.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::command::{CommandLine, assemble};
use crate::core::descriptor::{IoDescriptor, build_io_descriptor};
use crate::core::instance::{ModuleInstance, match_template};
use crate::core::params::{AssembleOptions, ModuleLayout, job_id_from_run_arguments};
use crate::core::run_args::parse_run_input;
use crate::core::template::ModuleTemplate;
use crate::error::Result;
use crate::io::exec::{ExecOutcome, execute};
use crate::io::load::{load_job_json, load_run_arguments, load_template};
use crate::io::paths::{full_path, infer_file_system};
use crate::io::staging::Stager;
use crate::io::workdir::generate_working_dir;
use crate::io::writers::runlog::{RunRecord, timestamp, write_run_log};
use crate::types::OutputMode;

/// Name of the output folder created inside each working directory.
pub const MODULE_OUT_DIR: &str = "module_out";

/// Job id recorded when the run-arguments file name does not carry one.
const FALLBACK_JOB_ID: &str = "run";

/// Compose the command for a raw run-argument string against `template`.
pub fn compose_command(
    raw: &str,
    template: &ModuleTemplate,
    opts: &AssembleOptions,
    stager: &dyn Stager,
) -> Result<CommandLine> {
    let io = build_io_descriptor(&parse_run_input(raw)?)?;
    compose_from_descriptor(&io, template, opts, stager)
}

/// Compose the command for an already built I/O descriptor.
pub fn compose_from_descriptor(
    io: &IoDescriptor,
    template: &ModuleTemplate,
    opts: &AssembleOptions,
    stager: &dyn Stager,
) -> Result<CommandLine> {
    let instance = match_template(template, io)?;
    assemble(&instance, opts, stager)
}

/// Inputs of a complete module run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub module: String,
    /// Raw run-argument string file, or an I/O descriptor `.json`
    pub run_arguments: PathBuf,
    /// A unique subdirectory is created under this base
    pub working_dir: PathBuf,
    pub layout: ModuleLayout,
    pub mock: bool,
    pub upload: bool,
}

/// What a module run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub working_dir: PathBuf,
    pub output_dir: PathBuf,
    pub command: CommandLine,
    pub outcome: ExecOutcome,
    pub uploaded_to: Option<String>,
    pub run_log: PathBuf,
}

fn dir_string(path: &Path) -> String {
    let s = path.to_string_lossy();
    if s.ends_with('/') {
        s.into_owned()
    } else {
        format!("{s}/")
    }
}

/// First file of the primary output, as a path under `output_dir`.
fn primary_output_file(instance: &ModuleInstance, output_dir: &str) -> Option<String> {
    instance
        .program_output
        .as_ref()
        .and_then(|b| b.files.first())
        .filter(|f| !f.is_empty())
        .map(|f| full_path(output_dir, f))
}

fn primary_input_file(instance: &ModuleInstance, input_dir: &str) -> String {
    instance
        .program_input
        .as_ref()
        .and_then(|b| b.files.first())
        .map(|f| full_path(input_dir, f))
        .unwrap_or_default()
}

/// Carry out one module run end to end.
///
/// Creates a unique working directory with a `module_out` folder, composes
/// the command from the run arguments and the module's template (inputs are
/// staged into the working directory), executes it, uploads the outputs to the
/// primary output directory unless this is a dry run or `upload` is off, and
/// writes the run log into the output folder.
pub fn run_module(request: &RunRequest, stager: &dyn Stager) -> Result<RunReport> {
    fs::create_dir_all(&request.working_dir)?;
    let working_dir = generate_working_dir(&request.working_dir);
    let output_dir = working_dir.join(MODULE_OUT_DIR);
    fs::create_dir_all(&output_dir)?;

    let input_dir_str = dir_string(&working_dir);
    let output_dir_str = dir_string(&output_dir);
    info!("Local input directory: {}", input_dir_str);
    info!("Local output directory: {}", output_dir_str);

    let io = load_run_arguments(&request.run_arguments)?;
    let template = load_template(&request.layout.template_path(&request.module))?;
    let instance = match_template(&template, &io)?;

    let opts = AssembleOptions {
        input_dir: input_dir_str.clone(),
        output_dir: output_dir_str.clone(),
        mode: OutputMode::String,
        mock: request.mock,
    };
    let command = assemble(&instance, &opts, stager)?;
    info!("Program arguments: {}", command);

    let local_output_file = primary_output_file(&instance, &output_dir_str);
    let outcome = execute(&command, local_output_file.as_deref().map(Path::new))?;

    let remote_output_dir = instance
        .program_output
        .as_ref()
        .map(|b| b.directory.clone())
        .unwrap_or_default();
    let remote_input_dir = instance
        .program_input
        .as_ref()
        .map(|b| b.directory.clone())
        .unwrap_or_default();

    let uploaded_to = match outcome {
        ExecOutcome::Completed { .. } if request.upload && !remote_output_dir.is_empty() => {
            let scheme = infer_file_system(&remote_output_dir);
            Some(stager.upload_folder(&output_dir_str, &remote_output_dir, scheme, request.mock)?)
        }
        _ => None,
    };

    let run_job_id = job_id_from_run_arguments(&request.run_arguments).unwrap_or_else(|e| {
        warn!("{}; recording job id {:?}", e, FALLBACK_JOB_ID);
        FALLBACK_JOB_ID.to_string()
    });
    let job_json = load_job_json(&request.layout, &request.module, &run_job_id)?;

    let record = RunRecord {
        module: request.module.clone(),
        run_job_id,
        local_input_dir: input_dir_str.clone(),
        local_output_dir: output_dir_str,
        remote_input_dir,
        remote_output_dir,
        local_input_file: primary_input_file(&instance, &input_dir_str),
        local_output_file: local_output_file.unwrap_or_default(),
        program_arguments: command.to_string(),
        run_arguments: io,
        module_instance: instance,
        job_json,
        logged_at: timestamp(),
    };
    let run_log = write_run_log(&record, &output_dir)?;

    Ok(RunReport {
        working_dir,
        output_dir,
        command,
        outcome,
        uploaded_to,
        run_log,
    })
}
