use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::OutputMode;

/// Local staging locations and output shape for argument assembly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembleOptions {
    /// Inputs are staged into this directory
    pub input_dir: String,
    /// Outputs are written under this directory
    pub output_dir: String,
    pub mode: OutputMode,
    /// Compute staged paths without transferring anything
    pub mock: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            input_dir: String::from("./"),
            output_dir: String::from("./module_out/"),
            mode: OutputMode::String,
            mock: false,
        }
    }
}

/// Kinds of per-run names derived from a module name and job id.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunNameKind {
    IoJson,
    JobJson,
    JobName,
    JobDef,
    Plain,
}

/// Where module templates and per-run module files are stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleLayout {
    pub template_dir: PathBuf,
    pub module_dir: PathBuf,
}

impl Default for ModuleLayout {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("templates"),
            module_dir: PathBuf::from("modules"),
        }
    }
}

impl ModuleLayout {
    pub fn new(template_dir: impl Into<PathBuf>, module_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            module_dir: module_dir.into(),
        }
    }

    pub fn template_path(&self, module: &str) -> PathBuf {
        self.template_dir.join(format!("{module}.template.json"))
    }

    pub fn io_dir(&self, module: &str) -> PathBuf {
        self.module_dir.join(module).join("io")
    }

    pub fn job_dir(&self, module: &str) -> PathBuf {
        self.module_dir.join(module).join("job")
    }

    pub fn run_io_path(&self, module: &str, job_id: &str) -> PathBuf {
        self.io_dir(module)
            .join(run_name(module, job_id, RunNameKind::IoJson))
    }

    pub fn run_job_path(&self, module: &str, job_id: &str) -> PathBuf {
        self.job_dir(module)
            .join(run_name(module, job_id, RunNameKind::JobJson))
    }
}

pub fn run_name(module: &str, job_id: &str, kind: RunNameKind) -> String {
    match kind {
        RunNameKind::IoJson => format!("{module}.{job_id}.io.json"),
        RunNameKind::JobJson => format!("{module}.{job_id}.job.json"),
        RunNameKind::JobName => format!("job_{module}_{job_id}"),
        RunNameKind::JobDef => format!("jdef_{module}_{job_id}"),
        RunNameKind::Plain => format!("{module}.{job_id}"),
    }
}

/// Job id embedded in a run-arguments file name: `bwa.JOB1.io.json` -> `JOB1`.
pub fn job_id_from_run_arguments(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').nth(1))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidArgument {
            arg: "run_arguments",
            value: path.display().to_string(),
        })
}
