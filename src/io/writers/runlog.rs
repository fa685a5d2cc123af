use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::core::descriptor::IoDescriptor;
use crate::core::instance::ModuleInstance;
use crate::error::Result;

/// Everything recorded about one module run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub module: String,
    pub run_job_id: String,
    pub local_input_dir: String,
    pub local_output_dir: String,
    pub remote_input_dir: String,
    pub remote_output_dir: String,
    pub local_input_file: String,
    pub local_output_file: String,
    pub program_arguments: String,
    pub run_arguments: IoDescriptor,
    pub module_instance: ModuleInstance,
    pub job_json: Value,
    /// RFC 3339, UTC
    pub logged_at: String,
}

impl RunRecord {
    pub fn log_file_name(&self) -> String {
        format!("{}.{}.job.log", self.module, self.run_job_id)
    }
}

/// Write `record` as pretty JSON into `output_dir`; returns the file path.
pub fn write_run_log(record: &RunRecord, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(record.log_file_name());
    let json_string = serde_json::to_string_pretty(record)?;
    std::fs::write(&path, json_string)?;
    info!("Wrote run log: {:?}", path);
    Ok(path)
}

/// Current time for [`RunRecord::logged_at`].
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_named_log_file() {
        let dir = TempDir::new().unwrap();
        let record = RunRecord {
            module: "bwamem".to_string(),
            run_job_id: "JOB7".to_string(),
            local_input_dir: "/w/".to_string(),
            local_output_dir: "/w/module_out/".to_string(),
            remote_input_dir: "s3://fastq/".to_string(),
            remote_output_dir: "s3://align/".to_string(),
            local_input_file: "/w/my.fastq".to_string(),
            local_output_file: "/w/module_out/my.sam".to_string(),
            program_arguments: "bwa mem -dryrun".to_string(),
            run_arguments: IoDescriptor::default(),
            module_instance: ModuleInstance::default(),
            job_json: serde_json::json!({}),
            logged_at: timestamp(),
        };
        let path = write_run_log(&record, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("bwamem.JOB7.job.log"));

        let back: RunRecord =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.program_arguments, "bwa mem -dryrun");
        assert_eq!(back.remote_output_dir, "s3://align/");
    }
}
