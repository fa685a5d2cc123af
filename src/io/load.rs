//! Loading templates, run arguments and job files from disk.
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::core::descriptor::{IoDescriptor, build_io_descriptor};
use crate::core::params::ModuleLayout;
use crate::core::run_args::parse_run_input;
use crate::core::template::ModuleTemplate;
use crate::error::Result;

pub fn load_template(path: &Path) -> Result<ModuleTemplate> {
    info!("Loading module template {:?}", path);
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn load_io_descriptor(path: &Path) -> Result<IoDescriptor> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Load a run's arguments as an I/O descriptor. `.json` files hold the
/// descriptor itself; anything else holds a raw run-argument string.
pub fn load_run_arguments(path: &Path) -> Result<IoDescriptor> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        debug!("Reading I/O descriptor {:?}", path);
        return load_io_descriptor(path);
    }
    debug!("Parsing run-argument string from {:?}", path);
    let raw = fs::read_to_string(path)?;
    let line = raw.lines().map(str::trim).collect::<Vec<_>>().join(" ");
    build_io_descriptor(&parse_run_input(&line)?)
}

/// The job JSON recorded for a run, or an empty object when there is none.
pub fn load_job_json(layout: &ModuleLayout, module: &str, job_id: &str) -> Result<Value> {
    let path = layout.run_job_path(module, job_id);
    if !path.is_file() {
        debug!("No job file at {:?}", path);
        return Ok(Value::Object(Default::default()));
    }
    let text = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn run_arguments_from_raw_string() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bwa.JOB1.args");
        fs::write(
            &path,
            "bwa mem -input=my.fastq -inputdir=/reads\n-output=/out/my.sam -dryrun\n",
        )
        .unwrap();
        let io = load_run_arguments(&path).unwrap();
        assert_eq!(io.input, vec!["/reads/my.fastq"]);
        assert_eq!(io.output, vec!["/out/my.sam"]);
        assert!(io.dryrun);
    }

    #[test]
    fn run_arguments_from_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bwa.JOB1.io.json");
        fs::write(&path, r#"{"input": ["/reads/my.fastq"], "sample_id": "S1"}"#).unwrap();
        let io = load_run_arguments(&path).unwrap();
        assert_eq!(io.input, vec!["/reads/my.fastq"]);
        assert_eq!(io.sample_id, "S1");
        assert!(!io.dryrun);
    }

    #[test]
    fn malformed_template_is_a_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.template.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_template(&path),
            Err(crate::error::Error::Json(_))
        ));
    }

    #[test]
    fn missing_job_file_is_empty_object() {
        let dir = TempDir::new().unwrap();
        let layout = ModuleLayout::new(dir.path().join("t"), dir.path().join("m"));
        assert_eq!(
            load_job_json(&layout, "bwa", "J1").unwrap(),
            serde_json::json!({})
        );

        fs::create_dir_all(layout.job_dir("bwa")).unwrap();
        fs::write(layout.run_job_path("bwa", "J1"), r#"{"vcpus": 4}"#).unwrap();
        assert_eq!(
            load_job_json(&layout, "bwa", "J1").unwrap()["vcpus"],
            4
        );
    }
}
