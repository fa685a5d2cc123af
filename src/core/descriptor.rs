//! I/O descriptors: the normalized, fully-pathed file lists of one run.
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::core::run_args::RunArgsDescriptor;
use crate::error::{Error, Result};
use crate::io::paths::join_path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoDescriptor {
    #[serde(default)]
    pub input: Vec<String>,
    #[serde(default)]
    pub output: Vec<String>,
    #[serde(default)]
    pub alternate_inputs: Vec<String>,
    #[serde(default)]
    pub alternate_outputs: Vec<String>,
    /// Overrides the template's default arguments when non-empty.
    #[serde(default)]
    pub program_arguments: String,
    #[serde(default)]
    pub sample_id: String,
    /// Module-specific options, carried through to the module instance.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub options: String,
    #[serde(default, with = "presence", skip_serializing_if = "std::ops::Not::not")]
    pub dryrun: bool,
}

/// Flags encoded as key presence: written as `""`, any value reads as set.
pub(crate) mod presence {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(_flag: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str("")
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        IgnoredAny::deserialize(d)?;
        Ok(true)
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').filter(|entry| !entry.is_empty())
}

/// Resolve a primary list: entries carrying a directory are kept, bare names
/// are joined with the companion directory key.
fn resolve_entries(
    run_args: &RunArgsDescriptor,
    key: &'static str,
    dir_key: &'static str,
) -> Result<Vec<String>> {
    let Some(value) = run_args.get(key) else {
        return Ok(Vec::new());
    };
    split_list(value)
        .map(|entry| {
            if entry.contains('/') {
                return Ok(entry.to_string());
            }
            match run_args.get(dir_key) {
                Some(dir) => Ok(join_path(dir, entry)),
                None => {
                    error!("{} entry {:?} needs `{}` to be specified", key, entry, dir_key);
                    Err(Error::MissingDirectory {
                        key: dir_key,
                        entry: entry.to_string(),
                    })
                }
            }
        })
        .collect()
}

/// Normalize parsed run arguments into an I/O descriptor.
pub fn build_io_descriptor(run_args: &RunArgsDescriptor) -> Result<IoDescriptor> {
    let input = resolve_entries(run_args, "input", "inputdir")?;
    let output = resolve_entries(run_args, "output", "outputdir")?;

    let list = |key: &str| -> Vec<String> {
        run_args
            .get(key)
            .map(|v| split_list(v).map(str::to_string).collect())
            .unwrap_or_default()
    };
    let text = |key: &str| run_args.get(key).unwrap_or_default().to_string();

    let sample_id = run_args
        .get("sampleid")
        .or_else(|| run_args.get("sample_id"))
        .unwrap_or_default()
        .to_string();

    Ok(IoDescriptor {
        input,
        output,
        alternate_inputs: list("alternate_inputs"),
        alternate_outputs: list("alternate_outputs"),
        program_arguments: text("pargs"),
        sample_id,
        options: text("options"),
        dryrun: run_args.has_flag("dryrun"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::run_args::parse_run_input;

    fn build(raw: &str) -> Result<IoDescriptor> {
        build_io_descriptor(&parse_run_input(raw).unwrap())
    }

    #[test]
    fn keeps_full_paths() {
        let io = build(
            "mpileup -sampleid=MYSAMPLE -input=s3://bams/my.bam -output=s3://pileup/my.pileup \
             -alternate_inputs=input1.fasta,input2.bed -dryrun",
        )
        .unwrap();
        assert_eq!(io.input, vec!["s3://bams/my.bam"]);
        assert_eq!(io.output, vec!["s3://pileup/my.pileup"]);
        assert_eq!(io.alternate_inputs, vec!["input1.fasta", "input2.bed"]);
        assert!(io.alternate_outputs.is_empty());
        assert_eq!(io.program_arguments, "");
        assert_eq!(io.sample_id, "MYSAMPLE");
        assert!(io.dryrun);
    }

    #[test]
    fn joins_bare_names_with_directories() {
        let io = build(
            "mpileup -sampleid=MYSAMPLE -input=my.bam -output=my.pileup -inputdir=s3://bams \
             -outputdir=s3://pileup/ -alternate_inputs=s3://fasta/input1.fasta,s3://bed/input2.bed",
        )
        .unwrap();
        assert_eq!(io.input, vec!["s3://bams/my.bam"]);
        assert_eq!(io.output, vec!["s3://pileup/my.pileup"]);
        assert_eq!(
            io.alternate_inputs,
            vec!["s3://fasta/input1.fasta", "s3://bed/input2.bed"]
        );
        assert!(!io.dryrun);
    }

    #[test]
    fn splits_multiple_inputs() {
        let io = build("bwa mem -input=R1.fastq.gz,R2.fastq.gz -inputdir=/reads").unwrap();
        assert_eq!(io.input, vec!["/reads/R1.fastq.gz", "/reads/R2.fastq.gz"]);
        assert!(io.output.is_empty());
    }

    #[test]
    fn bare_name_without_directory_fails() {
        match build("mpileup -input=my.bam -output=s3://pileup/my.pileup") {
            Err(Error::MissingDirectory { key, entry }) => {
                assert_eq!(key, "inputdir");
                assert_eq!(entry, "my.bam");
            }
            other => panic!("expected missing directory, got {:?}", other),
        }
        assert!(matches!(
            build("mpileup -input=s3://bams/my.bam -output=my.pileup"),
            Err(Error::MissingDirectory { key: "outputdir", .. })
        ));
    }

    #[test]
    fn sample_id_falls_back_to_long_key() {
        let io = build("mpileup -sample_id=S2 -input=/b/x.bam").unwrap();
        assert_eq!(io.sample_id, "S2");
        let io = build("mpileup -input=/b/x.bam").unwrap();
        assert_eq!(io.sample_id, "");
    }

    #[test]
    fn pargs_and_options_carry_through() {
        let io = build(r#"mpileup -input=/b/x.bam -pargs="-q 20 -Q 20" -options=fast"#).unwrap();
        assert_eq!(io.program_arguments, "-q 20 -Q 20");
        assert_eq!(io.options, "fast");
    }

    #[test]
    fn dryrun_json_is_key_presence() {
        let io: IoDescriptor = serde_json::from_str(
            r#"{"input": ["s3://fastq/my.fastq"], "output": [], "alternate_inputs": [],
                "alternate_outputs": [], "program_arguments": "", "sample_id": "", "dryrun": ""}"#,
        )
        .unwrap();
        assert!(io.dryrun);
        let v = serde_json::to_value(&io).unwrap();
        assert_eq!(v["dryrun"], "");

        let io: IoDescriptor = serde_json::from_str(r#"{"input": []}"#).unwrap();
        assert!(!io.dryrun);
        let v = serde_json::to_value(&io).unwrap();
        assert!(v.get("dryrun").is_none());
    }
}
