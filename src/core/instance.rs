//! Template matching: populate a module template's slots with the concrete
//! files of an I/O descriptor, producing a module instance.
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::core::descriptor::IoDescriptor;
use crate::core::keys::{input_keys, output_keys};
use crate::core::template::{ModuleTemplate, PositionCode, Slot};
use crate::error::{Error, Result};
use crate::io::paths::{file_folder, file_only, infer_file_type};
use crate::types::{SlotCategory, SlotKind};

/// A slot populated with concrete files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Bare file names, relative to `directory`.
    pub files: Vec<String>,
    pub kind: SlotKind,
    pub file_type: String,
    pub directory: String,
    pub position: PositionCode,
    pub prefix: String,
}

impl Binding {
    fn from_slot(slot: &Slot, paths: &[String]) -> Self {
        Binding {
            files: paths.iter().map(|p| file_only(p).to_string()).collect(),
            kind: slot.kind,
            file_type: slot.file_type.clone(),
            directory: paths.first().map(|p| file_folder(p)).unwrap_or_default(),
            position: slot.position,
            prefix: slot.prefix.clone(),
        }
    }
}

/// An alternate file that no template slot accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchMiss {
    pub category: SlotCategory,
    pub path: String,
    pub file_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleInstance {
    #[serde(default, with = "input_keys::binding")]
    pub program_input: Option<Binding>,
    #[serde(default, with = "output_keys::binding")]
    pub program_output: Option<Binding>,
    #[serde(default, with = "input_keys::bindings")]
    pub alternate_inputs: Vec<Binding>,
    #[serde(default, with = "output_keys::bindings")]
    pub alternate_outputs: Vec<Binding>,
    #[serde(default)]
    pub options: String,
    pub program_name: String,
    #[serde(default)]
    pub program_subname: String,
    #[serde(default)]
    pub program_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_version: Option<String>,
    #[serde(default)]
    pub program_arguments: String,
    #[serde(default)]
    pub sample_id: String,
    #[serde(
        default,
        with = "crate::core::descriptor::presence",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub dryrun: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmatched: Vec<MatchMiss>,
}

fn match_primary(
    template: &ModuleTemplate,
    category: SlotCategory,
    paths: &[String],
) -> Result<Option<Binding>> {
    if paths.is_empty() {
        return Ok(None);
    }
    if let Some(bare) = paths.iter().find(|p| !p.contains('/')) {
        let key = if category.is_input() { "inputdir" } else { "outputdir" };
        error!("{} entry {:?} has no directory", category, bare);
        return Err(Error::MissingDirectory {
            key,
            entry: bare.clone(),
        });
    }
    let file_type = infer_file_type(paths);
    match template.find_slot(category, &file_type) {
        Some(slot) => Ok(Some(Binding::from_slot(slot, paths))),
        None => Err(Error::TemplateMatchMiss {
            category,
            file_type,
        }),
    }
}

fn match_alternates(
    template: &ModuleTemplate,
    category: SlotCategory,
    paths: &[String],
    unmatched: &mut Vec<MatchMiss>,
) -> Vec<Binding> {
    let mut bindings = Vec::with_capacity(paths.len());
    for path in paths {
        let file = std::slice::from_ref(path);
        let file_type = infer_file_type(file);
        match template.find_slot(category, &file_type) {
            Some(slot) => bindings.push(Binding::from_slot(slot, file)),
            None => {
                warn!(
                    "No {} slot accepts {} (type {:?}); dropping it",
                    category, path, file_type
                );
                unmatched.push(MatchMiss {
                    category,
                    path: path.clone(),
                    file_type,
                });
            }
        }
    }
    bindings
}

/// Match an I/O descriptor's files against a template by file type.
///
/// Primary input and output are matched on the aggregate type of their whole
/// list; alternates are matched file by file. In every case the first slot in
/// template order wins. A primary entry without a directory, or a primary
/// list with no accepting slot, is an error; unaccepted alternates are
/// recorded in [`ModuleInstance::unmatched`].
pub fn match_template(template: &ModuleTemplate, io: &IoDescriptor) -> Result<ModuleInstance> {
    let program_input = match_primary(template, SlotCategory::ProgramInput, &io.input)?;
    let program_output = match_primary(template, SlotCategory::ProgramOutput, &io.output)?;

    let mut unmatched = Vec::new();
    let alternate_inputs = match_alternates(
        template,
        SlotCategory::AlternateInputs,
        &io.alternate_inputs,
        &mut unmatched,
    );
    let alternate_outputs = match_alternates(
        template,
        SlotCategory::AlternateOutputs,
        &io.alternate_outputs,
        &mut unmatched,
    );

    let program_arguments = if io.program_arguments.is_empty() {
        template.program_arguments.clone()
    } else {
        io.program_arguments.clone()
    };
    let options = if io.options.is_empty() {
        template.options.clone().unwrap_or_default()
    } else {
        io.options.clone()
    };

    debug!(
        "Matched {} alternate input(s), {} alternate output(s), {} unmatched",
        alternate_inputs.len(),
        alternate_outputs.len(),
        unmatched.len()
    );

    Ok(ModuleInstance {
        program_input,
        program_output,
        alternate_inputs,
        alternate_outputs,
        options,
        program_name: template.program_name.clone(),
        program_subname: template.program_subname.clone(),
        program_version: template.program_version.clone(),
        module_version: template.module_version.clone(),
        program_arguments,
        sample_id: io.sample_id.clone(),
        dryrun: io.dryrun,
        unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(kind: SlotKind, file_type: &str, position: i64, prefix: &str) -> Slot {
        Slot {
            kind,
            file_type: file_type.to_string(),
            position: PositionCode::from(position),
            prefix: prefix.to_string(),
        }
    }

    fn bwa_template() -> ModuleTemplate {
        ModuleTemplate {
            program_name: "bwa".to_string(),
            program_subname: "mem".to_string(),
            program_version: "0.7.17".to_string(),
            program_arguments: "-S -t 4".to_string(),
            program_input: vec![
                slot(SlotKind::File, "FASTQ", -1, "-i"),
                slot(SlotKind::File, "FASTQ.GZ", -1, "-i"),
            ],
            program_output: vec![slot(SlotKind::File, "SAM", 0, "-o")],
            alternate_inputs: vec![
                slot(SlotKind::File, "BED", 0, "-L"),
                slot(SlotKind::File, "FASTA", -2, ""),
            ],
            ..Default::default()
        }
    }

    fn bwa_io() -> IoDescriptor {
        IoDescriptor {
            input: vec!["s3://fastq/my.fastq".to_string()],
            output: vec!["s3://align/my.sam".to_string()],
            alternate_inputs: vec![
                "s3://fasta/input1.fasta".to_string(),
                "s3://bed/input2.bed".to_string(),
            ],
            sample_id: "MYSAMPLE".to_string(),
            dryrun: true,
            ..Default::default()
        }
    }

    #[test]
    fn binds_primary_and_alternates() {
        let mi = match_template(&bwa_template(), &bwa_io()).unwrap();

        let input = mi.program_input.unwrap();
        assert_eq!(input.files, vec!["my.fastq"]);
        assert_eq!(input.directory, "s3://fastq/");
        assert_eq!(input.file_type, "FASTQ");
        assert_eq!(input.position, PositionCode::End);

        let output = mi.program_output.unwrap();
        assert_eq!(output.files, vec!["my.sam"]);
        assert_eq!(output.directory, "s3://align/");
        assert_eq!(output.prefix, "-o");

        // alternates follow the descriptor's file order
        assert_eq!(mi.alternate_inputs.len(), 2);
        assert_eq!(mi.alternate_inputs[0].files, vec!["input1.fasta"]);
        assert_eq!(mi.alternate_inputs[0].position, PositionCode::BeforeEnd(1));
        assert_eq!(mi.alternate_inputs[1].files, vec!["input2.bed"]);
        assert_eq!(mi.alternate_inputs[1].prefix, "-L");

        assert_eq!(mi.program_arguments, "-S -t 4");
        assert_eq!(mi.sample_id, "MYSAMPLE");
        assert!(mi.dryrun);
        assert!(mi.unmatched.is_empty());
    }

    #[test]
    fn matching_ignores_case() {
        let mut template = bwa_template();
        template.program_input = vec![slot(SlotKind::File, "FASTQ", -1, "")];
        let mut io = bwa_io();
        io.input = vec!["/reads/sample.fastq".to_string()];
        let mi = match_template(&template, &io).unwrap();
        assert_eq!(mi.program_input.unwrap().file_type, "FASTQ");
    }

    #[test]
    fn compound_type_selects_gz_slot() {
        let mut io = bwa_io();
        io.input = vec![
            "s3://fastq/my_R1.fastq.gz".to_string(),
            "s3://fastq/my_R2.fastq.gz".to_string(),
        ];
        let input = match_template(&bwa_template(), &io)
            .unwrap()
            .program_input
            .unwrap();
        assert_eq!(input.file_type, "FASTQ.GZ");
        assert_eq!(input.files, vec!["my_R1.fastq.gz", "my_R2.fastq.gz"]);
    }

    #[test]
    fn first_declared_slot_wins() {
        let mut template = bwa_template();
        template.program_output = vec![
            slot(SlotKind::File, "SAM", 0, "-o"),
            slot(SlotKind::File, "sam", -1, "--out"),
        ];
        let output = match_template(&template, &bwa_io())
            .unwrap()
            .program_output
            .unwrap();
        assert_eq!(output.prefix, "-o");
    }

    #[test]
    fn primary_miss_is_an_error() {
        let mut io = bwa_io();
        io.input = vec!["s3://bams/my.bam".to_string()];
        match match_template(&bwa_template(), &io) {
            Err(Error::TemplateMatchMiss {
                category,
                file_type,
            }) => {
                assert_eq!(category, SlotCategory::ProgramInput);
                assert_eq!(file_type, "bam");
            }
            other => panic!("expected a match miss, got {:?}", other),
        }
    }

    #[test]
    fn bare_primary_names_need_a_directory() {
        let io: IoDescriptor = serde_json::from_str(r#"{"input": ["my.fastq"]}"#).unwrap();
        match match_template(&bwa_template(), &io) {
            Err(Error::MissingDirectory { key, entry }) => {
                assert_eq!(key, "inputdir");
                assert_eq!(entry, "my.fastq");
            }
            other => panic!("expected a missing directory, got {:?}", other),
        }

        let io: IoDescriptor =
            serde_json::from_str(r#"{"input": ["s3://fastq/my.fastq"], "output": ["my.sam"]}"#)
                .unwrap();
        assert!(matches!(
            match_template(&bwa_template(), &io),
            Err(Error::MissingDirectory { key: "outputdir", .. })
        ));
    }

    #[test]
    fn empty_primary_stays_unbound() {
        let mut io = bwa_io();
        io.input.clear();
        let mi = match_template(&bwa_template(), &io).unwrap();
        assert!(mi.program_input.is_none());
        assert!(mi.program_output.is_some());
    }

    #[test]
    fn unmatched_alternates_are_recorded() {
        let mut io = bwa_io();
        io.alternate_inputs.push("s3://vcf/known.vcf".to_string());
        let mi = match_template(&bwa_template(), &io).unwrap();
        assert_eq!(mi.alternate_inputs.len(), 2);
        assert_eq!(
            mi.unmatched,
            vec![MatchMiss {
                category: SlotCategory::AlternateInputs,
                path: "s3://vcf/known.vcf".to_string(),
                file_type: "vcf".to_string(),
            }]
        );
    }

    #[test]
    fn folder_output_matches_empty_type() {
        let template = ModuleTemplate {
            program_name: "bcl2fastq".to_string(),
            program_arguments: "-R /home/module_out/".to_string(),
            program_input: vec![slot(SlotKind::File, "CSV", -1, "--sample-sheet")],
            program_output: vec![slot(SlotKind::Folder, "", 0, "-o")],
            ..Default::default()
        };
        let io = IoDescriptor {
            input: vec!["s3://npipublicinternal/test/bcl/test.samplesheet.csv".to_string()],
            output: vec!["s3://npipublicinternal/test/bcl_out/".to_string()],
            sample_id: "MYRUN".to_string(),
            ..Default::default()
        };
        let mi = match_template(&template, &io).unwrap();
        let output = mi.program_output.unwrap();
        assert_eq!(output.files, vec![""]);
        assert_eq!(output.kind, SlotKind::Folder);
        assert_eq!(output.directory, "s3://npipublicinternal/test/bcl_out/");
        assert_eq!(
            mi.program_input.unwrap().directory,
            "s3://npipublicinternal/test/bcl/"
        );
    }

    #[test]
    fn run_arguments_override_template_default() {
        let mut io = bwa_io();
        io.program_arguments = "-t 16".to_string();
        let mi = match_template(&bwa_template(), &io).unwrap();
        assert_eq!(mi.program_arguments, "-t 16");
    }

    #[test]
    fn instance_json_uses_category_keys() {
        let mut io = bwa_io();
        io.output.clear();
        let mi = match_template(&bwa_template(), &io).unwrap();
        let v = serde_json::to_value(&mi).unwrap();
        assert_eq!(v["program_input"]["input"][0], "my.fastq");
        assert_eq!(v["program_input"]["input_directory"], "s3://fastq/");
        assert_eq!(v["program_output"], serde_json::json!({}));
        assert_eq!(v["alternate_inputs"][1]["input_prefix"], "-L");
        assert_eq!(v["dryrun"], "");

        let back: ModuleInstance = serde_json::from_value(v).unwrap();
        assert_eq!(back, mi);
    }
}
