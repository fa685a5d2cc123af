//! Shared types and enums used across modrun.
//! Includes `SlotKind`, `SlotCategory`, `FileSystem` and `OutputMode`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Whether a template slot is satisfied by individual files or a whole folder.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    #[default]
    File,
    Folder,
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotKind::File => write!(f, "file"),
            SlotKind::Folder => write!(f, "folder"),
        }
    }
}

/// The four slot lists of a module template.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    ProgramInput,
    ProgramOutput,
    AlternateInputs,
    AlternateOutputs,
}

impl SlotCategory {
    /// Input-side categories use `input_*` keys in template JSON.
    pub fn is_input(self) -> bool {
        matches!(self, SlotCategory::ProgramInput | SlotCategory::AlternateInputs)
    }
}

impl std::fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SlotCategory::ProgramInput => "program_input",
            SlotCategory::ProgramOutput => "program_output",
            SlotCategory::AlternateInputs => "alternate_inputs",
            SlotCategory::AlternateOutputs => "alternate_outputs",
        };
        write!(f, "{}", s)
    }
}

/// Storage scheme a path lives on, as inferred from its prefix.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSystem {
    Local,
    S3,
}

impl std::fmt::Display for FileSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileSystem::Local => write!(f, "local"),
            FileSystem::S3 => write!(f, "s3"),
        }
    }
}

/// Shape of an assembled command: separate tokens or one space-joined string.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    List,
    #[default]
    String,
}
