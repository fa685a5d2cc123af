//! Module templates: the declarative description of how a program accepts its
//! input and output files, and where each lands on the command line.
use serde::{Deserialize, Serialize};

use crate::core::keys::{input_keys, output_keys};
use crate::types::{SlotCategory, SlotKind};

/// Where an argument unit is inserted into the working argument list.
///
/// Codes are measured against the list as it is at the moment of insertion,
/// so the final layout depends on the order insertions happen in.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum PositionCode {
    /// `0`: before everything currently in the list.
    Front,
    /// `-1`: after everything currently in the list.
    End,
    /// `-2..=-98`: this many positions before the current tail (`-2` is one).
    BeforeEnd(u8),
    /// `-100`: the argument is implied by the program and never written.
    Omit,
    /// Any other code. Inserting with it does nothing.
    Unsupported(i64),
}

impl From<i64> for PositionCode {
    fn from(code: i64) -> Self {
        match code {
            0 => PositionCode::Front,
            -1 => PositionCode::End,
            -100 => PositionCode::Omit,
            -98..=-2 => PositionCode::BeforeEnd((-code - 1) as u8),
            other => PositionCode::Unsupported(other),
        }
    }
}

impl From<PositionCode> for i64 {
    fn from(pos: PositionCode) -> Self {
        match pos {
            PositionCode::Front => 0,
            PositionCode::End => -1,
            PositionCode::BeforeEnd(n) => -(n as i64) - 1,
            PositionCode::Omit => -100,
            PositionCode::Unsupported(code) => code,
        }
    }
}

impl std::fmt::Display for PositionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", i64::from(*self))
    }
}

/// One acceptable file type for a template category, with its placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub kind: SlotKind,
    /// Compared case-insensitively against inferred file types.
    pub file_type: String,
    pub position: PositionCode,
    pub prefix: String,
}

impl Slot {
    pub fn accepts(&self, file_type: &str) -> bool {
        self.file_type.eq_ignore_ascii_case(file_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleTemplate {
    pub program_name: String,
    #[serde(default)]
    pub program_subname: String,
    #[serde(default)]
    pub program_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_version: Option<String>,
    /// Default arguments, used when a run does not override them.
    #[serde(default)]
    pub program_arguments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    #[serde(default, with = "input_keys::slots")]
    pub program_input: Vec<Slot>,
    #[serde(default, with = "output_keys::slots")]
    pub program_output: Vec<Slot>,
    #[serde(default, with = "input_keys::slots")]
    pub alternate_inputs: Vec<Slot>,
    #[serde(default, with = "output_keys::slots")]
    pub alternate_outputs: Vec<Slot>,
}

impl ModuleTemplate {
    pub fn slots(&self, category: SlotCategory) -> &[Slot] {
        match category {
            SlotCategory::ProgramInput => &self.program_input,
            SlotCategory::ProgramOutput => &self.program_output,
            SlotCategory::AlternateInputs => &self.alternate_inputs,
            SlotCategory::AlternateOutputs => &self.alternate_outputs,
        }
    }

    /// Lowercased file types declared for a category, in declaration order.
    pub fn file_types(&self, category: SlotCategory) -> Vec<String> {
        self.slots(category)
            .iter()
            .map(|s| s.file_type.to_lowercase())
            .collect()
    }

    /// First slot in declaration order accepting `file_type`.
    pub fn find_slot(&self, category: SlotCategory, file_type: &str) -> Option<&Slot> {
        self.slots(category).iter().find(|s| s.accepts(file_type))
    }
}
