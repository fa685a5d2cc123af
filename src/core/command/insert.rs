use tracing::warn;

use crate::core::command::units::ArgUnit;
use crate::core::template::PositionCode;

/// Index a unit lands at for a list of length `len`, or `None` when the code
/// writes nothing.
pub fn insertion_index(position: PositionCode, len: usize) -> Option<usize> {
    match position {
        PositionCode::Front => Some(0),
        PositionCode::End => Some(len),
        PositionCode::BeforeEnd(n) => Some(len.saturating_sub(n as usize)),
        PositionCode::Omit | PositionCode::Unsupported(_) => None,
    }
}

/// Insert `unit` into `list` at `position`, measured against the list as it
/// is now.
pub fn insert(list: &mut Vec<ArgUnit>, unit: ArgUnit, position: PositionCode) {
    if let PositionCode::Unsupported(code) = position {
        warn!("Position code {} is out of range; argument not inserted", code);
    }
    if let Some(index) = insertion_index(position, list.len()) {
        list.insert(index, unit);
    }
}
