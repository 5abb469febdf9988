use crate::parser::columns::{ColumnMap, ColumnRef};
use crate::parser::profile::{Gate, ParserProfile};

/// Subsystem name followed by the receipt keyword.
pub const MLDM_MARKER: &str = "mldm.*Received";

/// Receiver-side multicast receipt lines.
///
/// `<arrival> <host> <proc> <level> <src> Received <size> <inserted> ... <prodindex>`
pub const MLDM_COLUMNS: ColumnMap = ColumnMap {
    identifier: ColumnRef::LAST,
    size: ColumnRef::Index(6),
    arrival: ColumnRef::Index(0),
    inserted: ColumnRef::Index(7),
};

impl ParserProfile {
    pub fn mldm() -> Self {
        Self {
            gate: Gate::Marker {
                pattern: MLDM_MARKER.to_string(),
            },
            columns: MLDM_COLUMNS,
        }
    }
}
