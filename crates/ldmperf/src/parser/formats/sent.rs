use crate::parser::columns::{ColumnMap, ColumnRef};
use crate::parser::profile::{Gate, ParserProfile};

/// Sender-side LDM6 lines: no marker, the size column must be numeric.
///
/// `<arrival> <host> <proc> <size> <inserted> ... <prodindex>`
pub const SENT_COLUMNS: ColumnMap = ColumnMap {
    identifier: ColumnRef::LAST,
    size: ColumnRef::Index(3),
    arrival: ColumnRef::Index(0),
    inserted: ColumnRef::Index(4),
};

impl ParserProfile {
    pub fn sent() -> Self {
        Self {
            gate: Gate::NumericColumn {
                column: SENT_COLUMNS.size,
            },
            columns: SENT_COLUMNS,
        }
    }
}
