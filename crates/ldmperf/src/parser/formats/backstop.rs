use crate::parser::columns::{ColumnMap, ColumnRef};
use crate::parser::profile::{Gate, ParserProfile};

/// Downstream module name followed by the insertion keyword.
pub const BACKSTOP_MARKER: &str = "down7.*Inserted";

/// Downstream backstop lines carry one field fewer ahead of size/insertion
/// than receipt lines do.
///
/// `<arrival> <host> <proc> <level> <src> <size> <inserted> Inserted ... <prodindex>`
pub const BACKSTOP_COLUMNS: ColumnMap = ColumnMap {
    identifier: ColumnRef::LAST,
    size: ColumnRef::Index(5),
    arrival: ColumnRef::Index(0),
    inserted: ColumnRef::Index(6),
};

impl ParserProfile {
    pub fn backstop() -> Self {
        Self {
            gate: Gate::Marker {
                pattern: BACKSTOP_MARKER.to_string(),
            },
            columns: BACKSTOP_COLUMNS,
        }
    }
}
