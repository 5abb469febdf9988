/// Log line parsing
///
/// Turns raw receiver/sender log lines into `(identifier, size, elapsed)`
/// records.
///
/// # Architecture
///
/// - `traits.rs`: the `LineParser` trait
/// - `model.rs`: line kinds, records and per-line errors
/// - `columns.rs`: declarative field-to-column maps
/// - `profile.rs`: gate + column map driven parser
/// - `formats/`: built-in profiles (MLDM, backstop, sent)
/// - `classifier.rs`: ordered first-claim-wins parser set
/// - `timestamp.rs`: arrival and insertion time parsing

pub mod traits;
pub mod model;
pub mod columns;
pub mod profile;
pub mod formats;
pub mod classifier;
pub mod timestamp;

pub use classifier::{Classification, LineClassifier};
pub use columns::{ColumnMap, ColumnRef};
pub use model::{Field, LineKind, ParseError, Record};
pub use profile::{Gate, ParserProfile, ProfileParser};
pub use traits::LineParser;
