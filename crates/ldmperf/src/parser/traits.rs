pub use super::model::{Field, LineKind, ParseError, Record};

pub trait LineParser: Send + Sync {
    /// Extract a record from one log line.
    ///
    /// `Ok(None)` means the line is not of this kind. `Err` means the line
    /// passed the kind's gate but a column could not be extracted.
    fn parse(&self, line: &str) -> Result<Option<Record>, ParseError>;
    fn kind(&self) -> LineKind;
}
