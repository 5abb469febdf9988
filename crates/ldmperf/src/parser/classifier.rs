use super::profile::{ParserProfile, ProfileParser};
use super::traits::*;
use crate::filter::FilterError;

/// Result of running a line through the classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Matched { kind: LineKind, record: Record },
    Malformed { kind: LineKind, error: ParseError },
    NoMatch,
}

/// Ordered, closed set of line parsers.
///
/// Parsers are tried in order and the first one that claims a line (either
/// with a record or with an extraction error) decides the outcome. The
/// built-in marker gates are disjoint so at most one of them ever claims a
/// given line anyway.
pub struct LineClassifier {
    parsers: Vec<Box<dyn LineParser>>,
}

impl LineClassifier {
    pub fn new(parsers: Vec<Box<dyn LineParser>>) -> Self {
        Self { parsers }
    }

    /// Build a classifier from `(kind, profile)` pairs, keeping their order.
    pub fn from_profiles<'a, I>(profiles: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (LineKind, &'a ParserProfile)>,
    {
        let parsers = profiles
            .into_iter()
            .map(|(kind, profile)| {
                ProfileParser::new(kind, profile).map(|p| Box::new(p) as Box<dyn LineParser>)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(parsers))
    }

    pub fn classify(&self, line: &str) -> Classification {
        for parser in &self.parsers {
            match parser.parse(line) {
                Ok(Some(record)) => {
                    return Classification::Matched {
                        kind: parser.kind(),
                        record,
                    }
                }
                Ok(None) => continue,
                Err(error) => {
                    return Classification::Malformed {
                        kind: parser.kind(),
                        error,
                    }
                }
            }
        }

        Classification::NoMatch
    }

    pub fn kinds(&self) -> Vec<LineKind> {
        self.parsers.iter().map(|p| p.kind()).collect()
    }
}
