use std::fmt;

use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid marker pattern {pattern:?}: {reason}")]
    InvalidRegex { pattern: String, reason: String },
}

/// Case-sensitive marker matcher deciding whether a line belongs to a log family.
pub struct MarkerMatcher {
    matcher: RegexMatcher,
    pattern: String,
}

impl MarkerMatcher {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        let matcher = RegexMatcherBuilder::new()
            .case_insensitive(false)
            .multi_line(false)
            .build(pattern)
            .map_err(|e| FilterError::InvalidRegex {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            matcher,
            pattern: pattern.to_string(),
        })
    }

    #[inline]
    pub fn is_match(&self, line: &str) -> bool {
        self.matcher.is_match(line.as_bytes()).unwrap_or(false)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Debug for MarkerMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerMatcher")
            .field("pattern", &self.pattern)
            .finish()
    }
}
