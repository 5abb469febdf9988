//! Line filtering: marker matchers used to gate log families.

pub mod engine;

pub use engine::{FilterError, MarkerMatcher};
