//! Conf module: analysis configuration model and loading.

pub mod model;
pub mod load;

pub use load::ConfigError;
pub use model::{AnalysisConfig, ChannelConfig, ErrorPolicy, ParserProfiles, ThroughputConfig};
