/// Built-in line family profiles

pub mod mldm;
pub mod backstop;
pub mod sent;

pub use backstop::BACKSTOP_MARKER;
pub use mldm::MLDM_MARKER;
