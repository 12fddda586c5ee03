//! Command implementations

pub mod rollover;
pub mod version;
