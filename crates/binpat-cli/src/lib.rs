//! CLI library components for the binary pattern generator.

pub mod logging;
pub mod summary;
