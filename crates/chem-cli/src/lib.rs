//! CLI library components for the chemical inventory converter.

pub mod logging;
pub mod output;
pub mod report;
