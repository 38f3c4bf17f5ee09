//! CLI library components for Data Sweeper.

pub mod logging;
pub mod pipeline;
