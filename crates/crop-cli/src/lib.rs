//! Library side of the crop yield CLI: configuration, logging, and the
//! consolidation pipeline.

pub mod config;
pub mod logging;
pub mod pipeline;
