//! Library side of the `layout-forge` command line.

pub mod config;
pub mod logging;
pub mod pipeline;
