//! Precomputes every 6-of-45 combination with per-combination statistics and
//! writes them as flat, index-aligned binary arrays.

pub mod config;
pub mod enumeration;
pub mod persist;
pub mod pipeline;
pub mod runtime;
pub mod stats;
