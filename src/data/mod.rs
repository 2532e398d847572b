//! Data loading
//!
//! Fog settings read from RON files.

pub mod config;

pub use config::{CellMetrics, FogConfig, MemoryPolicy, MAX_LIGHT_RADIUS, MAX_RADIUS_PX};
