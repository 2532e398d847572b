//! World module
//!
//! Grid coordinates, line of sight, and what the observer has explored.

pub mod cell;
pub mod fov;
pub mod ledger;
pub mod memory;

pub use cell::{Cell, CellRect, PixelRect};
pub use fov::{compute_visibility, Slope, VisibilityResult};
pub use ledger::{CellVisibility, ExplorationLedger, LedgerTile};
pub use memory::FogMemory;
