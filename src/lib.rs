//! Fogcast - line of sight and fog of war for grid worlds
//!
//! Shadowcasts from an observer each tick, remembers what has been
//! explored, and turns both into a smooth intensity field for darkening
//! the scene.

pub mod data;
pub mod entities;
pub mod error;
pub mod game;
pub mod render;
pub mod world;

// Re-export commonly used types
pub use data::{FogConfig, MemoryPolicy};
pub use error::{FogError, Result};
pub use game::{FogOfWar, TickReport};
pub use render::Surface;
pub use world::{compute_visibility, Cell, VisibilityResult};
