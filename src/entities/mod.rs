//! Entities module
//!
//! Things placed in the world: actors that fade with distance and
//! obstacles that cast shadows.

pub mod actor;
pub mod obstacle;

pub use actor::{gate, Actor, Gate};
pub use obstacle::Obstacle;
