//! Game module - per-tick fog pipeline and the demo scene

mod fog;
mod scene;

pub use fog::{FogOfWar, TickReport};
pub use scene::{generate_obstacles, Patrol, Scene};
