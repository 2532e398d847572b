//! Dynamic actors
//!
//! Actors fade by distance to the observer alone; they ignore walls.

use serde::{Deserialize, Serialize};

use crate::render::brightness;
use crate::world::PixelRect;

/// Result of gating one actor against the observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    pub hidden: bool,
    /// 0 (transparent) to 255 (opaque); 0 when hidden
    pub opacity: u8,
}

/// Decide whether an actor is drawn and how strongly.
///
/// Centers are in pixels and `light_radius_sq` is the squared light radius in
/// pixels. Anything at or beyond the radius is hidden.
pub fn gate(actor_center: (i32, i32), observer_center: (i32, i32), light_radius_sq: u32) -> Gate {
    let dx = actor_center.0 as i64 - observer_center.0 as i64;
    let dy = actor_center.1 as i64 - observer_center.1 as i64;
    let d2 = dx * dx + dy * dy;

    if d2 >= light_radius_sq as i64 {
        return Gate { hidden: true, opacity: 0 };
    }

    Gate {
        hidden: false,
        opacity: brightness(d2 as u32, light_radius_sq, 0),
    }
}

/// A moving entity drawn over the fog (ghosts, NPCs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    /// Sprite bounds in pixels
    pub rect: PixelRect,
    pub hidden: bool,
    pub opacity: u8,
}

impl Actor {
    pub fn new(name: impl Into<String>, rect: PixelRect) -> Self {
        Self {
            name: name.into(),
            rect,
            hidden: false,
            opacity: 255,
        }
    }

    pub fn center(&self) -> (i32, i32) {
        self.rect.center()
    }

    /// Refresh `hidden`/`opacity` for this tick
    pub fn apply_gate(&mut self, observer_center: (i32, i32), light_radius_sq: u32) {
        let result = gate(self.center(), observer_center, light_radius_sq);
        self.hidden = result.hidden;
        if !result.hidden {
            self.opacity = result.opacity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_at_observer() {
        let result = gate((100, 100), (100, 100), 400);
        assert_eq!(result, Gate { hidden: false, opacity: 255 });
    }

    #[test]
    fn test_gate_hides_at_radius() {
        assert!(gate((120, 100), (100, 100), 400).hidden);
        assert!(gate((500, -30), (100, 100), 400).hidden);
        assert!(!gate((119, 100), (100, 100), 400).hidden);
    }

    #[test]
    fn test_gate_fades_with_distance() {
        let near = gate((105, 100), (100, 100), 400);
        let far = gate((115, 100), (100, 100), 400);
        assert!(near.opacity > far.opacity);
        assert!(far.opacity > 0);
    }

    #[test]
    fn test_gate_zero_radius_hides() {
        assert!(gate((0, 0), (0, 0), 0).hidden);
    }

    #[test]
    fn test_actor_keeps_last_opacity_when_hidden() {
        let mut ghost = Actor::new("ghost", PixelRect::new(0, 0, 10, 10));
        ghost.apply_gate((5, 8), 100);
        assert!(!ghost.hidden);
        let seen = ghost.opacity;

        ghost.apply_gate((500, 500), 100);
        assert!(ghost.hidden);
        assert_eq!(ghost.opacity, seen);
    }
}
