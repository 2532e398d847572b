//! Illumination compositor
//!
//! Turns a shadowcast into the intensity field used to darken the scene.
//! Two surfaces are kept at cell resolution: the reveal mask, which only
//! ever gains white discs, and the light surface, which is rebuilt from
//! scratch every tick and then multiplied by the mask.

use super::falloff::BrightnessCache;
use super::Surface;
use crate::world::{Cell, VisibilityResult};

/// Per-tick lighting parameters, all in cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeParams {
    /// Brightness of explored cells outside the light
    pub explored_floor: u8,
    /// Squared light radius the falloff curve reaches the floor at
    pub light_radius_sq: u32,
    /// Radius of the disc painted around each visible cell
    pub cast_light_radius: u32,
    /// Distance bucket size for the brightness cache
    pub falloff_bucket: u32,
}

/// Owns the reveal mask and the light field
#[derive(Debug, Clone)]
pub struct IlluminationCompositor {
    reveal_mask: Surface,
    field: Surface,
}

impl IlluminationCompositor {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            reveal_mask: Surface::new(width, height, 0),
            field: Surface::new(width, height, 0),
        }
    }

    /// Reallocate both surfaces; the reveal mask starts black again
    pub fn resize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }

    /// Cells ever revealed (255) vs never revealed (0)
    pub fn reveal_mask(&self) -> &Surface {
        &self.reveal_mask
    }

    /// Output of the last [`composite`](Self::composite) call
    pub fn field(&self) -> &Surface {
        &self.field
    }

    /// Build this tick's intensity field.
    ///
    /// `newly_discovered` holds the cells that just got a reveal radius; their
    /// discs are added to the reveal mask before the light is applied.
    pub fn composite(
        &mut self,
        result: &VisibilityResult,
        newly_discovered: &[(Cell, u32)],
        params: &CompositeParams,
    ) -> &Surface {
        for &(cell, radius) in newly_discovered {
            self.reveal_mask.fill_disc(cell, radius, 255);
        }

        self.field.fill(params.explored_floor);

        let mut cache = BrightnessCache::new(
            params.falloff_bucket,
            params.light_radius_sq,
            params.explored_floor,
        );
        // Farthest first so brighter discs end up on top
        for (distance_sq, cell) in result.visible_by_distance_desc() {
            let value = cache.get(distance_sq);
            self.field.fill_disc(cell, params.cast_light_radius, value);
        }

        self.field.multiply(&self.reveal_mask);
        &self.field
    }
}
