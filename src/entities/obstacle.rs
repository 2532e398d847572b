//! Static obstacles
//!
//! Obstacles are the only things that block light. Their footprint is the
//! solid part of the sprite, not the whole sprite rectangle.

use serde::{Deserialize, Serialize};

use crate::world::{CellRect, PixelRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Sprite bounds in pixels
    pub rect: PixelRect,
    /// Solid area, relative to the sprite's top-left corner
    pub bbox: PixelRect,
}

impl Obstacle {
    /// An obstacle whose whole sprite is solid
    pub fn solid(rect: PixelRect) -> Self {
        Self {
            rect,
            bbox: PixelRect::new(0, 0, rect.width, rect.height),
        }
    }

    pub fn with_bbox(rect: PixelRect, bbox: PixelRect) -> Self {
        Self { rect, bbox }
    }

    /// Solid area in world pixels
    pub fn footprint(&self) -> PixelRect {
        PixelRect::new(
            self.rect.x + self.bbox.x,
            self.rect.y + self.bbox.y,
            self.bbox.width,
            self.bbox.height,
        )
    }

    /// Cells covered by the solid area
    pub fn footprint_cells(&self, cell_size_px: u32) -> CellRect {
        self.footprint().to_cells(cell_size_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Cell;

    #[test]
    fn test_footprint_offsets_bbox() {
        let obstacle = Obstacle::with_bbox(PixelRect::new(40, 16, 24, 24), PixelRect::new(4, 8, 16, 16));
        assert_eq!(obstacle.footprint(), PixelRect::new(44, 24, 16, 16));

        let cells = obstacle.footprint_cells(8);
        assert_eq!(cells.min, Cell::new(5, 3));
        assert_eq!(cells.max, Cell::new(7, 5));
    }
}
