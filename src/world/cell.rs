//! Grid coordinates
//!
//! Cells, pixel-space footprints, and the conversion between them.

use serde::{Deserialize, Serialize};

/// A position on the light grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance in grid units
    pub fn distance_sq(&self, other: &Cell) -> u32 {
        let dx = (self.x as i64 - other.x as i64).unsigned_abs();
        let dy = (self.y as i64 - other.y as i64).unsigned_abs();
        let sq = dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy));
        u32::try_from(sq).unwrap_or(u32::MAX)
    }

    /// The cell containing a pixel
    pub fn from_pixel(px: i32, py: i32, cell_size_px: u32) -> Self {
        let cs = cell_size_px.max(1) as i32;
        Self::new(px.div_euclid(cs), py.div_euclid(cs))
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned rectangle in pixel space (right and bottom are exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Cells touched by this rectangle.
    ///
    /// The cell holding the right/bottom edge is included, so a footprint
    /// ending exactly on a cell boundary still claims the next cell.
    pub fn to_cells(&self, cell_size_px: u32) -> CellRect {
        let top_left = Cell::from_pixel(self.x, self.y, cell_size_px);
        let bottom_right = Cell::from_pixel(self.right(), self.bottom(), cell_size_px);
        CellRect::new(top_left, bottom_right)
    }
}

/// Inclusive rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub min: Cell,
    pub max: Cell,
}

impl CellRect {
    pub fn new(min: Cell, max: Cell) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// Iterate every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixel_negative() {
        assert_eq!(Cell::from_pixel(0, 0, 8), Cell::new(0, 0));
        assert_eq!(Cell::from_pixel(7, 15, 8), Cell::new(0, 1));
        assert_eq!(Cell::from_pixel(-1, -8, 8), Cell::new(-1, -1));
        assert_eq!(Cell::from_pixel(-9, 0, 8), Cell::new(-2, 0));
    }

    #[test]
    fn test_footprint_includes_edge_cells() {
        let rect = PixelRect::new(4, 4, 8, 4);
        let cells = rect.to_cells(8);
        assert_eq!(cells.min, Cell::new(0, 0));
        // right edge at x=12 lands in cell 1, bottom edge at y=8 lands in cell 1
        assert_eq!(cells.max, Cell::new(1, 1));
        assert_eq!(cells.cells().count(), 4);
    }

    #[test]
    fn test_intersects() {
        let a = PixelRect::new(0, 0, 10, 10);
        assert!(a.intersects(&PixelRect::new(5, 5, 10, 10)));
        assert!(!a.intersects(&PixelRect::new(10, 0, 5, 5)));
    }

    #[test]
    fn test_distance_sq() {
        assert_eq!(Cell::new(0, 0).distance_sq(&Cell::new(3, -4)), 25);
        assert_eq!(Cell::new(i32::MIN, 0).distance_sq(&Cell::new(i32::MAX, 0)), u32::MAX);
    }
}
