//! Exploration ledger
//!
//! The on-screen light grid. Holds the per-tick opacity snapshot handed to
//! the shadowcaster, the per-tick visible overlay, and the explored mask that
//! persists until the viewport changes size.

use super::{Cell, CellRect, VisibilityResult};

/// How a cell should be drawn this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellVisibility {
    /// In line of sight right now
    Currently,
    /// Seen on an earlier tick
    Previously,
    /// Never seen
    Never,
}

/// A single entry in the ledger
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerTile {
    /// Covered by an obstacle footprint this tick
    pub blocks_light: bool,
    /// In line of sight this tick
    pub visible: bool,
    /// Seen at least once since the last resize
    pub explored: bool,
}

/// Per-cell light and exploration state for the current viewport
#[derive(Debug, Clone)]
pub struct ExplorationLedger {
    width: i32,
    height: i32,
    tiles: Vec<LedgerTile>,
    /// Opacity reported for cells outside the grid
    edge_blocks_light: bool,
}

impl ExplorationLedger {
    /// Create a ledger of `width * height` cells, all open and unexplored
    pub fn new(width: i32, height: i32, edge_blocks_light: bool) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![LedgerTile::default(); (width * height) as usize],
            edge_blocks_light,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Reallocate for new dimensions, dropping all state
    pub fn resize(&mut self, width: i32, height: i32) {
        log::debug!(
            "Ledger resized {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        *self = Self::new(width, height, self.edge_blocks_light);
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    #[inline]
    fn idx(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some((cell.y * self.width + cell.x) as usize)
        } else {
            None
        }
    }

    pub fn tile(&self, cell: Cell) -> Option<&LedgerTile> {
        self.idx(cell).map(|idx| &self.tiles[idx])
    }

    /// Start a new tick: every cell transmits light and nothing is in sight.
    ///
    /// The explored mask is left alone.
    pub fn mark_all_unseen(&mut self) {
        for tile in &mut self.tiles {
            tile.blocks_light = false;
            tile.visible = false;
        }
    }

    /// Carve an obstacle footprint into this tick's opacity snapshot.
    ///
    /// Cells outside the grid are skipped.
    pub fn reveal_footprint(&mut self, rect: CellRect) {
        let min_x = rect.min.x.max(0);
        let min_y = rect.min.y.max(0);
        let max_x = rect.max.x.min(self.width - 1);
        let max_y = rect.max.y.min(self.height - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let idx = (y * self.width + x) as usize;
                self.tiles[idx].blocks_light = true;
            }
        }
    }

    /// Opacity oracle backed by this tick's snapshot
    pub fn is_opaque(&self, cell: Cell) -> bool {
        self.tile(cell)
            .map_or(self.edge_blocks_light, |tile| tile.blocks_light)
    }

    /// Fold a shadowcast into the visible overlay and the explored mask
    pub fn record_visible(&mut self, result: &VisibilityResult) {
        for &cell in &result.visible {
            if let Some(idx) = self.idx(cell) {
                let tile = &mut self.tiles[idx];
                tile.visible = true;
                tile.explored = true;
            }
        }
    }

    pub fn is_explored(&self, cell: Cell) -> bool {
        self.tile(cell).is_some_and(|tile| tile.explored)
    }

    pub fn is_visible(&self, cell: Cell) -> bool {
        self.tile(cell).is_some_and(|tile| tile.visible)
    }

    pub fn visibility(&self, cell: Cell) -> CellVisibility {
        match self.tile(cell) {
            Some(tile) if tile.visible => CellVisibility::Currently,
            Some(tile) if tile.explored => CellVisibility::Previously,
            _ => CellVisibility::Never,
        }
    }

    pub fn explored_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.explored).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::compute_visibility;

    #[test]
    fn test_footprint_is_opaque() {
        let mut ledger = ExplorationLedger::new(10, 10, false);
        ledger.reveal_footprint(CellRect::new(Cell::new(2, 2), Cell::new(3, 4)));

        assert!(ledger.is_opaque(Cell::new(2, 2)));
        assert!(ledger.is_opaque(Cell::new(3, 4)));
        assert!(!ledger.is_opaque(Cell::new(4, 4)));
        assert!(!ledger.is_opaque(Cell::new(1, 2)));
    }

    #[test]
    fn test_footprint_clipped_to_grid() {
        let mut ledger = ExplorationLedger::new(4, 4, false);
        ledger.reveal_footprint(CellRect::new(Cell::new(-3, -3), Cell::new(0, 10)));

        assert!(ledger.is_opaque(Cell::new(0, 0)));
        assert!(ledger.is_opaque(Cell::new(0, 3)));
        assert!(!ledger.is_opaque(Cell::new(1, 0)));

        // Entirely off-grid footprints are ignored
        ledger.reveal_footprint(CellRect::new(Cell::new(8, 8), Cell::new(9, 9)));
    }

    #[test]
    fn test_out_of_bounds_policy() {
        let open = ExplorationLedger::new(3, 3, false);
        assert!(!open.is_opaque(Cell::new(-1, 0)));
        assert!(!open.is_opaque(Cell::new(3, 3)));

        let closed = ExplorationLedger::new(3, 3, true);
        assert!(closed.is_opaque(Cell::new(-1, 0)));
        assert!(!closed.is_opaque(Cell::new(1, 1)));
    }

    #[test]
    fn test_mark_all_unseen_keeps_explored() {
        let mut ledger = ExplorationLedger::new(11, 11, false);
        ledger.reveal_footprint(CellRect::new(Cell::new(5, 3), Cell::new(5, 3)));

        let result = compute_visibility(Cell::new(5, 5), |c| ledger.is_opaque(c), 5);
        ledger.record_visible(&result);
        assert_eq!(ledger.visibility(Cell::new(5, 4)), CellVisibility::Currently);
        assert_eq!(ledger.visibility(Cell::new(5, 1)), CellVisibility::Never);

        ledger.mark_all_unseen();
        assert!(!ledger.is_opaque(Cell::new(5, 3)));
        assert!(ledger.is_explored(Cell::new(5, 4)));
        assert!(!ledger.is_visible(Cell::new(5, 4)));
        assert_eq!(ledger.visibility(Cell::new(5, 4)), CellVisibility::Previously);
    }

    #[test]
    fn test_record_skips_off_grid_cells() {
        let mut ledger = ExplorationLedger::new(4, 4, false);
        let result = compute_visibility(Cell::new(0, 0), |c| ledger.is_opaque(c), 3);
        assert!(result.is_visible(Cell::new(-1, -1)));

        ledger.record_visible(&result);
        assert!(ledger.is_explored(Cell::new(1, 1)));
        assert!(!ledger.is_explored(Cell::new(-1, -1)));
    }

    #[test]
    fn test_resize_clears_state() {
        let mut ledger = ExplorationLedger::new(4, 4, false);
        let result = compute_visibility(Cell::new(1, 1), |_| false, 2);
        ledger.record_visible(&result);
        assert!(ledger.explored_count() > 0);

        ledger.resize(6, 2);
        assert_eq!((ledger.width(), ledger.height()), (6, 2));
        assert_eq!(ledger.explored_count(), 0);
        assert!(ledger.in_bounds(Cell::new(5, 1)));
        assert!(!ledger.in_bounds(Cell::new(1, 2)));
    }
}
