//! Fog memory
//!
//! Remembers the reveal radius picked for each cell the first time it was
//! discovered. Radii are never changed once assigned.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use rand::Rng;

use super::Cell;

/// Append-only table of cell -> reveal radius (in cells)
#[derive(Debug, Clone, Default)]
pub struct FogMemory {
    radii: HashMap<Cell, u32>,
}

impl FogMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a radius to every cell not seen before.
    ///
    /// Returns the newly assigned `(cell, radius)` pairs in input order.
    pub fn discover<I, R>(
        &mut self,
        cells: I,
        radius_range: RangeInclusive<u32>,
        rng: &mut R,
    ) -> Vec<(Cell, u32)>
    where
        I: IntoIterator<Item = Cell>,
        R: Rng,
    {
        let (min, max) = (*radius_range.start(), *radius_range.end());
        let mut discovered = Vec::new();

        for cell in cells {
            if self.radii.contains_key(&cell) {
                continue;
            }
            let radius = if min >= max { min } else { rng.gen_range(min..=max) };
            self.radii.insert(cell, radius);
            discovered.push((cell, radius));
        }

        discovered
    }

    pub fn reveal_radius(&self, cell: Cell) -> Option<u32> {
        self.radii.get(&cell).copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.radii.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Forget everything (used when the grid it indexes is reallocated)
    pub fn clear(&mut self) {
        self.radii.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_radius_within_range() {
        let mut memory = FogMemory::new();
        let mut rng = StdRng::seed_from_u64(7);
        let cells: Vec<Cell> = (0..50).map(|x| Cell::new(x, 0)).collect();

        let found = memory.discover(cells, 2..=5, &mut rng);
        assert_eq!(found.len(), 50);
        assert!(found.iter().all(|&(_, r)| (2..=5).contains(&r)));
    }

    #[test]
    fn test_rediscovery_keeps_radius() {
        let mut memory = FogMemory::new();
        let mut rng = StdRng::seed_from_u64(42);
        let cell = Cell::new(3, 3);

        let first = memory.discover([cell], 1..=100, &mut rng);
        assert_eq!(first.len(), 1);
        let radius = first[0].1;

        for _ in 0..20 {
            let again = memory.discover([cell], 1..=100, &mut rng);
            assert!(again.is_empty());
            assert_eq!(memory.reveal_radius(cell), Some(radius));
        }
    }

    #[test]
    fn test_first_range_wins() {
        let mut memory = FogMemory::new();
        let mut rng = StdRng::seed_from_u64(1);
        let cell = Cell::new(0, 0);

        memory.discover([cell], 1..=1, &mut rng);
        memory.discover([cell], 9..=9, &mut rng);
        assert_eq!(memory.reveal_radius(cell), Some(1));
    }

    #[test]
    fn test_clear() {
        let mut memory = FogMemory::new();
        let mut rng = StdRng::seed_from_u64(1);
        memory.discover([Cell::new(1, 1)], 1..=3, &mut rng);
        assert_eq!(memory.len(), 1);

        memory.clear();
        assert!(memory.is_empty());
        assert!(!memory.contains(Cell::new(1, 1)));
    }
}
