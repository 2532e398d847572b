//! Field of View calculation
//!
//! Recursive shadowcasting over eight octants. Slopes are kept as exact
//! rationals so diagonal walls produce the same shadow edge every time.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::Cell;

/// Angular bound of a cell relative to the origin, as `num / den` with `den > 0`
#[derive(Debug, Clone, Copy)]
pub struct Slope {
    num: i64,
    den: i64,
}

impl Slope {
    /// Build a slope from a numerator and a non-zero denominator
    pub fn new(num: i64, den: i64) -> Self {
        debug_assert!(den != 0, "slope denominator must be non-zero");
        if den < 0 {
            Self { num: -num, den: -den }
        } else {
            Self { num, den }
        }
    }

    pub const ONE: Slope = Slope { num: 1, den: 1 };
    pub const ZERO: Slope = Slope { num: 0, den: 1 };

    /// Left edge of the cell at `(dx, dy)` in octant-local coordinates
    fn left(dx: i32, dy: i32) -> Self {
        Self::new(2 * dx as i64 - 1, 2 * dy as i64 + 1)
    }

    /// Right edge of the cell at `(dx, dy)` in octant-local coordinates
    fn right(dx: i32, dy: i32) -> Self {
        Self::new(2 * dx as i64 + 1, 2 * dy as i64 - 1)
    }
}

impl PartialEq for Slope {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slope {}

impl PartialOrd for Slope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slope {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplying keeps the order
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}

/// Sign/swap coefficients mapping octant-local `(dx, dy)` onto the grid
#[derive(Debug, Clone, Copy)]
struct Octant {
    xx: i32,
    xy: i32,
    yx: i32,
    yy: i32,
}

impl Octant {
    const fn new(xx: i32, xy: i32, yx: i32, yy: i32) -> Self {
        Self { xx, xy, yx, yy }
    }

    #[inline]
    fn apply(&self, origin: Cell, dx: i32, dy: i32) -> Cell {
        Cell::new(
            origin.x + dx * self.xx + dy * self.xy,
            origin.y + dx * self.yx + dy * self.yy,
        )
    }
}

const OCTANTS: [Octant; 8] = [
    Octant::new(1, 0, 0, 1),
    Octant::new(0, 1, 1, 0),
    Octant::new(0, -1, 1, 0),
    Octant::new(-1, 0, 0, 1),
    Octant::new(-1, 0, 0, -1),
    Octant::new(0, -1, -1, 0),
    Octant::new(0, 1, -1, 0),
    Octant::new(1, 0, 0, -1),
];

/// Output of one shadowcast
#[derive(Debug, Clone, Default)]
pub struct VisibilityResult {
    /// Cells with a clear line of sight inside the radius
    pub visible: HashSet<Cell>,
    /// Opaque cells that started a shadow
    pub blocked: HashSet<Cell>,
    /// Squared distance from the origin for every visible and blocked cell
    pub distance: HashMap<Cell, u32>,
}

impl VisibilityResult {
    fn with_origin(origin: Cell) -> Self {
        let mut result = Self::default();
        result.visible.insert(origin);
        result.distance.insert(origin, 0);
        result
    }

    pub fn is_visible(&self, cell: Cell) -> bool {
        self.visible.contains(&cell)
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    pub fn distance_sq(&self, cell: Cell) -> Option<u32> {
        self.distance.get(&cell).copied()
    }

    /// Visible cells ordered farthest first, ties broken by coordinate
    pub fn visible_by_distance_desc(&self) -> Vec<(u32, Cell)> {
        let mut cells: Vec<(u32, Cell)> = self
            .visible
            .iter()
            .map(|&cell| (self.distance.get(&cell).copied().unwrap_or(0), cell))
            .collect();
        cells.sort_unstable_by(|a, b| b.cmp(a));
        cells
    }
}

/// Compute the cells visible from `origin` out to `max_radius`.
///
/// `is_opaque` is queried for cells in every direction and may be asked about
/// cells outside whatever grid the caller owns.
pub fn compute_visibility<F>(origin: Cell, is_opaque: F, max_radius: i32) -> VisibilityResult
where
    F: Fn(Cell) -> bool,
{
    let mut caster = Shadowcaster {
        origin,
        radius: max_radius,
        radius_sq: (max_radius.max(0) as u64).pow(2),
        is_opaque,
        result: VisibilityResult::with_origin(origin),
    };

    if max_radius > 0 {
        for octant in &OCTANTS {
            caster.cast_light(octant, 1, Slope::ONE, Slope::ZERO);
        }
    }

    caster.result
}

struct Shadowcaster<F> {
    origin: Cell,
    radius: i32,
    radius_sq: u64,
    is_opaque: F,
    result: VisibilityResult,
}

impl<F> Shadowcaster<F>
where
    F: Fn(Cell) -> bool,
{
    /// Scan one octant from `row` outward inside the window `[end, start]`
    fn cast_light(&mut self, octant: &Octant, row: i32, mut start: Slope, end: Slope) {
        if start < end {
            return;
        }

        let mut next_start = start;

        for j in row..=self.radius {
            let dy = -j;
            let mut blocked = false;

            for dx in -j..=0 {
                let left = Slope::left(dx, dy);
                let right = Slope::right(dx, dy);

                if start < right {
                    continue;
                }
                if end > left {
                    break;
                }

                let cell = octant.apply(self.origin, dx, dy);
                let (wide_dx, wide_dy) = (dx as i64, dy as i64);
                let wide_sq = (wide_dx * wide_dx + wide_dy * wide_dy) as u64;
                let distance_sq = u32::try_from(wide_sq).unwrap_or(u32::MAX);
                if wide_sq < self.radius_sq {
                    self.result.visible.insert(cell);
                    self.result.distance.insert(cell, distance_sq);
                }

                let opaque = (self.is_opaque)(cell);
                if blocked {
                    if opaque {
                        next_start = right;
                    } else {
                        blocked = false;
                        start = next_start;
                    }
                } else if opaque && j < self.radius {
                    blocked = true;
                    self.result.blocked.insert(cell);
                    self.result.distance.insert(cell, distance_sq);
                    self.cast_light(octant, j + 1, start, left);
                    next_start = right;
                }
            }

            if blocked {
                break;
            }
        }
    }
}
