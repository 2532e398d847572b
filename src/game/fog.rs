//! Fog of war state
//!
//! Runs the whole visibility and lighting pipeline once per tick.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::{CellMetrics, FogConfig, MemoryPolicy};
use crate::entities::{Actor, Obstacle};
use crate::error::Result;
use crate::render::{IlluminationCompositor, Surface};
use crate::world::{compute_visibility, Cell, ExplorationLedger, FogMemory, PixelRect, VisibilityResult};

/// Counts from one tick, for logging and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub tick: u64,
    pub origin: Cell,
    pub visible: usize,
    pub blocked: usize,
    pub newly_discovered: usize,
    pub actors_shown: usize,
}

/// Everything the fog keeps between ticks
#[derive(Debug, Clone)]
pub struct FogOfWar {
    config: FogConfig,
    metrics: CellMetrics,
    viewport_px: (i32, i32),
    ledger: ExplorationLedger,
    memory: FogMemory,
    compositor: IlluminationCompositor,
    visibility: VisibilityResult,
    rng: StdRng,
    tick: u64,
}

impl FogOfWar {
    /// Build fog state for a viewport of `viewport_px` pixels
    pub fn new(config: FogConfig, viewport_px: (i32, i32)) -> Result<Self> {
        config.validate()?;

        let metrics = config.metrics();
        let (width, height) = grid_size(viewport_px, metrics.cell_size_px);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::info!(
            "Fog grid {}x{} cells ({}px cells, light radius {})",
            width,
            height,
            metrics.cell_size_px,
            metrics.light_radius
        );

        Ok(Self {
            ledger: ExplorationLedger::new(width, height, config.edge_blocks_light),
            compositor: IlluminationCompositor::new(width, height),
            memory: FogMemory::new(),
            visibility: VisibilityResult::default(),
            viewport_px,
            metrics,
            config,
            rng,
            tick: 0,
        })
    }

    /// Reallocate for a new viewport size.
    ///
    /// The ledger and both surfaces start over. The fog memory is cleared or
    /// kept according to [`FogConfig::memory_on_resize`].
    pub fn resize(&mut self, viewport_px: (i32, i32)) {
        self.viewport_px = viewport_px;
        self.metrics = self.config.metrics();

        let (width, height) = grid_size(viewport_px, self.metrics.cell_size_px);
        self.ledger.resize(width, height);
        self.compositor.resize(width, height);
        self.visibility = VisibilityResult::default();

        if self.config.memory_on_resize == MemoryPolicy::Clear {
            self.memory.clear();
        }

        log::info!(
            "Viewport resized to {}x{}px ({}x{} cells, memory {:?})",
            viewport_px.0,
            viewport_px.1,
            width,
            height,
            self.config.memory_on_resize
        );
    }

    /// Advance one tick.
    ///
    /// `obstacles` block light; `actors` are gated by distance and never
    /// block anything.
    pub fn tick(&mut self, observer: PixelRect, obstacles: &[Obstacle], actors: &mut [Actor]) -> TickReport {
        self.tick += 1;
        let cs = self.metrics.cell_size_px;

        self.ledger.mark_all_unseen();
        for obstacle in obstacles {
            self.ledger.reveal_footprint(obstacle.footprint_cells(cs));
        }

        let observer_center = observer.center();
        let mut actors_shown = 0;
        for actor in actors.iter_mut() {
            actor.apply_gate(observer_center, self.metrics.light_radius_px_sq);
            if !actor.hidden {
                actors_shown += 1;
            }
        }

        let origin = Cell::from_pixel(observer_center.0, observer_center.1, cs);
        let ledger = &self.ledger;
        self.visibility = compute_visibility(origin, |cell| ledger.is_opaque(cell), self.metrics.light_radius);

        let mut blocked: Vec<Cell> = self.visibility.blocked.iter().copied().collect();
        let mut visible: Vec<Cell> = self.visibility.visible.iter().copied().collect();
        blocked.sort_unstable();
        visible.sort_unstable();

        let mut discovered = self
            .memory
            .discover(blocked, self.metrics.blocked_reveal.clone(), &mut self.rng);
        discovered.extend(
            self.memory
                .discover(visible, self.metrics.unblocked_reveal.clone(), &mut self.rng),
        );

        let params = self.metrics.composite_params();
        self.compositor.composite(&self.visibility, &discovered, &params);
        self.ledger.record_visible(&self.visibility);

        let report = TickReport {
            tick: self.tick,
            origin,
            visible: self.visibility.visible.len(),
            blocked: self.visibility.blocked.len(),
            newly_discovered: discovered.len(),
            actors_shown,
        };
        log::debug!("{:?}", report);
        report
    }

    /// Intensity field from the last tick, one value per cell
    pub fn field(&self) -> &Surface {
        self.compositor.field()
    }

    /// Intensity field scaled up to viewport pixels
    pub fn field_scaled(&self) -> Surface {
        self.compositor.field().scaled(self.viewport_px.0, self.viewport_px.1)
    }

    pub fn visibility(&self) -> &VisibilityResult {
        &self.visibility
    }

    pub fn ledger(&self) -> &ExplorationLedger {
        &self.ledger
    }

    pub fn memory(&self) -> &FogMemory {
        &self.memory
    }

    pub fn compositor(&self) -> &IlluminationCompositor {
        &self.compositor
    }

    pub fn metrics(&self) -> &CellMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &FogConfig {
        &self.config
    }

    pub fn viewport_px(&self) -> (i32, i32) {
        self.viewport_px
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }
}

/// Whole cells that fit in the viewport
fn grid_size(viewport_px: (i32, i32), cell_size_px: u32) -> (i32, i32) {
    let cs = cell_size_px.max(1) as i32;
    (viewport_px.0.max(0) / cs, viewport_px.1.max(0) / cs)
}
