//! Fog configuration
//!
//! Loaded from a RON file, with defaults for anything left out.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FogError, Result};
use crate::render::CompositeParams;

/// Largest accepted `light_radius`, in cells
pub const MAX_LIGHT_RADIUS: u32 = 4096;
/// Largest accepted pixel size or radius
pub const MAX_RADIUS_PX: u32 = i16::MAX as u32;

/// What happens to the fog memory when the viewport changes size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MemoryPolicy {
    /// Forget every reveal radius; the new grid starts unexplored
    #[default]
    Clear,
    /// Keep reveal radii keyed by their old cell coordinates
    Keep,
}

/// All recognized fog settings. Distances ending in `_px` are in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    /// Side of one light cell in pixels
    pub cell_size_px: u32,
    /// Light and shadowcast radius in cells
    pub light_radius: u32,
    /// Brightness of explored cells outside the light (0-255)
    pub explored_value: u8,
    pub blocked_expose_min_px: u32,
    pub blocked_expose_max_px: u32,
    pub unblocked_expose_min_px: u32,
    pub unblocked_expose_max_px: u32,
    /// Radius of the light disc painted around each visible cell
    pub cast_light_px: u32,
    /// Squared-distance bucket size for the brightness cache
    pub falloff_bucket: u32,
    /// Treat cells outside the grid as walls
    pub edge_blocks_light: bool,
    pub memory_on_resize: MemoryPolicy,
    /// Seed for reveal radii; random when absent
    pub seed: Option<u64>,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            cell_size_px: 8,
            light_radius: 24,
            explored_value: 64,
            blocked_expose_min_px: 8,
            blocked_expose_max_px: 24,
            unblocked_expose_min_px: 16,
            unblocked_expose_max_px: 40,
            cast_light_px: 16,
            falloff_bucket: 1,
            edge_blocks_light: false,
            memory_on_resize: MemoryPolicy::Clear,
            seed: None,
        }
    }
}

impl FogConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.cell_size_px == 0 {
            return Err(FogError::InvalidConfig("cell_size_px must be positive".to_string()));
        }
        if self.falloff_bucket == 0 {
            return Err(FogError::InvalidConfig("falloff_bucket must be positive".to_string()));
        }
        if self.blocked_expose_min_px > self.blocked_expose_max_px {
            return Err(FogError::InvalidConfig(format!(
                "blocked_expose_min_px ({}) exceeds blocked_expose_max_px ({})",
                self.blocked_expose_min_px, self.blocked_expose_max_px
            )));
        }
        if self.unblocked_expose_min_px > self.unblocked_expose_max_px {
            return Err(FogError::InvalidConfig(format!(
                "unblocked_expose_min_px ({}) exceeds unblocked_expose_max_px ({})",
                self.unblocked_expose_min_px, self.unblocked_expose_max_px
            )));
        }
        if self.light_radius > MAX_LIGHT_RADIUS {
            return Err(FogError::InvalidConfig(format!(
                "light_radius {} exceeds {}",
                self.light_radius, MAX_LIGHT_RADIUS
            )));
        }
        let pixel_fields = [
            ("cell_size_px", self.cell_size_px),
            ("cast_light_px", self.cast_light_px),
            ("blocked_expose_max_px", self.blocked_expose_max_px),
            ("unblocked_expose_max_px", self.unblocked_expose_max_px),
        ];
        for (name, value) in pixel_fields {
            if value > MAX_RADIUS_PX {
                return Err(FogError::InvalidConfig(format!(
                    "{name} {value} exceeds {MAX_RADIUS_PX}"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a RON string
    pub fn from_ron(content: &str) -> Result<Self> {
        let config: FogConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a RON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No fog config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| FogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&content)?;
        log::info!("Loaded fog config from {}", path.display());
        Ok(config)
    }

    /// Like [`load`](Self::load) but falls back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Write as pretty-printed RON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, content).map_err(|source| FogError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Convert pixel settings into cell units
    pub fn metrics(&self) -> CellMetrics {
        CellMetrics::from_config(self)
    }
}

/// Settings converted to cell units, recomputed whenever the grid is resized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMetrics {
    pub cell_size_px: u32,
    /// Shadowcast radius in cells
    pub light_radius: i32,
    /// Squared light radius in cells (lighting falloff)
    pub light_radius_sq: u32,
    /// Squared light radius in pixels (actor gate)
    pub light_radius_px_sq: u32,
    pub blocked_reveal: RangeInclusive<u32>,
    pub unblocked_reveal: RangeInclusive<u32>,
    pub cast_light_radius: u32,
    pub explored_floor: u8,
    pub falloff_bucket: u32,
}

impl CellMetrics {
    pub fn from_config(config: &FogConfig) -> Self {
        let cs = config.cell_size_px.max(1);
        let to_cells = |px: u32| (px / cs).max(1);
        let radius_px = config.light_radius.saturating_mul(cs);

        Self {
            cell_size_px: cs,
            light_radius: config.light_radius as i32,
            light_radius_sq: config.light_radius.saturating_mul(config.light_radius),
            light_radius_px_sq: radius_px.saturating_mul(radius_px),
            blocked_reveal: to_cells(config.blocked_expose_min_px)..=to_cells(config.blocked_expose_max_px),
            unblocked_reveal: to_cells(config.unblocked_expose_min_px)
                ..=to_cells(config.unblocked_expose_max_px),
            cast_light_radius: to_cells(config.cast_light_px),
            explored_floor: config.explored_value,
            falloff_bucket: config.falloff_bucket.max(1),
        }
    }

    pub fn composite_params(&self) -> CompositeParams {
        CompositeParams {
            explored_floor: self.explored_floor,
            light_radius_sq: self.light_radius_sq,
            cast_light_radius: self.cast_light_radius,
            falloff_bucket: self.falloff_bucket,
        }
    }
}
