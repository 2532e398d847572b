//! Grayscale raster
//!
//! One byte of intensity per cell. Both fog surfaces live at cell resolution
//! and are scaled up to viewport pixels only when handed to a renderer.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

use crate::world::Cell;

/// An 8-bit intensity image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    image: GrayImage,
}

impl Surface {
    /// Create a surface filled with `value`
    pub fn new(width: i32, height: i32, value: u8) -> Self {
        let width = width.max(0) as u32;
        let height = height.max(0) as u32;
        Self {
            image: GrayImage::from_pixel(width, height, Luma([value])),
        }
    }

    pub fn width(&self) -> i32 {
        self.image.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.image.height() as i32
    }

    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// The backing image, for renderers that want to blit or save it
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.image.get_pixel(x as u32, y as u32).0[0])
    }

    pub fn set(&mut self, x: i32, y: i32, value: u8) {
        if self.in_bounds(x, y) {
            self.image.put_pixel(x as u32, y as u32, Luma([value]));
        }
    }

    pub fn fill(&mut self, value: u8) {
        for pixel in self.image.pixels_mut() {
            *pixel = Luma([value]);
        }
    }

    /// Paint a filled disc, clipped to the surface
    pub fn fill_disc(&mut self, center: Cell, radius: u32, value: u8) {
        let (cx, cy) = (center.x as i64, center.y as i64);
        let r = radius as i64;
        let r_sq = r.saturating_mul(r);

        let min_x = (cx - r).max(0);
        let min_y = (cy - r).max(0);
        let max_x = (cx + r).min(self.width() as i64 - 1);
        let max_y = (cy + r).min(self.height() as i64 - 1);

        for y in min_y..=max_y {
            let dy = y - cy;
            for x in min_x..=max_x {
                let dx = x - cx;
                if dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy)) <= r_sq {
                    self.image.put_pixel(x as u32, y as u32, Luma([value]));
                }
            }
        }
    }

    /// Multiply blend: `self = (self * other + 255) >> 8`.
    ///
    /// Only the overlapping region is blended.
    pub fn multiply(&mut self, other: &Surface) {
        let (width, height) = (other.image.width(), other.image.height());
        for (x, y, pixel) in self.image.enumerate_pixels_mut() {
            if x >= width || y >= height {
                continue;
            }
            let a = pixel.0[0] as u32;
            let b = other.image.get_pixel(x, y).0[0] as u32;
            *pixel = Luma([((a * b + 255) >> 8) as u8]);
        }
    }

    /// Nearest-neighbour rescale
    pub fn scaled(&self, width: i32, height: i32) -> Surface {
        if width <= 0 || height <= 0 || self.image.width() == 0 || self.image.height() == 0 {
            return Surface::new(width, height, 0);
        }
        Self {
            image: imageops::resize(&self.image, width as u32, height as u32, FilterType::Nearest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_disc_clips() {
        let mut surface = Surface::new(5, 5, 0);
        surface.fill_disc(Cell::new(0, 0), 1, 200);

        assert_eq!(surface.get(0, 0), Some(200));
        assert_eq!(surface.get(1, 0), Some(200));
        assert_eq!(surface.get(0, 1), Some(200));
        assert_eq!(surface.get(1, 1), Some(0));
        assert_eq!(surface.get(-1, 0), None);
    }

    #[test]
    fn test_disc_off_surface_is_noop() {
        let mut surface = Surface::new(3, 3, 9);
        surface.fill_disc(Cell::new(20, 20), 2, 255);
        surface.fill_disc(Cell::new(-40, 1), 5, 255);
        assert!(surface.pixels().iter().all(|&p| p == 9));
    }

    #[test]
    fn test_huge_disc_covers_surface() {
        let mut surface = Surface::new(4, 3, 0);
        surface.fill_disc(Cell::new(1, 1), 50_000, 77);
        assert!(surface.pixels().iter().all(|&p| p == 77));

        surface.fill_disc(Cell::new(i32::MAX, i32::MIN), u32::MAX, 12);
        assert!(surface.pixels().iter().all(|&p| p == 12));
    }

    #[test]
    fn test_multiply() {
        let mut light = Surface::new(3, 1, 200);
        let mut mask = Surface::new(3, 1, 0);
        mask.set(1, 0, 255);
        mask.set(2, 0, 128);

        light.multiply(&mask);
        assert_eq!(light.get(0, 0), Some(0));
        assert_eq!(light.get(1, 0), Some(200));
        // (200 * 128 + 255) >> 8
        assert_eq!(light.get(2, 0), Some(100));
    }

    #[test]
    fn test_multiply_keeps_floor_under_white() {
        for value in [0u8, 1, 60, 64, 128, 254, 255] {
            let mut light = Surface::new(1, 1, value);
            light.multiply(&Surface::new(1, 1, 255));
            assert_eq!(light.get(0, 0), Some(value));
        }
    }

    #[test]
    fn test_scaled() {
        let mut surface = Surface::new(2, 2, 0);
        surface.set(1, 1, 50);

        let big = surface.scaled(4, 4);
        assert_eq!((big.width(), big.height()), (4, 4));
        assert_eq!(big.get(0, 0), Some(0));
        assert_eq!(big.get(2, 2), Some(50));
        assert_eq!(big.get(3, 3), Some(50));
        assert_eq!(big.get(3, 1), Some(0));
    }

    #[test]
    fn test_scaled_to_nothing() {
        let surface = Surface::new(2, 2, 10);
        assert_eq!(surface.scaled(0, 5).pixels().len(), 0);
        assert_eq!(Surface::new(0, 0, 0).scaled(3, 3).pixels(), &[0; 9]);
    }
}
