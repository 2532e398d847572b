//! Light falloff
//!
//! Quadratic ease-out from full brightness at the light source down to the
//! explored floor at the edge of the light radius.

use std::collections::HashMap;

/// Brightness of a cell at squared distance `distance_sq` from the light.
///
/// Returns 255 at the source and `explored_floor` at `light_radius_sq`.
/// Beyond the radius the curve keeps falling and is clamped at 0.
pub fn brightness(distance_sq: u32, light_radius_sq: u32, explored_floor: u8) -> u8 {
    if light_radius_sq == 0 {
        return explored_floor;
    }

    let range = (255 - explored_floor) as f64;
    let t = 1.0 - distance_sq as f64 / light_radius_sq as f64;
    let value = (-t * (t - 2.0) * range) as i32 + explored_floor as i32;
    value.clamp(0, 255) as u8
}

/// Per-tick cache of brightness values keyed by distance bucket.
///
/// Every distance in a bucket shares the value computed at the bucket's
/// lower bound, so the result does not depend on lookup order. A bucket
/// size of 1 reproduces [`brightness`] exactly.
#[derive(Debug, Clone)]
pub struct BrightnessCache {
    bucket: u32,
    light_radius_sq: u32,
    explored_floor: u8,
    values: HashMap<u32, u8>,
}

impl BrightnessCache {
    pub fn new(bucket: u32, light_radius_sq: u32, explored_floor: u8) -> Self {
        Self {
            bucket: bucket.max(1),
            light_radius_sq,
            explored_floor,
            values: HashMap::new(),
        }
    }

    pub fn get(&mut self, distance_sq: u32) -> u8 {
        let token = distance_sq / self.bucket;
        let (bucket, light_radius_sq, floor) = (self.bucket, self.light_radius_sq, self.explored_floor);
        *self
            .values
            .entry(token)
            .or_insert_with(|| brightness(token * bucket, light_radius_sq, floor))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_bounds() {
        for floor in [0u8, 40, 128, 255] {
            assert_eq!(brightness(0, 576, floor), 255);
            assert_eq!(brightness(576, 576, floor), floor);
        }
    }

    #[test]
    fn test_brightness_non_increasing() {
        let radius_sq = 400;
        let mut last = 255;
        for d in 0..=radius_sq {
            let value = brightness(d, radius_sq, 64);
            assert!(value <= last, "brightness rose at d={}", d);
            last = value;
        }
    }

    #[test]
    fn test_brightness_beyond_radius_clamps() {
        assert_eq!(brightness(10_000, 100, 64), 0);
        assert!(brightness(101, 100, 64) <= 64);
    }

    #[test]
    fn test_zero_radius() {
        assert_eq!(brightness(0, 0, 30), 30);
        assert_eq!(brightness(12, 0, 30), 30);
    }

    #[test]
    fn test_unit_bucket_matches_formula() {
        let mut cache = BrightnessCache::new(1, 300, 50);
        for d in (0..=300).rev() {
            assert_eq!(cache.get(d), brightness(d, 300, 50));
        }
        assert_eq!(cache.len(), 301);
    }

    #[test]
    fn test_bucket_is_order_independent() {
        let mut forward = BrightnessCache::new(8, 300, 50);
        let mut backward = BrightnessCache::new(8, 300, 50);
        let a: Vec<u8> = (0..=300).map(|d| forward.get(d)).collect();
        let mut b: Vec<u8> = (0..=300).rev().map(|d| backward.get(d)).collect();
        b.reverse();

        assert_eq!(a, b);
        assert_eq!(forward.get(15), brightness(8, 300, 50));
    }
}
