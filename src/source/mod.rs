//! Height source capability interface consumed by terrain mesh builders.
//!
//! A mesh builder samples a [`HeightSource`] over a spherified grid and
//! displaces each vertex along its normal by the returned value. Collision
//! shapes are built from the undisplaced nominal radius, so height detail
//! is visual only. Implementations must not assume their output is
//! physically collidable.

use crate::core::types::Vec3;

/// Scalar height provider over continuous 3D positions.
///
/// Evaluation (`height_at` and the accessors) is read-only and safe to
/// call concurrently from many threads. The setters take `&mut self`:
/// configuration happens on one thread before the source is shared, and
/// the borrow rules make that ordering structural rather than locked.
pub trait HeightSource: Send + Sync {
    /// Height contribution at `position`. Sign and magnitude are
    /// unconstrained except by an implementation's minimum clamp.
    fn height_at(&self, position: Vec3) -> f32;

    /// Seed this source was built from.
    fn seed(&self) -> i32;

    /// Output multiplier applied to every sample.
    fn height_scale(&self) -> f32;

    /// Set the output multiplier. Configuration phase only.
    fn set_height_scale(&mut self, height_scale: f32);
}

/// Constant-height source for undisplaced shells.
#[derive(Clone, Copy, Debug)]
pub struct FlatSource {
    height: f32,
    height_scale: f32,
    seed: i32,
}

impl FlatSource {
    /// Create a flat source returning `height` everywhere.
    pub fn new(height: f32) -> Self {
        Self {
            height,
            height_scale: 1.0,
            seed: 0,
        }
    }
}

impl HeightSource for FlatSource {
    fn height_at(&self, _position: Vec3) -> f32 {
        self.height * self.height_scale
    }

    fn seed(&self) -> i32 {
        self.seed
    }

    fn height_scale(&self) -> f32 {
        self.height_scale
    }

    fn set_height_scale(&mut self, height_scale: f32) {
        self.height_scale = height_scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_source_constant() {
        let flat = FlatSource::new(3.5);
        assert_eq!(flat.height_at(Vec3::ZERO), 3.5);
        assert_eq!(flat.height_at(Vec3::new(100.0, -40.0, 7.0)), 3.5);
    }

    #[test]
    fn test_flat_source_height_scale() {
        let mut flat = FlatSource::new(2.0);
        flat.set_height_scale(0.5);
        assert_eq!(flat.height_scale(), 0.5);
        assert_eq!(flat.height_at(Vec3::ONE), 1.0);
    }

    #[test]
    fn test_trait_object_safe() {
        let flat = FlatSource::new(1.0);
        let source: &dyn HeightSource = &flat;
        assert_eq!(source.height_at(Vec3::ZERO), 1.0);
    }
}
