//! Bulk height sampling.
//!
//! Sampling a height source is embarrassingly parallel: evaluation is
//! pure, so grids are split across rayon workers and the output is
//! bit-identical to a serial pass. Bulk sampling is the dominant cost of
//! terrain construction, one N x N patch per mesh tile.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use crate::core::types::{Result, Vec3};
use crate::source::HeightSource;

/// A sampled grid of height values, row-major.
#[derive(Clone, Debug)]
pub struct Heightmap {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl Heightmap {
    /// Grid width in samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in samples.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at `(col, row)`.
    pub fn get(&self, col: usize, row: usize) -> f32 {
        self.values[row * self.width + col]
    }

    /// All samples, row-major.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Smallest sample.
    pub fn min(&self) -> f32 {
        self.values.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Largest sample.
    pub fn max(&self) -> f32 {
        self.values.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Mean sample value.
    pub fn mean(&self) -> f32 {
        let sum: f64 = self.values.iter().map(|&v| v as f64).sum();
        (sum / self.values.len() as f64) as f32
    }

    /// Write the grid as an 8-bit grayscale PNG, normalized to the
    /// sampled min/max range.
    pub fn write_png(&self, path: &Path) -> Result<()> {
        let min = self.min();
        let range = self.max() - min;
        let image = image::GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let v = self.get(x as usize, y as usize);
            let normalized = if range > 0.0 { (v - min) / range } else { 0.0 };
            image::Luma([(normalized * 255.0) as u8])
        });
        image.save(path)?;
        Ok(())
    }
}

/// Evaluate the source at every position, in parallel.
pub fn sample_positions(source: &dyn HeightSource, positions: &[Vec3]) -> Vec<f32> {
    positions
        .par_iter()
        .map(|&p| source.height_at(p))
        .collect()
}

/// Sample a planar patch spanned by `right` and `up` from `origin`,
/// `resolution` x `resolution` samples covering `extent` on both axes.
pub fn sample_patch(
    source: &dyn HeightSource,
    origin: Vec3,
    right: Vec3,
    up: Vec3,
    extent: f32,
    resolution: usize,
) -> Heightmap {
    let step = if resolution > 1 {
        extent / (resolution - 1) as f32
    } else {
        0.0
    };

    let mut values = vec![0.0_f32; resolution * resolution];
    values
        .par_chunks_mut(resolution)
        .enumerate()
        .for_each(|(row, out)| {
            let v = row as f32 * step;
            for (col, value) in out.iter_mut().enumerate() {
                let u = col as f32 * step;
                *value = source.height_at(origin + right * u + up * v);
            }
        });

    Heightmap {
        width: resolution,
        height: resolution,
        values,
    }
}

/// Sample a whole sphere of the given radius as an equirectangular grid,
/// `2 * resolution` columns (longitude) by `resolution` rows (latitude).
///
/// Positions lie on the sphere surface; consumers displace along the
/// radial normal by the sampled value.
pub fn sample_sphere(source: &dyn HeightSource, radius: f32, resolution: usize) -> Heightmap {
    let width = resolution * 2;
    let height = resolution;
    let start = Instant::now();

    let mut values = vec![0.0_f32; width * height];
    values
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out)| {
            // Latitude from the north pole down, cell-centered to avoid
            // degenerate duplicate rows at the poles.
            let lat = std::f32::consts::PI * ((row as f32 + 0.5) / height as f32 - 0.5);
            let (sin_lat, cos_lat) = lat.sin_cos();
            for (col, value) in out.iter_mut().enumerate() {
                let lon = std::f32::consts::TAU * (col as f32 + 0.5) / width as f32;
                let (sin_lon, cos_lon) = lon.sin_cos();
                let direction = Vec3::new(cos_lat * cos_lon, sin_lat, cos_lat * sin_lon);
                *value = source.height_at(direction * radius);
            }
        });

    let elapsed = start.elapsed();
    log::info!(
        "Sampled {} positions in {:.2}s ({:.0} samples/sec)",
        width * height,
        elapsed.as_secs_f64(),
        (width * height) as f64 / elapsed.as_secs_f64().max(1e-9)
    );

    Heightmap {
        width,
        height,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractal::FractalSource;
    use crate::source::FlatSource;

    #[test]
    fn test_sample_positions_matches_serial() {
        let source = FractalSource::from_seed(21);
        let positions: Vec<Vec3> = (0..500)
            .map(|i| {
                Vec3::new(
                    i as f32 * 0.31,
                    (i % 17) as f32 * 0.73,
                    (i % 5) as f32 * -0.41,
                )
            })
            .collect();

        let parallel = sample_positions(&source, &positions);
        for (p, v) in positions.iter().zip(parallel.iter()) {
            assert_eq!(source.height_at(*p), *v);
        }
    }

    #[test]
    fn test_patch_dimensions_and_corner() {
        let source = FractalSource::from_seed(4);
        let origin = Vec3::new(1.3, 0.7, -0.2);
        let map = sample_patch(&source, origin, Vec3::X, Vec3::Y, 4.0, 33);

        assert_eq!(map.width(), 33);
        assert_eq!(map.height(), 33);
        assert_eq!(map.get(0, 0), source.height_at(origin));
        assert_eq!(
            map.get(32, 0),
            source.height_at(origin + Vec3::X * 4.0)
        );
    }

    #[test]
    fn test_sphere_map_dimensions() {
        let source = FlatSource::new(1.0);
        let map = sample_sphere(&source, 10.0, 16);
        assert_eq!(map.width(), 32);
        assert_eq!(map.height(), 16);
        assert_eq!(map.min(), 1.0);
        assert_eq!(map.max(), 1.0);
    }

    #[test]
    fn test_sphere_map_deterministic() {
        let source = FractalSource::from_seed(8);
        let a = sample_sphere(&source, 100.0, 24);
        let b = sample_sphere(&source, 100.0, 24);
        assert_eq!(a.values(), b.values());
    }

    #[test]
    fn test_heightmap_stats() {
        let source = FractalSource::from_seed(13);
        let map = sample_patch(&source, Vec3::ZERO, Vec3::X, Vec3::Z, 20.0, 64);
        assert!(map.min() <= map.mean());
        assert!(map.mean() <= map.max());
        assert!(map.min() < map.max(), "fractal patch should vary");
    }

    #[test]
    fn test_write_png() {
        let source = FractalSource::from_seed(2);
        let map = sample_patch(&source, Vec3::ZERO, Vec3::X, Vec3::Z, 8.0, 32);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.png");
        map.write_png(&path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
