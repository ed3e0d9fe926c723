//! Multi-octave fractal height source built on coherent gradient noise.

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::noise::coherent_noise;
use crate::source::HeightSource;

/// Noise evaluation strategy.
///
/// A single strategy exists today; the enum is the dispatch point for
/// future evaluators (higher-order easing, fast approximations).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NoiseQuality {
    /// Smoothstep-eased trilinear gradient noise.
    #[default]
    Standard,
}

/// Parameters controlling fractal height generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FractalParams {
    /// Random seed, any 32-bit value.
    pub seed: i32,
    /// Base spatial frequency (> 0).
    pub frequency: f32,
    /// Number of octaves summed (>= 1).
    pub octaves: u32,
    /// Per-octave frequency multiplier (2.0 typical).
    pub lacunarity: f32,
    /// Per-octave amplitude multiplier, in (0, 1).
    pub persistence: f32,
    /// Magnitude factor applied inside each octave evaluation.
    pub scale: f32,
    /// Output multiplier applied to the summed value.
    pub height_scale: f32,
    /// Optional lower clamp on the output. No upper counterpart exists;
    /// see [`FractalSource::set_min`].
    pub min_height: Option<f32>,
    /// Evaluation strategy.
    pub quality: NoiseQuality,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 1.0,
            octaves: 12,
            lacunarity: 2.0,
            persistence: 0.625,
            scale: 2.12,
            height_scale: 1.0,
            min_height: None,
            quality: NoiseQuality::Standard,
        }
    }
}

impl FractalParams {
    /// Check construction-time preconditions. Bad parameters fail here
    /// rather than surfacing as NaN in later samples.
    pub fn validate(&self) -> Result<()> {
        if self.octaves == 0 {
            return Err(Error::Config("octaves must be >= 1".to_string()));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(Error::Config(format!(
                "frequency must be finite and > 0, got {}",
                self.frequency
            )));
        }
        if !self.persistence.is_finite() || self.persistence <= 0.0 || self.persistence >= 1.0 {
            return Err(Error::Config(format!(
                "persistence must be in (0, 1), got {}",
                self.persistence
            )));
        }
        if !self.lacunarity.is_finite() {
            return Err(Error::Config(format!(
                "lacunarity must be finite, got {}",
                self.lacunarity
            )));
        }
        if !self.scale.is_finite() {
            return Err(Error::Config(format!(
                "scale must be finite, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

/// One noise layer: seed offset, frequency and amplitude for its depth.
#[derive(Clone, Copy, Debug)]
struct Octave {
    seed: i32,
    frequency: f32,
    amplitude: f32,
}

/// Fractal height source summing weighted octaves of coherent noise.
///
/// The octave array is derived once at construction and never changes;
/// evaluation touches no mutable state, so a configured source can be
/// sampled concurrently from any number of threads.
#[derive(Clone, Debug)]
pub struct FractalSource {
    params: FractalParams,
    octaves: Vec<Octave>,
}

impl FractalSource {
    /// Create a source from validated parameters.
    pub fn new(params: FractalParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::build(params))
    }

    /// Create a source with default parameters and the given seed.
    pub fn from_seed(seed: i32) -> Self {
        Self::build(FractalParams {
            seed,
            ..Default::default()
        })
    }

    /// Create a seeded source with its output multiplier already set.
    ///
    /// Planet surfaces typically use a few percent of the body radius,
    /// atmosphere shells around 1.5%.
    pub fn with_height_scale(seed: i32, height_scale: f32) -> Self {
        Self::build(FractalParams {
            seed,
            height_scale,
            ..Default::default()
        })
    }

    // Derive the per-octave seed/frequency/amplitude table. Amplitudes
    // and frequencies accumulate by repeated multiplication, octave i
    // carrying persistence^i and frequency * lacunarity^i.
    fn build(params: FractalParams) -> Self {
        let mut octaves = Vec::with_capacity(params.octaves as usize);
        let mut amplitude = 1.0_f32;
        let mut frequency = params.frequency;
        for o in 0..params.octaves {
            octaves.push(Octave {
                seed: params.seed.wrapping_add(o as i32),
                frequency,
                amplitude,
            });
            frequency *= params.lacunarity;
            amplitude *= params.persistence;
        }
        Self { params, octaves }
    }

    /// Borrow the construction parameters.
    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    /// Enable the minimum clamp at `min`.
    ///
    /// Clamping is asymmetric: only a lower bound is ever enforced, and
    /// output remains unbounded above. Callers needing a ceiling must
    /// apply their own.
    pub fn set_min(&mut self, min: f32) {
        self.params.min_height = Some(min);
    }

    /// Theoretical output envelope: `scale * sum(amplitude_i)`, before the
    /// height-scale multiplier. No sample can exceed it in magnitude.
    pub fn max_amplitude(&self) -> f32 {
        let sum: f32 = self.octaves.iter().map(|o| o.amplitude).sum();
        self.params.scale * sum
    }

    fn sample_octave(&self, position: Vec3, octave: &Octave) -> f32 {
        let nx = position.x * octave.frequency;
        let ny = position.y * octave.frequency;
        let nz = position.z * octave.frequency;
        match self.params.quality {
            NoiseQuality::Standard => {
                coherent_noise(nx, ny, nz, octave.seed, self.params.scale)
            }
        }
    }
}

impl HeightSource for FractalSource {
    fn height_at(&self, position: Vec3) -> f32 {
        let mut value = 0.0_f32;
        for octave in &self.octaves {
            value += self.sample_octave(position, octave) * octave.amplitude;
        }
        value *= self.params.height_scale;

        if let Some(min) = self.params.min_height {
            value = value.max(min);
        }

        value
    }

    fn seed(&self) -> i32 {
        self.params.seed
    }

    fn height_scale(&self) -> f32 {
        self.params.height_scale
    }

    fn set_height_scale(&mut self, height_scale: f32) {
        self.params.height_scale = height_scale;
    }
}
