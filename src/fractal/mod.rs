//! Fractal (multi-octave) height generation.

pub mod generator;
pub use generator::{FractalParams, FractalSource, NoiseQuality};
