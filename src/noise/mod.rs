//! Coherent gradient noise primitives.

pub mod gradient;
pub mod coherent;

pub use gradient::{gradient_at, GRADIENT_COUNT};
pub use coherent::coherent_noise;
