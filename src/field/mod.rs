//! The 2D floating-point sample grid produced by every generator.

mod grid;

pub use grid::NoiseField;
