//! Deterministic, seed-driven 2D noise fields rasterized to grayscale images.
//!
//! This crate provides a gradient (Perlin-style) and a cellular
//! (Voronoi-style) noise generator behind one [`NoiseGenerator`] trait,
//! plus a policy-driven PNG encoder for the resulting sample grids.

pub mod random;
pub mod field;
pub mod noise;
pub mod export;

pub use random::RandomStream;
pub use field::NoiseField;
pub use noise::{CellularNoise, GradientNoise, NoiseConfig, NoiseError, NoiseGenerator, NoiseKind};
pub use export::{ExportError, IntensityPolicy};
