//! Seeded randomness shared by every noise generator.
//!
//! Generators never touch ambient/global RNG state; each one owns a
//! [`RandomStream`] built from an explicit seed.

mod stream;

pub use stream::RandomStream;
