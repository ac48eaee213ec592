//! Value-to-intensity policies used when rasterizing a field.

/// Maps a raw noise sample to an 8-bit grayscale intensity.
///
/// The raster encoder is agnostic of where a field came from; each
/// generator hands it the policy that fits its value distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntensityPolicy {
    /// `clamp((value * gain + offset) * 255, 0, 255)`.
    ///
    /// Used for signed fields centered near zero.
    ContrastStretch {
        /// Contrast multiplier applied to the raw value.
        gain: f32,
        /// Offset added after the gain, moving zero to mid-gray.
        offset: f32,
    },
    /// `clamp(value, 0, 255)` with no remapping.
    DirectClamp,
}

impl IntensityPolicy {
    /// Contrast stretch used for gradient noise: `value * 1.2 + 0.5`.
    pub const GRADIENT: Self = Self::ContrastStretch {
        gain: 1.2,
        offset: 0.5,
    };

    /// Converts a single sample to an intensity.
    ///
    /// Fractional intensities are truncated, and NaN maps to 0.
    #[inline]
    pub fn intensity(&self, value: f32) -> u8 {
        let scaled = match *self {
            Self::ContrastStretch { gain, offset } => (value * gain + offset) * 255.0,
            Self::DirectClamp => value,
        };
        scaled.clamp(0.0, 255.0) as u8
    }
}
