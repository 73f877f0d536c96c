//! Parameter-block validation errors.

/// An invariant of [`ScatteringParams`](crate::ScatteringParams) that does not hold.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AtmosphereError {
    /// Radii must satisfy `atmosphere_top > planet > 0`.
    #[error("invalid radii: need atmosphere top ({top}) > planet ({planet}) > 0")]
    InvalidRadii {
        /// Planet surface radius.
        planet: f32,
        /// Atmosphere top radius.
        top: f32,
    },

    /// A scale height was zero, negative, or not finite.
    #[error("{layer} scale height must be positive, got {value}")]
    InvalidScaleHeight {
        /// Which layer ("rayleigh" or "mie").
        layer: &'static str,
        /// The offending value.
        value: f32,
    },

    /// A per-channel coefficient vector had a negative component.
    #[error("{name} must be non-negative per channel, got {value:?}")]
    NegativeCoefficient {
        /// Field name of the offending vector.
        name: &'static str,
        /// The offending vector.
        value: [f32; 3],
    },

    /// The Mie asymmetry parameter was outside the open interval (-1, 1).
    #[error("mie asymmetry g must lie in (-1, 1), got {0}")]
    InvalidAsymmetry(f32),
}
