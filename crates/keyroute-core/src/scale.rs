//! Scaling curves from normalized control positions to parameter values.
//!
//! # Formulas
//!
//! - **Linear**: `value = min + n * (max - min)`
//! - **Logarithmic**: `value = min * (max / min)^n`, perceptually even for frequencies
//! - **Stepped**: `value = floor(min + n * (max - min))`, for integer parameters
//!
//! `n` is always clamped to `[0.0, 1.0]` first. A range with `min > max` is an
//! inverted control: turning the knob up moves the value down.

/// Scaling curve for a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values.
    /// Ideal for filter cutoff. Requires `min > 0.0` and `max > 0.0`.
    Logarithmic,
    /// Linear mapping floored to the next lower integer.
    Stepped,
}

impl ParamScale {
    /// Stable lowercase name, used by configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            ParamScale::Linear => "linear",
            ParamScale::Logarithmic => "log",
            ParamScale::Stepped => "stepped",
        }
    }

    /// Parses a name produced by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(ParamScale::Linear),
            "log" | "logarithmic" => Some(ParamScale::Logarithmic),
            "stepped" => Some(ParamScale::Stepped),
            _ => None,
        }
    }
}

/// A value range with its scaling curve.
///
/// # Example
///
/// ```rust
/// use keyroute_core::ScaleRange;
///
/// let range = ScaleRange::linear(150.0, 24000.0);
/// assert_eq!(range.denormalize(0.5), 12075.0);
///
/// let semis = ScaleRange::stepped(-24.0, 24.0);
/// assert_eq!(semis.denormalize(0.26), -12.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    /// Value at normalized 0.0.
    pub min: f32,
    /// Value at normalized 1.0.
    pub max: f32,
    /// Curve between the endpoints.
    pub scale: ParamScale,
}

impl ScaleRange {
    /// Unit range `0.0..=1.0`, linear. The raw position passes through.
    pub const UNIT: Self = Self::linear(0.0, 1.0);

    /// Creates a range with an explicit curve.
    pub const fn new(min: f32, max: f32, scale: ParamScale) -> Self {
        Self { min, max, scale }
    }

    /// Creates a linear range.
    pub const fn linear(min: f32, max: f32) -> Self {
        Self::new(min, max, ParamScale::Linear)
    }

    /// Creates a logarithmic range.
    pub const fn logarithmic(min: f32, max: f32) -> Self {
        Self::new(min, max, ParamScale::Logarithmic)
    }

    /// Creates a stepped (integer) range.
    pub const fn stepped(min: f32, max: f32) -> Self {
        Self::new(min, max, ParamScale::Stepped)
    }

    /// Converts a normalized position to a value in this range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let n = clamp_unit(normalized);
        match self.scale {
            ParamScale::Linear => self.min + n * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || self.max <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, n)
            }
            ParamScale::Stepped => libm::floorf(self.min + n * (self.max - self.min)),
        }
    }

    /// Converts a value in this range back to a normalized position.
    ///
    /// Inverse of [`denormalize`](Self::denormalize) (up to the floor of a
    /// stepped range). A zero-width range normalizes to `0.0`.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        let n = match self.scale {
            ParamScale::Linear | ParamScale::Stepped => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || self.max <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        };
        clamp_unit(n)
    }
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self::UNIT
    }
}

#[inline]
fn clamp_unit(n: f32) -> f32 {
    if n.is_nan() { 0.0 } else { n.clamp(0.0, 1.0) }
}
