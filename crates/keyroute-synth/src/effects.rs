//! Parameter state for the sections after the voice bank.
//!
//! The rack holds one value per [`EffectParam`]. Writes are sanitised per
//! parameter: mix and balance controls are clamped to `0.0..=1.0`, everything
//! else is kept non-negative. NaN writes are ignored.

use keyroute_core::EffectParam;

/// Filter, LFO, bit crusher, delay, reverb, fatten, and master values.
///
/// # Example
///
/// ```rust
/// use keyroute_core::EffectParam;
/// use keyroute_synth::EffectRack;
///
/// let mut rack = EffectRack::new();
/// rack.set(EffectParam::FilterCutoff, 12000.0);
/// rack.set(EffectParam::DelayBalance, 4.0);
///
/// assert_eq!(rack.get(EffectParam::FilterCutoff), 12000.0);
/// assert_eq!(rack.get(EffectParam::DelayBalance), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRack {
    values: [f32; EffectParam::ALL.len()],
}

impl Default for EffectRack {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectRack {
    /// Create a rack with every parameter at its default.
    pub fn new() -> Self {
        Self {
            values: EffectParam::ALL.map(default_value),
        }
    }

    /// Write a parameter.
    pub fn set(&mut self, param: EffectParam, value: f32) {
        if value.is_nan() {
            return;
        }
        let value = if is_unit(param) {
            value.clamp(0.0, 1.0)
        } else {
            value.max(0.0)
        };
        self.values[slot(param)] = value;
    }

    /// Read a parameter.
    pub fn get(&self, param: EffectParam) -> f32 {
        self.values[slot(param)]
    }

    /// Returns true if the section a mix/balance parameter controls is engaged.
    pub fn is_engaged(&self, param: EffectParam) -> bool {
        is_unit(param) && self.get(param) > 0.0
    }

    /// Every parameter with its current value.
    pub fn iter(&self) -> impl Iterator<Item = (EffectParam, f32)> + '_ {
        EffectParam::ALL.into_iter().zip(self.values.iter().copied())
    }
}

fn slot(param: EffectParam) -> usize {
    param as usize
}

fn is_unit(param: EffectParam) -> bool {
    matches!(
        param,
        EffectParam::FilterResonance
            | EffectParam::FilterMix
            | EffectParam::CrushBalance
            | EffectParam::DelayMix
            | EffectParam::DelayBalance
            | EffectParam::ReverbFeedback
            | EffectParam::ReverbBalance
            | EffectParam::FattenMix
            | EffectParam::MasterVolume
    )
}

// Every effect starts bypassed; the controls wake them up.
fn default_value(param: EffectParam) -> f32 {
    match param {
        EffectParam::FilterCutoff => 12000.0,
        EffectParam::FilterResonance => 0.5,
        EffectParam::LfoAmplitude => 0.0,
        EffectParam::LfoRate => 1.0,
        EffectParam::CrushSampleRate => 16000.0,
        EffectParam::CrushBitDepth => 12.0,
        EffectParam::DelayTime => 0.5,
        EffectParam::DelayMix => 0.5,
        EffectParam::ReverbFeedback => 0.5,
        EffectParam::MasterVolume => 1.0,
        EffectParam::FilterMix
        | EffectParam::CrushBalance
        | EffectParam::DelayBalance
        | EffectParam::ReverbBalance
        | EffectParam::FattenMix => 0.0,
    }
}
