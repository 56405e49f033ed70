//! Envelope shape carried by every voice.
//!
//! Durations are in seconds and never negative; sustain is a level in
//! `0.0..=1.0`. Out-of-range writes are clamped to the nearest valid value.

/// Attack-decay-sustain-release settings.
///
/// Default values:
/// - Attack: 10ms
/// - Decay: 100ms
/// - Sustain: 0.7
/// - Release: 200ms
///
/// # Example
///
/// ```rust
/// use keyroute_synth::EnvelopeSettings;
///
/// let mut env = EnvelopeSettings::default();
/// env.set_attack(0.5);
/// env.set_sustain(1.4);
/// env.set_release(-1.0);
///
/// assert_eq!(env.attack(), 0.5);
/// assert_eq!(env.sustain(), 1.0);
/// assert_eq!(env.release(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeSettings {
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,
}

impl Default for EnvelopeSettings {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.7,
            release: 0.2,
        }
    }
}

impl EnvelopeSettings {
    /// Set attack time in seconds.
    pub fn set_attack(&mut self, seconds: f32) {
        self.attack = non_negative(seconds);
    }

    /// Get attack time in seconds.
    pub fn attack(&self) -> f32 {
        self.attack
    }

    /// Set decay time in seconds.
    pub fn set_decay(&mut self, seconds: f32) {
        self.decay = non_negative(seconds);
    }

    /// Get decay time in seconds.
    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Set sustain level (0.0 to 1.0).
    pub fn set_sustain(&mut self, level: f32) {
        self.sustain = non_negative(level).min(1.0);
    }

    /// Get sustain level.
    pub fn sustain(&self) -> f32 {
        self.sustain
    }

    /// Set release time in seconds.
    pub fn set_release(&mut self, seconds: f32) {
        self.release = non_negative(seconds);
    }

    /// Get release time in seconds.
    pub fn release(&self) -> f32 {
        self.release
    }
}

#[inline]
fn non_negative(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.max(0.0) }
}
