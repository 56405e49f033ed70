//! [`Synth`]: the voice bank and effect rack behind one engine handle.

use keyroute_core::{EngineParam, SynthEngine};

use crate::bank::VoiceBank;
use crate::effects::EffectRack;

/// Engine state driven by the routers.
///
/// Implements [`SynthEngine`] by routing voice and pulse-width writes to
/// the [`VoiceBank`] and everything else to the [`EffectRack`].
///
/// # Example
///
/// ```rust
/// use keyroute_core::{EffectParam, EngineParam, SynthEngine};
/// use keyroute_synth::Synth;
///
/// let mut synth = Synth::new();
/// synth.set_param(EngineParam::PulseWidth(2), 0.3);
/// synth.set_param(EngineParam::Effect(EffectParam::FilterCutoff), 800.0);
///
/// assert_eq!(synth.param(EngineParam::PulseWidth(2)), Some(0.3));
/// assert_eq!(synth.param(EngineParam::Effect(EffectParam::FilterCutoff)), Some(800.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Synth {
    bank: VoiceBank,
    effects: EffectRack,
}

impl Synth {
    /// Create a synth with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// The voice bank.
    pub fn bank(&self) -> &VoiceBank {
        &self.bank
    }

    /// Mutable access to the voice bank.
    pub fn bank_mut(&mut self) -> &mut VoiceBank {
        &mut self.bank
    }

    /// The effect rack.
    pub fn effects(&self) -> &EffectRack {
        &self.effects
    }

    /// Current value of a parameter.
    ///
    /// A voice parameter addressed to every voice reads the sine voice, which
    /// matches the others unless they were written individually. Returns
    /// `None` for pulse oscillators that do not exist.
    pub fn param(&self, param: EngineParam) -> Option<f32> {
        match param {
            EngineParam::Voice { voices, param } => {
                let voice = self
                    .bank
                    .voices()
                    .iter()
                    .find(|v| voices.matches(v.id()))?;
                Some(voice.param(param))
            }
            EngineParam::PulseWidth(n) => self.bank.pulse_width(n),
            EngineParam::Effect(p) => Some(self.effects.get(p)),
        }
    }

    /// Advance voice release timers by `seconds`.
    pub fn advance(&mut self, seconds: f32) {
        self.bank.advance(seconds);
    }
}

impl SynthEngine for Synth {
    fn play_note(&mut self, note: u8, velocity: u8) {
        #[cfg(feature = "tracing")]
        tracing::debug!("synth: play_note {note} vel {velocity}");
        self.bank.play_note(note, velocity);
    }

    fn stop_note(&mut self, note: u8) {
        #[cfg(feature = "tracing")]
        tracing::debug!("synth: stop_note {note}");
        self.bank.stop_note(note);
    }

    fn panic(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("synth: panic");
        self.bank.panic();
    }

    fn set_param(&mut self, param: EngineParam, value: f32) {
        #[cfg(feature = "tracing")]
        tracing::debug!("synth: {param} = {value}");
        match param {
            EngineParam::Voice { voices, param } => self.bank.set_parameter(voices, param, value),
            EngineParam::PulseWidth(n) => self.bank.set_pulse_width(n, value),
            EngineParam::Effect(p) => self.effects.set(p, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyroute_core::{EffectParam, VoiceId, VoiceParam};

    #[test]
    fn test_voice_writes_reach_bank() {
        let mut synth = Synth::new();
        synth.set_param(EngineParam::voice(VoiceId::Fm, VoiceParam::Modulation), 3.0);
        assert_eq!(synth.bank().voice(VoiceId::Fm).modulation(), 3.0);
        assert_eq!(
            synth.param(EngineParam::voice(VoiceId::Fm, VoiceParam::Modulation)),
            Some(3.0)
        );
    }

    #[test]
    fn test_effect_writes_reach_rack() {
        let mut synth = Synth::new();
        synth.set_param(EngineParam::Effect(EffectParam::FattenMix), 1.0);
        assert!(synth.effects().is_engaged(EffectParam::FattenMix));
    }

    #[test]
    fn test_missing_pulse_oscillator_reads_none() {
        let synth = Synth::new();
        assert_eq!(synth.param(EngineParam::PulseWidth(9)), None);
    }

    #[test]
    fn test_notes_and_panic() {
        let mut synth = Synth::new();
        synth.play_note(60, 127);
        synth.play_note(64, 127);
        synth.stop_note(60);
        assert!(synth.bank().voice(VoiceId::Sine).is_held(64));
        assert!(!synth.bank().voice(VoiceId::Sine).is_held(60));

        synth.panic();
        assert!(!synth.bank().is_active());
    }
}
