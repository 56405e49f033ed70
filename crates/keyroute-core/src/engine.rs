//! The outbound capability: what a synth engine accepts from the routers.
//!
//! Routers never reach for a global engine. They are handed something that
//! implements [`SynthEngine`], which makes every router testable against a
//! [`RecordingEngine`](crate::RecordingEngine).
//!
//! # Parameter Names
//!
//! Every [`EngineParam`] has a stable dotted name used by binding files:
//!
//! | Name | Parameter |
//! |------|-----------|
//! | `voice.<all\|sine\|fm\|noise>.<volume\|attack\|decay\|sustain\|release\|modulation>` | per-voice setting |
//! | `pulse.<1\|2>.width` | pulse oscillator duty cycle |
//! | `filter.cutoff`, `filter.resonance`, `filter.mix`, `filter.lfo_amplitude`, `filter.lfo_rate` | filter section |
//! | `crush.sample_rate`, `crush.bit_depth`, `crush.balance` | bit crusher |
//! | `delay.time`, `delay.mix`, `delay.balance` | delay |
//! | `reverb.feedback`, `reverb.balance` | reverb |
//! | `fatten.mix`, `master.volume` | output stage |

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// Number of pulse oscillators that share the pulse-width control.
pub const PULSE_OSCILLATORS: u8 = 2;

/// The outbound surface of the audio engine.
///
/// Implementations are expected to be cheap and non-blocking; the routers
/// call them synchronously from the event path. Handing parameter writes to
/// a realtime audio thread is the implementation's concern.
pub trait SynthEngine {
    /// Starts `note` on every voice.
    fn play_note(&mut self, note: u8, velocity: u8);

    /// Releases `note` on every voice. Must be a no-op if `note` is not sounding.
    fn stop_note(&mut self, note: u8);

    /// Silences every voice immediately, bypassing release envelopes.
    fn panic(&mut self);

    /// Writes a scaled value to a parameter.
    fn set_param(&mut self, param: EngineParam, value: f32);
}

impl<E: SynthEngine + ?Sized> SynthEngine for &mut E {
    fn play_note(&mut self, note: u8, velocity: u8) {
        (**self).play_note(note, velocity);
    }

    fn stop_note(&mut self, note: u8) {
        (**self).stop_note(note);
    }

    fn panic(&mut self) {
        (**self).panic();
    }

    fn set_param(&mut self, param: EngineParam, value: f32) {
        (**self).set_param(param, value);
    }
}

/// One of the three voices in the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VoiceId {
    /// Sine oscillator voice.
    Sine,
    /// Frequency-modulation voice.
    Fm,
    /// Noise voice.
    Noise,
}

impl VoiceId {
    /// All voices, in bank order.
    pub const ALL: [VoiceId; 3] = [VoiceId::Sine, VoiceId::Fm, VoiceId::Noise];

    /// Position of this voice in the bank.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            VoiceId::Sine => 0,
            VoiceId::Fm => 1,
            VoiceId::Noise => 2,
        }
    }

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            VoiceId::Sine => "sine",
            VoiceId::Fm => "fm",
            VoiceId::Noise => "noise",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        VoiceId::ALL.into_iter().find(|v| v.name() == name)
    }
}

/// Which voices a voice parameter write applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceSelector {
    /// Every voice in the bank.
    All,
    /// A single voice.
    One(VoiceId),
}

impl VoiceSelector {
    /// Returns true if this selector includes `voice`.
    #[inline]
    pub fn matches(self, voice: VoiceId) -> bool {
        match self {
            VoiceSelector::All => true,
            VoiceSelector::One(id) => id == voice,
        }
    }
}

/// Settings every voice carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceParam {
    /// Output level (0.0 to 1.0).
    Volume,
    /// Attack duration in seconds.
    Attack,
    /// Decay duration in seconds.
    Decay,
    /// Sustain level (0.0 to 1.0).
    Sustain,
    /// Release duration in seconds.
    Release,
    /// Modulation amount; the FM voice's modulating multiplier.
    Modulation,
}

impl VoiceParam {
    const ALL: [VoiceParam; 6] = [
        VoiceParam::Volume,
        VoiceParam::Attack,
        VoiceParam::Decay,
        VoiceParam::Sustain,
        VoiceParam::Release,
        VoiceParam::Modulation,
    ];

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            VoiceParam::Volume => "volume",
            VoiceParam::Attack => "attack",
            VoiceParam::Decay => "decay",
            VoiceParam::Sustain => "sustain",
            VoiceParam::Release => "release",
            VoiceParam::Modulation => "modulation",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        VoiceParam::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// Parameters of the filter and effects sections outside the voice bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectParam {
    /// Filter cutoff frequency in Hz.
    FilterCutoff,
    /// Filter resonance (0.0 to 1.0).
    FilterResonance,
    /// Filter wet/dry (0.0 bypassed, 1.0 engaged).
    FilterMix,
    /// Filter LFO depth in Hz.
    LfoAmplitude,
    /// Filter LFO rate in Hz.
    LfoRate,
    /// Bit crusher sample rate in Hz.
    CrushSampleRate,
    /// Bit crusher bit depth.
    CrushBitDepth,
    /// Bit crusher balance (0.0 dry, 1.0 crushed).
    CrushBalance,
    /// Delay time in seconds.
    DelayTime,
    /// Delay feedback mix.
    DelayMix,
    /// Delay balance (0.0 dry, 1.0 wet).
    DelayBalance,
    /// Reverb feedback.
    ReverbFeedback,
    /// Reverb balance (0.0 dry, 1.0 wet).
    ReverbBalance,
    /// Stereo fatten mix.
    FattenMix,
    /// Master output volume.
    MasterVolume,
}

impl EffectParam {
    /// All effect parameters.
    pub const ALL: [EffectParam; 15] = [
        EffectParam::FilterCutoff,
        EffectParam::FilterResonance,
        EffectParam::FilterMix,
        EffectParam::LfoAmplitude,
        EffectParam::LfoRate,
        EffectParam::CrushSampleRate,
        EffectParam::CrushBitDepth,
        EffectParam::CrushBalance,
        EffectParam::DelayTime,
        EffectParam::DelayMix,
        EffectParam::DelayBalance,
        EffectParam::ReverbFeedback,
        EffectParam::ReverbBalance,
        EffectParam::FattenMix,
        EffectParam::MasterVolume,
    ];

    /// Stable dotted name.
    pub const fn name(self) -> &'static str {
        match self {
            EffectParam::FilterCutoff => "filter.cutoff",
            EffectParam::FilterResonance => "filter.resonance",
            EffectParam::FilterMix => "filter.mix",
            EffectParam::LfoAmplitude => "filter.lfo_amplitude",
            EffectParam::LfoRate => "filter.lfo_rate",
            EffectParam::CrushSampleRate => "crush.sample_rate",
            EffectParam::CrushBitDepth => "crush.bit_depth",
            EffectParam::CrushBalance => "crush.balance",
            EffectParam::DelayTime => "delay.time",
            EffectParam::DelayMix => "delay.mix",
            EffectParam::DelayBalance => "delay.balance",
            EffectParam::ReverbFeedback => "reverb.feedback",
            EffectParam::ReverbBalance => "reverb.balance",
            EffectParam::FattenMix => "fatten.mix",
            EffectParam::MasterVolume => "master.volume",
        }
    }
}

/// Any parameter a control binding can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineParam {
    /// A voice setting applied to the selected voices.
    Voice {
        /// Voices the write applies to.
        voices: VoiceSelector,
        /// Setting to write.
        param: VoiceParam,
    },
    /// Duty cycle of pulse oscillator `n` (numbered from 1).
    PulseWidth(u8),
    /// A filter or effects parameter.
    Effect(EffectParam),
}

impl EngineParam {
    /// Shorthand for a voice parameter on every voice.
    pub const fn all_voices(param: VoiceParam) -> Self {
        EngineParam::Voice {
            voices: VoiceSelector::All,
            param,
        }
    }

    /// Shorthand for a voice parameter on one voice.
    pub const fn voice(voice: VoiceId, param: VoiceParam) -> Self {
        EngineParam::Voice {
            voices: VoiceSelector::One(voice),
            param,
        }
    }
}

impl fmt::Display for EngineParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineParam::Voice { voices, param } => {
                let target = match voices {
                    VoiceSelector::All => "all",
                    VoiceSelector::One(id) => id.name(),
                };
                write!(f, "voice.{target}.{}", param.name())
            }
            EngineParam::PulseWidth(n) => write!(f, "pulse.{n}.width"),
            EngineParam::Effect(p) => f.write_str(p.name()),
        }
    }
}

/// Error returned when a parameter name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseParamError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown engine parameter '{}'", self.input)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseParamError {}

impl FromStr for EngineParam {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseParamError {
            input: String::from(s),
        };

        if let Some(effect) = EffectParam::ALL.into_iter().find(|p| p.name() == s) {
            return Ok(EngineParam::Effect(effect));
        }

        let mut parts = s.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("voice"), Some(target), Some(param), None) => {
                let voices = if target == "all" {
                    VoiceSelector::All
                } else {
                    VoiceSelector::One(VoiceId::from_name(target).ok_or_else(err)?)
                };
                let param = VoiceParam::from_name(param).ok_or_else(err)?;
                Ok(EngineParam::Voice { voices, param })
            }
            (Some("pulse"), Some(n), Some("width"), None) => match n.parse::<u8>() {
                Ok(n) if (1..=PULSE_OSCILLATORS).contains(&n) => Ok(EngineParam::PulseWidth(n)),
                _ => Err(err()),
            },
            _ => Err(err()),
        }
    }
}
