//! The factory control layout.
//!
//! Every knob, slider, switch, and selector on the stock front panel, keyed
//! by stable symbolic identifiers in [`controls`].
//!
//! # Knobs and Sliders
//!
//! | Id | Range | Writes |
//! |----|-------|--------|
//! | `osc1_semitones`, `osc2_semitones` | stepped −24…24 | display only |
//! | `osc2_detune`, `sub_mix` | 0…1 | display only |
//! | `osc_mix` | 0…1 | sine volume |
//! | `fm_mix` | 0…1 | FM volume |
//! | `fm_mod` | 0…1 | FM modulation |
//! | `noise_mix` | 0…1 | noise volume |
//! | `pwm` | 0…1 | pulse width 1 and 2 |
//! | `lfo_amount` | 0…1000 | filter LFO amplitude |
//! | `lfo_rate` | 0…5 | filter LFO rate |
//! | `cutoff` | log 30…7000, ×4 | filter cutoff |
//! | `resonance` | 0…1 | filter resonance |
//! | `crush_amount` | 1…0 | crusher sample rate ×16000, bit depth ×12 |
//! | `delay_time`, `delay_mix` | 0…1 | delay time, delay mix |
//! | `reverb_amount`, `reverb_mix` | 0…1 | reverb feedback, reverb balance |
//! | `master_volume` | 0…1 | master volume |
//! | `attack`, `decay`, `sustain`, `release` | 0…1 | envelope on every voice |

use keyroute_core::{
    ControlId, ControlType, EffectParam, EngineParam, ScaleRange, VoiceId, VoiceParam,
};

use crate::parameter_router::ControlBinding;
use crate::switches::{LFO_WAVEFORMS, OSCILLATOR_WAVEFORMS, Panel, Selector, Switch};

/// Identifiers of the factory controls.
pub mod controls {
    use keyroute_core::ControlId;

    /// Oscillator 1 coarse tuning.
    pub const OSC1_SEMITONES: ControlId = ControlId::from_static("osc1_semitones");
    /// Oscillator 2 coarse tuning.
    pub const OSC2_SEMITONES: ControlId = ControlId::from_static("osc2_semitones");
    /// Oscillator 2 fine tuning.
    pub const OSC2_DETUNE: ControlId = ControlId::from_static("osc2_detune");
    /// Sine voice level.
    pub const OSC_MIX: ControlId = ControlId::from_static("osc_mix");
    /// Sub oscillator level.
    pub const SUB_MIX: ControlId = ControlId::from_static("sub_mix");
    /// FM voice level.
    pub const FM_MIX: ControlId = ControlId::from_static("fm_mix");
    /// FM modulation amount.
    pub const FM_MOD: ControlId = ControlId::from_static("fm_mod");
    /// Noise voice level.
    pub const NOISE_MIX: ControlId = ControlId::from_static("noise_mix");
    /// Pulse width of both pulse oscillators.
    pub const PWM: ControlId = ControlId::from_static("pwm");
    /// Filter LFO depth.
    pub const LFO_AMOUNT: ControlId = ControlId::from_static("lfo_amount");
    /// Filter LFO speed.
    pub const LFO_RATE: ControlId = ControlId::from_static("lfo_rate");
    /// Filter cutoff.
    pub const CUTOFF: ControlId = ControlId::from_static("cutoff");
    /// Filter resonance.
    pub const RESONANCE: ControlId = ControlId::from_static("resonance");
    /// Bit crusher amount.
    pub const CRUSH_AMOUNT: ControlId = ControlId::from_static("crush_amount");
    /// Delay time.
    pub const DELAY_TIME: ControlId = ControlId::from_static("delay_time");
    /// Delay feedback mix.
    pub const DELAY_MIX: ControlId = ControlId::from_static("delay_mix");
    /// Reverb feedback.
    pub const REVERB_AMOUNT: ControlId = ControlId::from_static("reverb_amount");
    /// Reverb balance.
    pub const REVERB_MIX: ControlId = ControlId::from_static("reverb_mix");
    /// Master output level.
    pub const MASTER_VOLUME: ControlId = ControlId::from_static("master_volume");
    /// Envelope attack slider.
    pub const ATTACK: ControlId = ControlId::from_static("attack");
    /// Envelope decay slider.
    pub const DECAY: ControlId = ControlId::from_static("decay");
    /// Envelope sustain slider.
    pub const SUSTAIN: ControlId = ControlId::from_static("sustain");
    /// Envelope release slider.
    pub const RELEASE: ControlId = ControlId::from_static("release");

    /// Bit crusher switch.
    pub const BITCRUSH: ControlId = ControlId::from_static("bitcrush");
    /// Filter switch.
    pub const FILTER: ControlId = ControlId::from_static("filter");
    /// Delay switch.
    pub const DELAY: ControlId = ControlId::from_static("delay");
    /// Reverb switch.
    pub const REVERB: ControlId = ControlId::from_static("reverb");
    /// Stereo fatten switch.
    pub const STEREO_FATTEN: ControlId = ControlId::from_static("stereo_fatten");
    /// Oscillator 1 switch.
    pub const VCO1: ControlId = ControlId::from_static("vco1");
    /// Oscillator 2 switch.
    pub const VCO2: ControlId = ControlId::from_static("vco2");

    /// Oscillator 1 waveform selector.
    pub const VCO1_WAVEFORM: ControlId = ControlId::from_static("vco1_waveform");
    /// Oscillator 2 waveform selector.
    pub const VCO2_WAVEFORM: ControlId = ControlId::from_static("vco2_waveform");
    /// LFO waveform selector.
    pub const LFO_WAVEFORM: ControlId = ControlId::from_static("lfo_waveform");
}

/// Cutoff frequency the panel starts at, before the ×4 post-scale.
pub const DEFAULT_CUTOFF_HZ: f32 = 3000.0;

const CUTOFF_RANGE: ScaleRange = ScaleRange::logarithmic(30.0, 7000.0);
const SEMITONES_RANGE: ScaleRange = ScaleRange::stepped(-24.0, 24.0);

fn effect(p: EffectParam) -> EngineParam {
    EngineParam::Effect(p)
}

fn unit(label: &'static str) -> ControlBinding {
    ControlBinding::new(label, ScaleRange::UNIT)
}

/// The factory knob and slider bindings, in panel order.
pub fn factory_bindings() -> Vec<(ControlId, ControlBinding)> {
    use controls::{
        ATTACK, CRUSH_AMOUNT, CUTOFF, DECAY, DELAY_MIX, DELAY_TIME, FM_MIX, FM_MOD, LFO_AMOUNT,
        LFO_RATE, MASTER_VOLUME, NOISE_MIX, OSC_MIX, OSC1_SEMITONES, OSC2_DETUNE, OSC2_SEMITONES,
        PWM, RELEASE, RESONANCE, REVERB_AMOUNT, REVERB_MIX, SUB_MIX, SUSTAIN,
    };

    let slider = |label: &'static str, param: VoiceParam, default: f32| {
        unit(label)
            .with_kind(ControlType::Slider)
            .with_target(EngineParam::all_voices(param))
            .with_default(default)
    };

    vec![
        (
            OSC1_SEMITONES,
            ControlBinding::new("Semitones", SEMITONES_RANGE).with_default(0.5),
        ),
        (
            OSC2_SEMITONES,
            ControlBinding::new("Semitones", SEMITONES_RANGE).with_default(0.5),
        ),
        (OSC2_DETUNE, unit("Detune")),
        (
            OSC_MIX,
            unit("OscMix")
                .with_target(EngineParam::voice(VoiceId::Sine, VoiceParam::Volume))
                .with_default(0.5),
        ),
        (SUB_MIX, unit("Sub Osc")),
        (
            FM_MIX,
            unit("FM Amt")
                .with_target(EngineParam::voice(VoiceId::Fm, VoiceParam::Volume))
                .with_default(0.5),
        ),
        (
            FM_MOD,
            unit("FM Mod")
                .with_target(EngineParam::voice(VoiceId::Fm, VoiceParam::Modulation))
                .with_default(1.0),
        ),
        (
            NOISE_MIX,
            unit("Noise Amt")
                .with_target(EngineParam::voice(VoiceId::Noise, VoiceParam::Volume))
                .with_default(0.5),
        ),
        (
            PWM,
            unit("Pulse Width")
                .with_target(EngineParam::PulseWidth(1))
                .with_target(EngineParam::PulseWidth(2))
                .with_default(0.5),
        ),
        (
            LFO_AMOUNT,
            ControlBinding::new("LFO Amp", ScaleRange::linear(0.0, 1000.0))
                .with_target(effect(EffectParam::LfoAmplitude)),
        ),
        (
            LFO_RATE,
            ControlBinding::new("LFO Rate", ScaleRange::linear(0.0, 5.0))
                .with_target(effect(EffectParam::LfoRate))
                .with_default(0.2),
        ),
        (
            CUTOFF,
            ControlBinding::new("Cutoff", CUTOFF_RANGE)
                .with_post_scale(4.0)
                .with_target(effect(EffectParam::FilterCutoff))
                .with_default(CUTOFF_RANGE.normalize(DEFAULT_CUTOFF_HZ)),
        ),
        (
            RESONANCE,
            unit("Rez")
                .with_target(effect(EffectParam::FilterResonance))
                .with_default(0.5),
        ),
        (
            CRUSH_AMOUNT,
            ControlBinding::new("Bitcrush", ScaleRange::linear(1.0, 0.0))
                .with_scaled_target(effect(EffectParam::CrushSampleRate), 16000.0)
                .with_scaled_target(effect(EffectParam::CrushBitDepth), 12.0),
        ),
        (
            DELAY_TIME,
            unit("Delay Time")
                .with_target(effect(EffectParam::DelayTime))
                .with_default(0.5),
        ),
        (
            DELAY_MIX,
            unit("Delay Mix")
                .with_target(effect(EffectParam::DelayMix))
                .with_default(0.5),
        ),
        (
            REVERB_AMOUNT,
            unit("Reverb Amt")
                .with_target(effect(EffectParam::ReverbFeedback))
                .with_default(0.5),
        ),
        // Shares its target with the reverb switch; starts at zero so the
        // reverb is bypassed until switched on.
        (
            REVERB_MIX,
            unit("Reverb Mix").with_target(effect(EffectParam::ReverbBalance)),
        ),
        (
            MASTER_VOLUME,
            unit("Master Vol")
                .with_target(effect(EffectParam::MasterVolume))
                .with_default(1.0),
        ),
        (ATTACK, slider("Attack", VoiceParam::Attack, 0.01)),
        (DECAY, slider("Decay", VoiceParam::Decay, 0.1)),
        (SUSTAIN, slider("Sustain", VoiceParam::Sustain, 0.7)),
        (RELEASE, slider("Release", VoiceParam::Release, 0.2)),
    ]
}

/// The factory switches and waveform selectors.
pub fn factory_panel() -> Panel {
    use controls::{
        BITCRUSH, DELAY, FILTER, LFO_WAVEFORM, REVERB, STEREO_FATTEN, VCO1, VCO1_WAVEFORM, VCO2,
        VCO2_WAVEFORM,
    };

    let mut panel = Panel::new();
    panel.add_switch(
        BITCRUSH,
        Switch::new("Bitcrush", Some(effect(EffectParam::CrushBalance))),
    );
    panel.add_switch(
        FILTER,
        Switch::new("Filter", Some(effect(EffectParam::FilterMix))),
    );
    panel.add_switch(
        DELAY,
        Switch::new("Delay", Some(effect(EffectParam::DelayBalance))),
    );
    panel.add_switch(
        REVERB,
        Switch::new("Reverb", Some(effect(EffectParam::ReverbBalance))),
    );
    panel.add_switch(
        STEREO_FATTEN,
        Switch::new("Stereo Fatten", Some(effect(EffectParam::FattenMix))),
    );
    panel.add_switch(VCO1, Switch::new("VCO 1", None));
    panel.add_switch(VCO2, Switch::new("VCO 2", None));

    panel.add_selector(VCO1_WAVEFORM, Selector::new("VCO1", OSCILLATOR_WAVEFORMS));
    panel.add_selector(VCO2_WAVEFORM, Selector::new("VCO2", OSCILLATOR_WAVEFORMS));
    panel.add_selector(LFO_WAVEFORM, Selector::new("LFO", LFO_WAVEFORMS));
    panel
}
