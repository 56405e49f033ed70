//! The fixed voice bank: sine, FM, and noise voices played in unison.
//!
//! Every note-on and note-off fans out to all three voices. Parameter writes
//! go to the voices a [`VoiceSelector`] picks. The two pulse oscillators'
//! duty cycles live here too since they belong to the oscillator section,
//! not to the effects chain.

use keyroute_core::{MAX_NOTE, PULSE_OSCILLATORS, VoiceId, VoiceParam, VoiceSelector};

use crate::voice::Voice;

const DEFAULT_PULSE_WIDTH: f32 = 0.5;

/// Sine, FM, and noise voices plus the pulse oscillators' widths.
///
/// # Example
///
/// ```rust
/// use keyroute_core::{VoiceId, VoiceParam, VoiceSelector};
/// use keyroute_synth::VoiceBank;
///
/// let mut bank = VoiceBank::new();
/// bank.set_parameter(VoiceSelector::One(VoiceId::Fm), VoiceParam::Volume, 0.8);
/// bank.play_note(48, 127);
///
/// assert!(bank.voices().iter().all(|v| v.is_held(48)));
/// assert_eq!(bank.voice(VoiceId::Fm).volume(), 0.8);
/// assert_eq!(bank.voice(VoiceId::Sine).volume(), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct VoiceBank {
    voices: [Voice; 3],
    pulse_widths: [f32; PULSE_OSCILLATORS as usize],
}

impl Default for VoiceBank {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceBank {
    /// Create the bank with default voice settings.
    pub fn new() -> Self {
        Self {
            voices: VoiceId::ALL.map(Voice::new),
            pulse_widths: [DEFAULT_PULSE_WIDTH; PULSE_OSCILLATORS as usize],
        }
    }

    /// Start `note` on every voice.
    ///
    /// Notes above 127 are rejected; nothing is triggered.
    pub fn play_note(&mut self, note: u8, velocity: u8) {
        if note > MAX_NOTE {
            #[cfg(feature = "tracing")]
            tracing::warn!("voice_bank: rejected note {note}");
            return;
        }
        let velocity = velocity.min(127);
        for voice in &mut self.voices {
            voice.note_on(note, velocity);
        }
    }

    /// Release `note` on every voice. No-op for notes that are not held.
    pub fn stop_note(&mut self, note: u8) {
        for voice in &mut self.voices {
            voice.note_off(note);
        }
    }

    /// Silence every voice immediately.
    pub fn panic(&mut self) {
        for voice in &mut self.voices {
            voice.kill();
        }
    }

    /// Apply a voice parameter to the selected voices.
    pub fn set_parameter(&mut self, voices: VoiceSelector, param: VoiceParam, value: f32) {
        for voice in self.voices.iter_mut().filter(|v| voices.matches(v.id())) {
            voice.set_param(param, value);
        }
    }

    /// Set the duty cycle of pulse oscillator `n` (numbered from 1).
    ///
    /// Width is clamped to 0.0..=1.0. Unknown oscillator numbers are ignored.
    pub fn set_pulse_width(&mut self, n: u8, width: f32) {
        if let Some(slot) = pulse_slot(n).and_then(|i| self.pulse_widths.get_mut(i)) {
            *slot = if width.is_nan() { DEFAULT_PULSE_WIDTH } else { width.clamp(0.0, 1.0) };
        }
    }

    /// Duty cycle of pulse oscillator `n` (numbered from 1).
    pub fn pulse_width(&self, n: u8) -> Option<f32> {
        pulse_slot(n).and_then(|i| self.pulse_widths.get(i)).copied()
    }

    /// One voice.
    pub fn voice(&self, id: VoiceId) -> &Voice {
        &self.voices[id.index()]
    }

    /// Mutable access to one voice.
    pub fn voice_mut(&mut self, id: VoiceId) -> &mut Voice {
        &mut self.voices[id.index()]
    }

    /// All voices, in bank order.
    pub fn voices(&self) -> &[Voice; 3] {
        &self.voices
    }

    /// Notes held on every voice, oldest first.
    pub fn held_notes(&self) -> impl Iterator<Item = u8> + '_ {
        self.voices[0]
            .notes()
            .iter()
            .filter(|n| n.is_held())
            .map(|n| n.note)
    }

    /// Returns true if any voice is producing sound.
    pub fn is_active(&self) -> bool {
        self.voices.iter().any(|v| v.active_note_count() > 0)
    }

    /// Advance release timers on every voice.
    pub fn advance(&mut self, seconds: f32) {
        for voice in &mut self.voices {
            voice.advance(seconds);
        }
    }
}

#[inline]
fn pulse_slot(n: u8) -> Option<usize> {
    (1..=PULSE_OSCILLATORS)
        .contains(&n)
        .then(|| usize::from(n - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_play_note_is_unison() {
        let mut bank = VoiceBank::new();
        bank.play_note(60, 100);
        for id in VoiceId::ALL {
            assert!(bank.voice(id).is_held(60), "{}", id.name());
        }
    }

    #[test]
    fn test_out_of_range_note_rejected() {
        let mut bank = VoiceBank::new();
        bank.play_note(128, 100);
        bank.play_note(255, 100);
        assert!(!bank.is_active());
    }

    #[test]
    fn test_stop_note_idempotent() {
        let mut bank = VoiceBank::new();
        bank.stop_note(60);
        assert!(!bank.is_active());

        bank.play_note(60, 100);
        bank.stop_note(60);
        bank.stop_note(60);
        assert_eq!(bank.held_notes().count(), 0);
        assert!(bank.is_active(), "release still ringing");
    }

    #[test]
    fn test_panic_bypasses_release() {
        let mut bank = VoiceBank::new();
        bank.play_note(60, 100);
        bank.play_note(64, 100);
        bank.stop_note(64);
        bank.panic();
        assert!(!bank.is_active());
    }

    #[test]
    fn test_set_parameter_all_voices() {
        let mut bank = VoiceBank::new();
        bank.set_parameter(VoiceSelector::All, VoiceParam::Attack, 1.5);
        for voice in bank.voices() {
            assert_eq!(voice.envelope().attack(), 1.5);
        }
    }

    #[test]
    fn test_set_parameter_single_voice() {
        let mut bank = VoiceBank::new();
        bank.set_parameter(VoiceSelector::One(VoiceId::Noise), VoiceParam::Volume, 0.1);
        assert_eq!(bank.voice(VoiceId::Noise).volume(), 0.1);
        assert_eq!(bank.voice(VoiceId::Fm).volume(), 0.5);
    }

    #[test]
    fn test_pulse_widths() {
        let mut bank = VoiceBank::new();
        bank.set_pulse_width(1, 0.2);
        bank.set_pulse_width(2, 1.7);
        bank.set_pulse_width(3, 0.9);
        assert_eq!(bank.pulse_width(1), Some(0.2));
        assert_eq!(bank.pulse_width(2), Some(1.0));
        assert_eq!(bank.pulse_width(0), None);
        assert_eq!(bank.pulse_width(3), None);
    }

    #[test]
    fn test_held_notes_in_order() {
        let mut bank = VoiceBank::new();
        bank.play_note(67, 100);
        bank.play_note(60, 100);
        assert_eq!(bank.held_notes().collect::<Vec<_>>(), [67, 60]);
    }

    #[test]
    fn test_advance_retires_releases() {
        let mut bank = VoiceBank::new();
        bank.set_parameter(VoiceSelector::All, VoiceParam::Release, 0.5);
        bank.play_note(60, 100);
        bank.stop_note(60);
        bank.advance(0.25);
        assert!(bank.is_active());
        bank.advance(0.25);
        assert!(!bank.is_active());
    }
}
