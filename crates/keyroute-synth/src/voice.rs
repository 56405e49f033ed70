//! A single sound source and the notes it is sounding.
//!
//! Each voice is polyphonic on its own: every note-on adds a
//! [`SoundingNote`], note-off moves it into its release stage, and the note
//! is retired once its release time has elapsed (see [`Voice::advance`]).
//! [`Voice::kill`] drops every note at once, skipping release.

use alloc::vec::Vec;
use keyroute_core::{VoiceId, VoiceParam};

use crate::envelope::EnvelopeSettings;

/// Lifecycle stage of a sounding note.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoteStage {
    /// Key is down; the envelope is in attack, decay, or sustain.
    Held,
    /// Key is up; the note rings out for the remaining seconds.
    Releasing {
        /// Seconds until the note falls silent.
        remaining: f32,
    },
}

/// A note a voice is currently producing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundingNote {
    /// Note number.
    pub note: u8,
    /// Velocity it was triggered with.
    pub velocity: u8,
    /// Where the note is in its lifecycle.
    pub stage: NoteStage,
}

impl SoundingNote {
    /// Returns true while the key is down.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.stage == NoteStage::Held
    }
}

/// One voice in the bank.
///
/// ## Parameters
/// - `volume`: Output level (0.0 to 1.0, default 0.5)
/// - `modulation`: Modulation amount, used as the FM voice's modulating multiplier (0.0 and up, default 1.0)
/// - `envelope`: See [`EnvelopeSettings`]
///
/// # Example
///
/// ```rust
/// use keyroute_core::VoiceId;
/// use keyroute_synth::Voice;
///
/// let mut voice = Voice::new(VoiceId::Sine);
/// voice.note_on(60, 100);
/// assert_eq!(voice.current_note(), Some(60));
///
/// voice.note_off(60);
/// assert!(voice.is_sounding(60)); // still releasing
///
/// voice.advance(1.0);
/// assert!(!voice.is_sounding(60));
/// ```
#[derive(Debug, Clone)]
pub struct Voice {
    id: VoiceId,
    notes: Vec<SoundingNote>,
    envelope: EnvelopeSettings,
    volume: f32,
    modulation: f32,
}

impl Voice {
    /// Create a voice with default settings.
    pub fn new(id: VoiceId) -> Self {
        Self {
            id,
            notes: Vec::new(),
            envelope: EnvelopeSettings::default(),
            volume: 0.5,
            modulation: 1.0,
        }
    }

    /// Which voice this is.
    pub fn id(&self) -> VoiceId {
        self.id
    }

    /// Trigger a note. Retriggering a sounding note restarts it as held.
    pub fn note_on(&mut self, note: u8, velocity: u8) {
        let stage = NoteStage::Held;
        if let Some(existing) = self.notes.iter_mut().find(|n| n.note == note) {
            existing.velocity = velocity;
            existing.stage = stage;
        } else {
            self.notes.push(SoundingNote {
                note,
                velocity,
                stage,
            });
        }
    }

    /// Release a note. Does nothing if the note is not held.
    ///
    /// With a zero release time the note is removed immediately.
    pub fn note_off(&mut self, note: u8) {
        let release = self.envelope.release();
        if release <= 0.0 {
            self.notes.retain(|n| !(n.note == note && n.is_held()));
            return;
        }
        if let Some(held) = self.notes.iter_mut().find(|n| n.note == note && n.is_held()) {
            held.stage = NoteStage::Releasing { remaining: release };
        }
    }

    /// Stop every note immediately, skipping release.
    pub fn kill(&mut self) {
        self.notes.clear();
    }

    /// Advance release timers by `seconds` and retire finished notes.
    pub fn advance(&mut self, seconds: f32) {
        for n in &mut self.notes {
            if let NoteStage::Releasing { remaining } = &mut n.stage {
                *remaining -= seconds;
            }
        }
        self.notes
            .retain(|n| !matches!(n.stage, NoteStage::Releasing { remaining } if remaining <= 0.0));
    }

    /// Returns true if `note` is held or still releasing.
    pub fn is_sounding(&self, note: u8) -> bool {
        self.notes.iter().any(|n| n.note == note)
    }

    /// Returns true if `note` is held.
    pub fn is_held(&self, note: u8) -> bool {
        self.notes.iter().any(|n| n.note == note && n.is_held())
    }

    /// The most recently triggered note that is still held.
    pub fn current_note(&self) -> Option<u8> {
        self.notes.iter().rev().find(|n| n.is_held()).map(|n| n.note)
    }

    /// All sounding notes, oldest first.
    pub fn notes(&self) -> &[SoundingNote] {
        &self.notes
    }

    /// Number of sounding notes (held or releasing).
    pub fn active_note_count(&self) -> usize {
        self.notes.len()
    }

    /// Envelope settings.
    pub fn envelope(&self) -> &EnvelopeSettings {
        &self.envelope
    }

    /// Mutable envelope settings.
    pub fn envelope_mut(&mut self) -> &mut EnvelopeSettings {
        &mut self.envelope
    }

    /// Set output level (0.0 to 1.0).
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Get output level.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set modulation amount.
    pub fn set_modulation(&mut self, amount: f32) {
        self.modulation = amount.max(0.0);
    }

    /// Get modulation amount.
    pub fn modulation(&self) -> f32 {
        self.modulation
    }

    /// Write one voice parameter.
    pub fn set_param(&mut self, param: VoiceParam, value: f32) {
        match param {
            VoiceParam::Volume => self.set_volume(value),
            VoiceParam::Attack => self.envelope.set_attack(value),
            VoiceParam::Decay => self.envelope.set_decay(value),
            VoiceParam::Sustain => self.envelope.set_sustain(value),
            VoiceParam::Release => self.envelope.set_release(value),
            VoiceParam::Modulation => self.set_modulation(value),
        }
    }

    /// Read one voice parameter.
    pub fn param(&self, param: VoiceParam) -> f32 {
        match param {
            VoiceParam::Volume => self.volume,
            VoiceParam::Attack => self.envelope.attack(),
            VoiceParam::Decay => self.envelope.decay(),
            VoiceParam::Sustain => self.envelope.sustain(),
            VoiceParam::Release => self.envelope.release(),
            VoiceParam::Modulation => self.modulation,
        }
    }
}
