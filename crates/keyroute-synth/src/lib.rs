//! Keyroute Synth - the voice bank behind the keyboard
//!
//! This crate owns the engine-side state the routers write to. It keeps
//! track of which notes each voice is sounding and what every parameter is
//! set to; it does not render audio. A real audio backend reads this state
//! (or wraps [`Synth`] in its own [`SynthEngine`](keyroute_core::SynthEngine))
//! and does the signal processing.
//!
//! # Core Components
//!
//! ## Voices
//!
//! - [`Voice`] - One sound source with its envelope, volume, and sounding notes
//! - [`EnvelopeSettings`] - Attack/decay/sustain/release shape
//!
//! ## Bank
//!
//! - [`VoiceBank`] - The fixed sine, FM, and noise voices, played in unison
//!
//! ## Effects
//!
//! - [`EffectRack`] - Filter, LFO, bit crusher, delay, reverb, fatten, master
//!
//! ## Engine
//!
//! - [`Synth`] - Voice bank plus effect rack behind one `SynthEngine`
//!
//! # Example
//!
//! ```rust
//! use keyroute_core::{EngineParam, SynthEngine, VoiceId, VoiceParam};
//! use keyroute_synth::Synth;
//!
//! let mut synth = Synth::new();
//! synth.set_param(EngineParam::all_voices(VoiceParam::Attack), 0.25);
//! synth.play_note(60, 127);
//!
//! assert!(synth.bank().voice(VoiceId::Fm).is_sounding(60));
//! assert_eq!(synth.bank().voice(VoiceId::Noise).envelope().attack(), 0.25);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bank;
pub mod effects;
pub mod envelope;
pub mod synth;
pub mod voice;

pub use bank::VoiceBank;
pub use effects::EffectRack;
pub use envelope::EnvelopeSettings;
pub use synth::Synth;
pub use voice::{NoteStage, SoundingNote, Voice};
