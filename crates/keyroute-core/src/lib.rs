//! Keyroute Core - shared vocabulary for the keyroute control layer
//!
//! This crate defines the types every other keyroute crate speaks: where a
//! control event comes from, how a raw control position becomes a parameter
//! value, and what a synth engine must accept from the routers.
//!
//! # Core Abstractions
//!
//! ## Controls
//!
//! - [`ControlId`] - Stable symbolic identifier for a knob, slider, switch, or selector
//! - [`ControlType`] - The physical/virtual shape of a control
//!
//! ## Scaling
//!
//! - [`ParamScale`] - Curve used to map a normalized position to a value
//! - [`ScaleRange`] - A `(min, max, curve)` triple with `denormalize`/`normalize`
//!
//! ## Engine Capability
//!
//! - [`SynthEngine`] - The outbound surface: note on/off, panic, parameter writes
//! - [`EngineParam`] - Every parameter a binding can target
//! - [`RecordingEngine`] - An engine that records calls instead of making sound
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! keyroute-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use keyroute_core::{ScaleRange, SynthEngine, RecordingEngine, EngineCall};
//!
//! let cutoff = ScaleRange::logarithmic(30.0, 7000.0);
//! assert!((cutoff.denormalize(1.0) - 7000.0).abs() < 0.5);
//!
//! let mut engine = RecordingEngine::new();
//! engine.play_note(60, 127);
//! assert_eq!(engine.calls(), &[EngineCall::PlayNote { note: 60, velocity: 127 }]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod control;
pub mod engine;
pub mod note;
pub mod recording;
pub mod scale;

pub use control::{ControlId, ControlType};
pub use engine::{
    EffectParam, EngineParam, PULSE_OSCILLATORS, ParseParamError, SynthEngine, VoiceId,
    VoiceParam, VoiceSelector,
};
pub use note::{MAX_NOTE, NOTES_PER_OCTAVE, is_black_key, key_note};
pub use recording::{EngineCall, RecordingEngine};
pub use scale::{ParamScale, ScaleRange};
