//! Keyroute Router - keyboard and control routing to a synth engine
//!
//! Translates input events into calls on an injected
//! [`SynthEngine`](keyroute_core::SynthEngine). Nothing here makes sound or
//! draws widgets; this crate decides *which* notes start and stop and *what*
//! value each parameter receives.
//!
//! # Components
//!
//! - [`KeyRouter`] - Octave offset, mono and hold modes, latched keys
//! - [`ParameterRouter`] - Control identifier → scaled value → one or more parameters
//! - [`Panel`] - Effect switches and waveform selectors
//! - [`Controller`] - Owns the engine and all of the above; handles every [`InboundEvent`]
//!
//! The factory layout lives in [`bindings`]; [`bindings::controls`] names
//! every stock control.
//!
//! # Example
//!
//! ```rust
//! use keyroute_core::{EngineCall, RecordingEngine};
//! use keyroute_router::{Controller, InboundEvent};
//!
//! let mut controller = Controller::new(RecordingEngine::new());
//! controller.handle(InboundEvent::ToggleHoldMode);
//! controller.handle(InboundEvent::KeyPressed(60));
//! controller.handle(InboundEvent::KeyReleased(60));
//! assert_eq!(controller.keys().keys_held(), &[60]);
//!
//! controller.handle(InboundEvent::ToggleHoldMode);
//! assert_eq!(
//!     controller.engine().calls().last(),
//!     Some(&EngineCall::StopNote { note: 60 })
//! );
//! ```

pub mod bindings;
pub mod controller;
pub mod key_router;
pub mod parameter_router;
pub mod switches;

pub use bindings::{DEFAULT_CUTOFF_HZ, factory_bindings, factory_panel};
pub use controller::{ControlEventSink, Controller, InboundEvent, Status};
pub use key_router::{
    DEFAULT_VELOCITY, KeyRouter, KeyState, KeyboardContext, OCTAVE_MAX, OCTAVE_MIN, OctaveChange,
    PressOutcome, ReleaseOutcome,
};
pub use parameter_router::{AppliedChange, ControlBinding, ParamTarget, ParameterRouter};
pub use switches::{LFO_WAVEFORMS, OSCILLATOR_WAVEFORMS, Panel, Selector, Switch, Waveform};
