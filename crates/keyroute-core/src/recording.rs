//! An engine that records outbound calls instead of producing sound.
//!
//! Used as a test double for the routers and by the CLI's dry-run mode to
//! show exactly what a session would have sent to an audio engine.

use alloc::vec::Vec;
use core::fmt;

use crate::engine::{EngineParam, SynthEngine};

/// A single call made on a [`SynthEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCall {
    /// `play_note(note, velocity)`
    PlayNote {
        /// Note number.
        note: u8,
        /// Velocity (0-127).
        velocity: u8,
    },
    /// `stop_note(note)`
    StopNote {
        /// Note number.
        note: u8,
    },
    /// `panic()`
    Panic,
    /// `set_param(param, value)`
    SetParam {
        /// Target parameter.
        param: EngineParam,
        /// Scaled value.
        value: f32,
    },
}

impl fmt::Display for EngineCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineCall::PlayNote { note, velocity } => write!(f, "play_note {note} {velocity}"),
            EngineCall::StopNote { note } => write!(f, "stop_note {note}"),
            EngineCall::Panic => f.write_str("panic"),
            EngineCall::SetParam { param, value } => write!(f, "set {param} {value:.4}"),
        }
    }
}

/// Records every call in order.
///
/// # Example
///
/// ```rust
/// use keyroute_core::{EngineCall, RecordingEngine, SynthEngine};
///
/// let mut engine = RecordingEngine::new();
/// engine.play_note(64, 100);
/// engine.stop_note(64);
///
/// assert_eq!(engine.stopped_notes().collect::<Vec<_>>(), vec![64]);
/// assert_eq!(engine.take().len(), 2);
/// assert!(engine.calls().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    calls: Vec<EngineCall>,
}

impl RecordingEngine {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far, oldest first.
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Removes and returns all recorded calls.
    pub fn take(&mut self) -> Vec<EngineCall> {
        core::mem::take(&mut self.calls)
    }

    /// Clears the record.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Notes passed to `play_note`, in call order.
    pub fn played_notes(&self) -> impl Iterator<Item = u8> + '_ {
        self.calls.iter().filter_map(|c| match c {
            EngineCall::PlayNote { note, .. } => Some(*note),
            _ => None,
        })
    }

    /// Notes passed to `stop_note`, in call order.
    pub fn stopped_notes(&self) -> impl Iterator<Item = u8> + '_ {
        self.calls.iter().filter_map(|c| match c {
            EngineCall::StopNote { note } => Some(*note),
            _ => None,
        })
    }

    /// Parameter writes, in call order.
    pub fn param_writes(&self) -> impl Iterator<Item = (EngineParam, f32)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            EngineCall::SetParam { param, value } => Some((*param, *value)),
            _ => None,
        })
    }
}

impl SynthEngine for RecordingEngine {
    fn play_note(&mut self, note: u8, velocity: u8) {
        self.calls.push(EngineCall::PlayNote { note, velocity });
    }

    fn stop_note(&mut self, note: u8) {
        self.calls.push(EngineCall::StopNote { note });
    }

    fn panic(&mut self) {
        self.calls.push(EngineCall::Panic);
    }

    fn set_param(&mut self, param: EngineParam, value: f32) {
        self.calls.push(EngineCall::SetParam { param, value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EffectParam;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_records_in_order() {
        let mut engine = RecordingEngine::new();
        engine.play_note(60, 127);
        engine.set_param(EngineParam::Effect(EffectParam::MasterVolume), 0.5);
        engine.panic();

        assert_eq!(
            engine.calls(),
            &[
                EngineCall::PlayNote {
                    note: 60,
                    velocity: 127
                },
                EngineCall::SetParam {
                    param: EngineParam::Effect(EffectParam::MasterVolume),
                    value: 0.5
                },
                EngineCall::Panic,
            ]
        );
    }

    #[test]
    fn test_through_mut_reference() {
        fn drive(mut engine: impl SynthEngine) {
            engine.play_note(1, 2);
        }
        let mut engine = RecordingEngine::new();
        drive(&mut engine);
        assert_eq!(engine.played_notes().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            EngineCall::StopNote { note: 61 }.to_string(),
            "stop_note 61"
        );
        assert_eq!(
            EngineCall::SetParam {
                param: EngineParam::PulseWidth(1),
                value: 0.25
            }
            .to_string(),
            "set pulse.1.width 0.2500"
        );
    }
}
