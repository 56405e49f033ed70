//! The event front door: one owner for the engine and both routers.
//!
//! [`Controller`] holds an injected [`SynthEngine`], a [`KeyRouter`], a
//! [`ParameterRouter`], and the switch/selector [`Panel`]. Every inbound
//! event is handled to completion before the next one, and each handled
//! event reports the status lines it produced, in order. The last line is
//! what a status display should show.

use std::fmt;

use keyroute_core::{ControlId, SynthEngine};

use crate::bindings::{factory_bindings, factory_panel};
use crate::key_router::{KeyRouter, OctaveChange, ReleaseOutcome};
use crate::parameter_router::{AppliedChange, ParameterRouter};
use crate::switches::Panel;

/// Receives control value changes from any widget.
///
/// Knobs, sliders, switches, and selectors all report through this one
/// method; the receiver decides what the identifier means.
pub trait ControlEventSink {
    /// A control moved to `value`.
    fn on_value_changed(&mut self, control: &ControlId, value: f32);
}

/// An event from the input layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A key went down.
    KeyPressed(u8),
    /// A key came up.
    KeyReleased(u8),
    /// Octave up button.
    OctaveUp,
    /// Octave down button.
    OctaveDown,
    /// Hold button.
    ToggleHoldMode,
    /// Mono button.
    ToggleMonoMode,
    /// A knob, slider, switch, or selector reported a value.
    ControlChanged {
        /// Control that changed.
        control: ControlId,
        /// Raw value: position for knobs and sliders, 0/1 for switches,
        /// segment index for selectors.
        value: f32,
    },
    /// A switch was tapped.
    Toggle(ControlId),
    /// A selector segment was tapped.
    SegmentSelected {
        /// Selector that changed.
        control: ControlId,
        /// Segment index.
        index: usize,
    },
    /// Panic button.
    PanicPressed,
}

/// A status line produced while handling an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// A key started the contained note.
    KeyPressed(u8),
    /// A key was turned off.
    KeyReleased,
    /// Latched keys were released.
    KeysReleased,
    /// Hold mode changed.
    HoldMode(bool),
    /// Mono mode changed.
    MonoMode(bool),
    /// Octave moved up.
    OctaveUp,
    /// Octave moved down.
    OctaveDown,
    /// Panic.
    AllNotesOff,
    /// A knob or slider applied a value.
    Control(AppliedChange),
    /// A switch moved.
    Switch {
        /// Switch label.
        label: &'static str,
        /// New state.
        on: bool,
    },
    /// A selector changed segment.
    WaveformChanged {
        /// Selector label.
        label: &'static str,
    },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::KeyPressed(note) => write!(f, "Key Pressed: {note}"),
            Status::KeyReleased => f.write_str("Key Released"),
            Status::KeysReleased => f.write_str("Key(s) Released"),
            Status::HoldMode(on) => write!(f, "Hold Mode {}", on_off(*on)),
            Status::MonoMode(on) => write!(f, "Mono Mode {}", on_off(*on)),
            Status::OctaveUp => f.write_str("Keyboard Octave Up"),
            Status::OctaveDown => f.write_str("Keyboard Octave Down"),
            Status::AllNotesOff => f.write_str("All Notes Off"),
            Status::Control(change) => fmt::Display::fmt(change, f),
            Status::Switch { label, on } => write!(f, "{label} {}", on_off(*on)),
            Status::WaveformChanged { label } => write!(f, "{label} Waveform Changed"),
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "On" } else { "Off" }
}

/// Routes every inbound event to an injected engine.
///
/// # Example
///
/// ```rust
/// use keyroute_core::RecordingEngine;
/// use keyroute_router::{Controller, InboundEvent};
///
/// let mut controller = Controller::new(RecordingEngine::new());
///
/// let lines = controller.handle(InboundEvent::KeyPressed(60));
/// assert_eq!(lines[0].to_string(), "Key Pressed: 60");
///
/// controller.handle(InboundEvent::ControlChanged { control: "cutoff".into(), value: 0.0 });
/// assert_eq!(controller.status().unwrap().to_string(), "Cutoff: 120.00");
/// ```
#[derive(Debug)]
pub struct Controller<E: SynthEngine> {
    engine: E,
    keys: KeyRouter,
    params: ParameterRouter,
    panel: Panel,
    status: Option<Status>,
}

impl<E: SynthEngine> Controller<E> {
    /// Creates a controller with the factory layout.
    pub fn new(engine: E) -> Self {
        Self::with_layout(
            engine,
            ParameterRouter::with_bindings(factory_bindings()),
            factory_panel(),
        )
    }

    /// Creates a controller with custom bindings and panel.
    pub fn with_layout(engine: E, params: ParameterRouter, panel: Panel) -> Self {
        Self {
            engine,
            keys: KeyRouter::new(),
            params,
            panel,
            status: None,
        }
    }

    /// Pushes every binding's default position to the engine.
    ///
    /// Returns the number of controls applied.
    pub fn apply_defaults(&mut self) -> usize {
        let applied = self.params.apply_defaults(&mut self.engine);
        tracing::info!("controller: applied {applied} default control values");
        applied
    }

    /// Handles one event and returns the status lines it produced.
    pub fn handle(&mut self, event: InboundEvent) -> Vec<Status> {
        let mut lines = Vec::new();
        match event {
            InboundEvent::KeyPressed(key) => {
                let outcome = self.keys.key_pressed(key, &mut self.engine);
                if outcome.cut.is_some() {
                    lines.push(Status::KeyReleased);
                }
                if let Some(note) = outcome.note {
                    lines.push(Status::KeyPressed(note));
                }
            }
            InboundEvent::KeyReleased(key) => {
                if let ReleaseOutcome::Stopped(_) = self.keys.key_released(key, &mut self.engine) {
                    lines.push(Status::KeyReleased);
                }
            }
            InboundEvent::OctaveUp => {
                if let OctaveChange::Moved(_) = self.keys.octave_up() {
                    lines.push(Status::OctaveUp);
                }
            }
            InboundEvent::OctaveDown => {
                if let OctaveChange::Moved(_) = self.keys.octave_down() {
                    lines.push(Status::OctaveDown);
                }
            }
            InboundEvent::ToggleHoldMode => {
                let on = self.keys.toggle_hold_mode(&mut self.engine);
                lines.push(Status::HoldMode(on));
                if !on {
                    lines.push(Status::KeysReleased);
                }
            }
            InboundEvent::ToggleMonoMode => {
                let on = self.keys.toggle_mono_mode(&mut self.engine);
                lines.push(Status::MonoMode(on));
                if on {
                    lines.push(Status::KeysReleased);
                }
            }
            InboundEvent::ControlChanged { control, value } => {
                lines.extend(self.control_changed(&control, value));
            }
            InboundEvent::Toggle(control) => {
                if let Some(switch) = self.panel.switch_mut(control.as_str()) {
                    let on = switch.toggle(&mut self.engine);
                    tracing::info!("controller: {control} {}", if on { "on" } else { "off" });
                    lines.push(Status::Switch {
                        label: switch.label,
                        on,
                    });
                } else {
                    tracing::warn!("controller: no switch '{control}'");
                }
            }
            InboundEvent::SegmentSelected { control, index } => {
                lines.extend(self.select(&control, index));
            }
            InboundEvent::PanicPressed => {
                self.keys.panic(&mut self.engine);
                lines.push(Status::AllNotesOff);
            }
        }
        if let Some(last) = lines.last() {
            self.status = Some(last.clone());
        }
        lines
    }

    fn control_changed(&mut self, control: &ControlId, value: f32) -> Option<Status> {
        if let Some(switch) = self.panel.switch_mut(control.as_str()) {
            let on = switch.set(value >= 0.5, &mut self.engine);
            return Some(Status::Switch {
                label: switch.label,
                on,
            });
        }
        if self.panel.selector(control.as_str()).is_some() {
            if value.is_nan() || value < 0.0 {
                tracing::warn!("controller: segment {value} rejected for '{control}'");
                return None;
            }
            return self.select(control, value.round() as usize);
        }
        self.params
            .update(control.as_str(), value, &mut self.engine)
            .map(Status::Control)
    }

    fn select(&mut self, control: &ControlId, index: usize) -> Option<Status> {
        let Some(selector) = self.panel.selector_mut(control.as_str()) else {
            tracing::warn!("controller: no selector '{control}'");
            return None;
        };
        match selector.select(index) {
            Some(waveform) => {
                tracing::debug!("controller: {control} -> {waveform}");
                Some(Status::WaveformChanged {
                    label: selector.label,
                })
            }
            None => {
                tracing::warn!("controller: segment {index} out of range for '{control}'");
                None
            }
        }
    }

    /// The last status line produced.
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// The engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Consumes the controller and returns the engine.
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Keyboard state.
    pub fn keys(&self) -> &KeyRouter {
        &self.keys
    }

    /// Mutable keyboard state, for settings such as velocity.
    pub fn keys_mut(&mut self) -> &mut KeyRouter {
        &mut self.keys
    }

    /// Control bindings.
    pub fn params(&self) -> &ParameterRouter {
        &self.params
    }

    /// Mutable control bindings.
    pub fn params_mut(&mut self) -> &mut ParameterRouter {
        &mut self.params
    }

    /// Switches and selectors.
    pub fn panel(&self) -> &Panel {
        &self.panel
    }
}

impl<E: SynthEngine> ControlEventSink for Controller<E> {
    fn on_value_changed(&mut self, control: &ControlId, value: f32) {
        self.handle(InboundEvent::ControlChanged {
            control: control.clone(),
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::controls;
    use keyroute_core::{EffectParam, EngineCall, EngineParam, RecordingEngine};

    fn controller() -> Controller<RecordingEngine> {
        Controller::new(RecordingEngine::new())
    }

    fn texts(lines: &[Status]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_key_status_lines() {
        let mut c = controller();
        c.handle(InboundEvent::ToggleMonoMode);
        c.handle(InboundEvent::KeyPressed(60));
        let lines = c.handle(InboundEvent::KeyPressed(62));
        assert_eq!(texts(&lines), ["Key Released", "Key Pressed: 62"]);

        let lines = c.handle(InboundEvent::KeyReleased(62));
        assert_eq!(texts(&lines), ["Key Released"]);

        // The last key is already off, so nothing is reported as cut.
        let lines = c.handle(InboundEvent::KeyPressed(64));
        assert_eq!(texts(&lines), ["Key Pressed: 64"]);
    }

    #[test]
    fn test_hold_release_is_silent() {
        let mut c = controller();
        c.handle(InboundEvent::ToggleHoldMode);
        c.handle(InboundEvent::KeyPressed(60));
        assert!(c.handle(InboundEvent::KeyReleased(60)).is_empty());
        assert_eq!(c.status().map(ToString::to_string).as_deref(), Some("Key Pressed: 60"));

        let lines = c.handle(InboundEvent::ToggleHoldMode);
        assert_eq!(texts(&lines), ["Hold Mode Off", "Key(s) Released"]);
    }

    #[test]
    fn test_rejected_octave_has_no_status() {
        let mut c = controller();
        for _ in 0..3 {
            assert_eq!(texts(&c.handle(InboundEvent::OctaveUp)), ["Keyboard Octave Up"]);
        }
        assert!(c.handle(InboundEvent::OctaveUp).is_empty());
        assert_eq!(c.keys().octave(), 3);
    }

    #[test]
    fn test_control_changed_routes_to_params() {
        let mut c = controller();
        let lines = c.handle(InboundEvent::ControlChanged {
            control: controls::CUTOFF,
            value: 0.0,
        });
        assert_eq!(texts(&lines), ["Cutoff: 120.00"]);
        assert_eq!(
            c.engine().param_writes().next().map(|(p, _)| p),
            Some(EngineParam::Effect(EffectParam::FilterCutoff))
        );
    }

    #[test]
    fn test_unknown_control_changes_nothing() {
        let mut c = controller();
        assert!(
            c.handle(InboundEvent::ControlChanged {
                control: ControlId::from("wah"),
                value: 0.4,
            })
            .is_empty()
        );
        assert!(c.engine().calls().is_empty());
    }

    #[test]
    fn test_switch_via_toggle_and_value() {
        let mut c = controller();
        let lines = c.handle(InboundEvent::Toggle(controls::DELAY));
        assert_eq!(texts(&lines), ["Delay On"]);

        c.on_value_changed(&controls::DELAY, 0.0);
        assert_eq!(c.status().map(ToString::to_string).as_deref(), Some("Delay Off"));
        assert_eq!(
            c.engine().param_writes().map(|(_, v)| v).collect::<Vec<_>>(),
            [1.0, 0.0]
        );
    }

    #[test]
    fn test_selector_events() {
        let mut c = controller();
        let lines = c.handle(InboundEvent::SegmentSelected {
            control: controls::VCO1_WAVEFORM,
            index: 3,
        });
        assert_eq!(texts(&lines), ["VCO1 Waveform Changed"]);

        assert!(
            c.handle(InboundEvent::SegmentSelected {
                control: controls::LFO_WAVEFORM,
                index: 4,
            })
            .is_empty()
        );
        c.on_value_changed(&controls::LFO_WAVEFORM, 1.0);
        assert_eq!(
            c.panel().selector("lfo_waveform").map(|s| s.index()),
            Some(1)
        );
        c.on_value_changed(&controls::LFO_WAVEFORM, -1.0);
        assert_eq!(
            c.panel().selector("lfo_waveform").map(|s| s.index()),
            Some(1)
        );
    }

    #[test]
    fn test_panic() {
        let mut c = controller();
        c.handle(InboundEvent::KeyPressed(60));
        let lines = c.handle(InboundEvent::PanicPressed);
        assert_eq!(texts(&lines), ["All Notes Off"]);
        assert_eq!(c.engine().calls().last(), Some(&EngineCall::Panic));
    }

    #[test]
    fn test_apply_defaults_covers_factory_table() {
        let mut c = controller();
        assert_eq!(c.apply_defaults(), c.params().len());
        assert!(c.engine().param_writes().count() > 0);
    }
}
