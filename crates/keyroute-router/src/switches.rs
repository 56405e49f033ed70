//! On/off switches and waveform selectors.
//!
//! A [`Switch`] engages or bypasses a section by writing `1.0` or `0.0` to
//! its target parameter; switches without a target only track their state.
//! A [`Selector`] remembers which waveform segment is chosen.

use std::fmt;

use keyroute_core::{ControlId, EngineParam, SynthEngine};

/// A two-state switch.
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    /// Text used in status messages ("Delay" in "Delay On").
    pub label: &'static str,
    /// Parameter that receives `1.0` when on and `0.0` when off.
    pub target: Option<EngineParam>,
    on: bool,
}

impl Switch {
    /// Creates a switch in the off position.
    pub const fn new(label: &'static str, target: Option<EngineParam>) -> Self {
        Self {
            label,
            target,
            on: false,
        }
    }

    /// Returns true if the switch is on.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Moves the switch and writes its target. Returns the new state.
    pub fn set<E: SynthEngine + ?Sized>(&mut self, on: bool, engine: &mut E) -> bool {
        self.on = on;
        if let Some(param) = self.target {
            engine.set_param(param, if on { 1.0 } else { 0.0 });
        }
        on
    }

    /// Flips the switch. Returns the new state.
    pub fn toggle<E: SynthEngine + ?Sized>(&mut self, engine: &mut E) -> bool {
        self.set(!self.on, engine)
    }
}

/// An oscillator or LFO waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Sine wave.
    Sine,
    /// Triangle wave.
    Triangle,
    /// Rising sawtooth.
    Sawtooth,
    /// Falling sawtooth.
    ReversedSawtooth,
    /// Square wave.
    Square,
}

impl Waveform {
    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
            Waveform::ReversedSawtooth => "reversed_sawtooth",
            Waveform::Square => "square",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Segments offered by the oscillator selectors.
pub const OSCILLATOR_WAVEFORMS: &[Waveform] = &[
    Waveform::Sine,
    Waveform::Triangle,
    Waveform::Sawtooth,
    Waveform::Square,
];

/// Segments offered by the LFO selector.
pub const LFO_WAVEFORMS: &[Waveform] = &[
    Waveform::Sine,
    Waveform::Square,
    Waveform::Sawtooth,
    Waveform::ReversedSawtooth,
];

/// A segmented waveform selector.
///
/// ```rust
/// use keyroute_router::{OSCILLATOR_WAVEFORMS, Selector, Waveform};
///
/// let mut vco = Selector::new("VCO1", OSCILLATOR_WAVEFORMS);
/// assert_eq!(vco.selected(), Waveform::Sine);
/// assert_eq!(vco.select(2), Some(Waveform::Sawtooth));
/// assert_eq!(vco.select(9), None);
/// assert_eq!(vco.selected(), Waveform::Sawtooth);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// Text used in status messages ("VCO1" in "VCO1 Waveform Changed").
    pub label: &'static str,
    choices: &'static [Waveform],
    index: usize,
}

impl Selector {
    /// Creates a selector with the first segment chosen.
    pub const fn new(label: &'static str, choices: &'static [Waveform]) -> Self {
        Self {
            label,
            choices,
            index: 0,
        }
    }

    /// Chooses a segment. Out-of-range indices change nothing and return `None`.
    pub fn select(&mut self, index: usize) -> Option<Waveform> {
        let waveform = *self.choices.get(index)?;
        self.index = index;
        Some(waveform)
    }

    /// Index of the chosen segment.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The chosen waveform.
    pub fn selected(&self) -> Waveform {
        self.choices
            .get(self.index)
            .copied()
            .unwrap_or(Waveform::Sine)
    }

    /// Every segment, in order.
    pub fn choices(&self) -> &'static [Waveform] {
        self.choices
    }
}

/// The switches and selectors of a front panel.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    switches: Vec<(ControlId, Switch)>,
    selectors: Vec<(ControlId, Selector)>,
}

impl Panel {
    /// Creates an empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a switch, replacing any switch with the same identifier.
    pub fn add_switch(&mut self, id: impl Into<ControlId>, switch: Switch) {
        let id = id.into();
        match self.switches.iter_mut().find(|(k, _)| *k == id) {
            Some((_, slot)) => *slot = switch,
            None => self.switches.push((id, switch)),
        }
    }

    /// Adds a selector, replacing any selector with the same identifier.
    pub fn add_selector(&mut self, id: impl Into<ControlId>, selector: Selector) {
        let id = id.into();
        match self.selectors.iter_mut().find(|(k, _)| *k == id) {
            Some((_, slot)) => *slot = selector,
            None => self.selectors.push((id, selector)),
        }
    }

    /// A switch by identifier.
    pub fn switch(&self, id: &str) -> Option<&Switch> {
        self.switches
            .iter()
            .find(|(k, _)| k.as_str() == id)
            .map(|(_, s)| s)
    }

    /// A switch by identifier, mutably.
    pub fn switch_mut(&mut self, id: &str) -> Option<&mut Switch> {
        self.switches
            .iter_mut()
            .find(|(k, _)| k.as_str() == id)
            .map(|(_, s)| s)
    }

    /// A selector by identifier.
    pub fn selector(&self, id: &str) -> Option<&Selector> {
        self.selectors
            .iter()
            .find(|(k, _)| k.as_str() == id)
            .map(|(_, s)| s)
    }

    /// A selector by identifier, mutably.
    pub fn selector_mut(&mut self, id: &str) -> Option<&mut Selector> {
        self.selectors
            .iter_mut()
            .find(|(k, _)| k.as_str() == id)
            .map(|(_, s)| s)
    }

    /// Every switch, in panel order.
    pub fn switches(&self) -> impl Iterator<Item = (&ControlId, &Switch)> {
        self.switches.iter().map(|(k, s)| (k, s))
    }

    /// Every selector, in panel order.
    pub fn selectors(&self) -> impl Iterator<Item = (&ControlId, &Selector)> {
        self.selectors.iter().map(|(k, s)| (k, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyroute_core::{EffectParam, RecordingEngine};

    #[test]
    fn test_switch_writes_target() {
        let mut delay = Switch::new("Delay", Some(EngineParam::Effect(EffectParam::DelayBalance)));
        let mut engine = RecordingEngine::new();

        assert!(delay.toggle(&mut engine));
        assert!(!delay.toggle(&mut engine));
        assert_eq!(
            engine.param_writes().map(|(_, v)| v).collect::<Vec<_>>(),
            [1.0, 0.0]
        );
    }

    #[test]
    fn test_switch_without_target() {
        let mut vco = Switch::new("VCO 1", None);
        let mut engine = RecordingEngine::new();
        vco.set(true, &mut engine);
        assert!(vco.is_on());
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn test_lfo_segments() {
        let mut lfo = Selector::new("LFO", LFO_WAVEFORMS);
        assert_eq!(lfo.select(3), Some(Waveform::ReversedSawtooth));
        assert_eq!(lfo.choices().len(), 4);
    }

    #[test]
    fn test_panel_lookup_and_replace() {
        let mut panel = Panel::new();
        panel.add_switch("filter", Switch::new("Filter", None));
        panel.add_switch("filter", Switch::new("Filter 2", None));
        panel.add_selector("lfo_waveform", Selector::new("LFO", LFO_WAVEFORMS));

        assert_eq!(panel.switches().count(), 1);
        assert_eq!(panel.switch("filter").map(|s| s.label), Some("Filter 2"));
        assert!(panel.selector_mut("lfo_waveform").is_some());
        assert!(panel.switch("lfo_waveform").is_none());
    }
}
