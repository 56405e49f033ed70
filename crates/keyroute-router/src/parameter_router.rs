//! Control-to-parameter routing with scaling and fan-out.
//!
//! [`ParameterRouter`] maps a [`ControlId`] to a [`ControlBinding`]: a
//! scaling curve, an optional post-scale factor, and any number of engine
//! parameters to write. One control can drive several parameters (pulse
//! width drives both pulse oscillators; each envelope slider drives all
//! three voices), and a binding with no targets is display-only.
//!
//! ```text
//! raw (0..1) ──clamp──▶ range.denormalize ──× post_scale──▶ value ──× multiplier──▶ set_param
//! ```
//!
//! Unknown identifiers are no-ops: nothing is written and a warning is
//! logged, since an unbound control means the binding table is incomplete.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use keyroute_core::{ControlId, ControlType, EngineParam, ParamScale, ScaleRange, SynthEngine};

/// One parameter written by a binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamTarget {
    /// Parameter to write.
    pub param: EngineParam,
    /// Factor applied to the binding's value for this target.
    pub multiplier: f32,
}

impl ParamTarget {
    /// Target that receives the binding's value unchanged.
    pub const fn new(param: EngineParam) -> Self {
        Self {
            param,
            multiplier: 1.0,
        }
    }

    /// Target that receives the binding's value times `multiplier`.
    pub const fn scaled(param: EngineParam, multiplier: f32) -> Self {
        Self { param, multiplier }
    }
}

/// How a control's raw position becomes parameter writes.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlBinding {
    /// Text shown next to the value in status messages.
    pub label: Cow<'static, str>,
    /// Shape of the physical control.
    pub kind: ControlType,
    /// Scaling curve for the raw position.
    pub range: ScaleRange,
    /// Factor applied after scaling.
    pub post_scale: f32,
    /// Parameters written on every update. Empty for display-only controls.
    pub targets: Vec<ParamTarget>,
    /// Raw position applied by [`ParameterRouter::apply_defaults`].
    pub default: f32,
}

impl ControlBinding {
    /// Display-only knob with the given label and range.
    pub fn new(label: impl Into<Cow<'static, str>>, range: ScaleRange) -> Self {
        Self {
            label: label.into(),
            kind: ControlType::Knob,
            range,
            post_scale: 1.0,
            targets: Vec::new(),
            default: 0.0,
        }
    }

    /// Sets the control shape.
    pub fn with_kind(mut self, kind: ControlType) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the post-scale factor.
    pub fn with_post_scale(mut self, post_scale: f32) -> Self {
        self.post_scale = post_scale;
        self
    }

    /// Adds a target written with the binding's value.
    pub fn with_target(mut self, param: EngineParam) -> Self {
        self.targets.push(ParamTarget::new(param));
        self
    }

    /// Adds a target written with the binding's value times `multiplier`.
    pub fn with_scaled_target(mut self, param: EngineParam, multiplier: f32) -> Self {
        self.targets.push(ParamTarget::scaled(param, multiplier));
        self
    }

    /// Sets the default raw position.
    pub fn with_default(mut self, raw: f32) -> Self {
        self.default = raw;
        self
    }

    /// Converts a raw position into the binding's value.
    ///
    /// ```rust
    /// use keyroute_core::ScaleRange;
    /// use keyroute_router::ControlBinding;
    ///
    /// let cutoff = ControlBinding::new("Cutoff", ScaleRange::logarithmic(30.0, 7000.0))
    ///     .with_post_scale(4.0);
    /// assert!((cutoff.value(0.0) - 120.0).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn value(&self, raw: f32) -> f32 {
        self.range.denormalize(raw) * self.post_scale
    }

    /// Returns true if the binding writes no parameters.
    pub fn is_display_only(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A value applied by [`ParameterRouter::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedChange {
    /// Control that moved.
    pub control: ControlId,
    /// The control's label.
    pub label: Cow<'static, str>,
    /// Scaled value, before per-target multipliers.
    pub value: f32,
    /// Curve the value came from.
    pub scale: ParamScale,
    /// Number of parameters written.
    pub writes: usize,
}

impl fmt::Display for AppliedChange {
    /// Stepped values print as whole numbers, everything else with two
    /// decimals: `"Semitones: -3"`, `"Cutoff: 12000.00"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scale {
            ParamScale::Stepped => write!(f, "{}: {}", self.label, self.value as i32),
            ParamScale::Linear | ParamScale::Logarithmic => {
                write!(f, "{}: {:.2}", self.label, self.value)
            }
        }
    }
}

/// Routes control positions to engine parameters.
///
/// Each identifier maps to exactly one binding. The router remembers the
/// last value each control applied, for display.
///
/// # Example
///
/// ```rust
/// use keyroute_core::{EffectParam, EngineParam, RecordingEngine, ScaleRange};
/// use keyroute_router::{ControlBinding, ParameterRouter};
///
/// let mut params = ParameterRouter::new();
/// params.bind(
///     "cutoff",
///     ControlBinding::new("Cutoff", ScaleRange::linear(150.0, 24000.0))
///         .with_target(EngineParam::Effect(EffectParam::FilterCutoff)),
/// );
///
/// let mut engine = RecordingEngine::new();
/// let change = params.update("cutoff", 0.5, &mut engine).unwrap();
/// assert_eq!(change.value, 12075.0);
/// assert_eq!(change.to_string(), "Cutoff: 12075.00");
///
/// assert!(params.update("nonexistent", 0.5, &mut engine).is_none());
/// assert_eq!(engine.calls().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParameterRouter {
    bindings: BTreeMap<ControlId, ControlBinding>,
    last_values: BTreeMap<ControlId, f32>,
}

impl ParameterRouter {
    /// Creates a router with no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router from `(id, binding)` pairs. Later duplicates replace
    /// earlier ones.
    pub fn with_bindings(bindings: impl IntoIterator<Item = (ControlId, ControlBinding)>) -> Self {
        let mut router = Self::new();
        for (id, binding) in bindings {
            router.bind(id, binding);
        }
        router
    }

    /// Binds a control, returning the binding it replaced.
    pub fn bind(
        &mut self,
        control: impl Into<ControlId>,
        binding: ControlBinding,
    ) -> Option<ControlBinding> {
        let control = control.into();
        self.last_values.remove(&control);
        self.bindings.insert(control, binding)
    }

    /// Removes a control's binding.
    pub fn unbind(&mut self, control: &str) -> Option<ControlBinding> {
        self.last_values.remove(control);
        self.bindings.remove(control)
    }

    /// Removes every binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.last_values.clear();
    }

    /// The binding for a control.
    pub fn binding(&self, control: &str) -> Option<&ControlBinding> {
        self.bindings.get(control)
    }

    /// Returns true if the control is bound.
    pub fn contains(&self, control: &str) -> bool {
        self.bindings.contains_key(control)
    }

    /// All bindings, sorted by identifier.
    pub fn bindings(&self) -> impl Iterator<Item = (&ControlId, &ControlBinding)> {
        self.bindings.iter()
    }

    /// Number of bound controls.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Value last applied by a control.
    pub fn last_value(&self, control: &str) -> Option<f32> {
        self.last_values.get(control).copied()
    }

    /// Scales `raw` through the control's binding and writes every target.
    ///
    /// Returns `None`, writing nothing, if the control is not bound.
    pub fn update<E: SynthEngine + ?Sized>(
        &mut self,
        control: &str,
        raw: f32,
        engine: &mut E,
    ) -> Option<AppliedChange> {
        let Some((id, binding)) = self.bindings.get_key_value(control) else {
            tracing::warn!("parameter_router: no binding for control '{control}'");
            return None;
        };

        let value = binding.value(raw);
        for target in &binding.targets {
            let scaled = value * target.multiplier;
            tracing::debug!("parameter_router: {id} -> {} = {scaled}", target.param);
            engine.set_param(target.param, scaled);
        }

        let change = AppliedChange {
            control: id.clone(),
            label: binding.label.clone(),
            value,
            scale: binding.range.scale,
            writes: binding.targets.len(),
        };
        self.last_values.insert(change.control.clone(), value);
        Some(change)
    }

    /// Pushes every binding's default raw position through [`update`](Self::update).
    ///
    /// Returns the number of controls applied.
    pub fn apply_defaults<E: SynthEngine + ?Sized>(&mut self, engine: &mut E) -> usize {
        let defaults: Vec<(ControlId, f32)> = self
            .bindings
            .iter()
            .map(|(id, b)| (id.clone(), b.default))
            .collect();
        let mut applied = 0;
        for (id, raw) in defaults {
            if self.update(id.as_str(), raw, engine).is_some() {
                applied += 1;
            }
        }
        applied
    }
}
