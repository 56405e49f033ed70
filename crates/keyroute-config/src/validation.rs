//! Binding table validation.
//!
//! Turns the loosely typed rows of a [`BindingTable`] into router
//! [`ControlBinding`]s, rejecting anything the router could not use: unknown
//! parameter names, unknown scales or control kinds, logarithmic ranges that
//! touch zero, non-finite numbers, and identifiers bound twice.
//!
//! # Example
//!
//! ```rust
//! use keyroute_config::{BindingConfig, TargetConfig, validate_binding};
//!
//! let row = BindingConfig::new("cutoff", "Cutoff", "log", 30.0, 7000.0)
//!     .with_target(TargetConfig::new("filter.cutoff"));
//! let (id, binding) = validate_binding(&row).expect("valid row");
//! assert_eq!(id.as_str(), "cutoff");
//! assert_eq!(binding.targets.len(), 1);
//! ```

use std::collections::BTreeSet;

use keyroute_core::{ControlId, ControlType, EngineParam, ParamScale, ScaleRange};
use keyroute_router::{ControlBinding, ParamTarget};
use thiserror::Error;

use crate::binding_table::{BindingConfig, BindingTable};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A row has an empty identifier.
    #[error("control identifier is empty")]
    EmptyId,

    /// The same identifier appears on more than one row.
    #[error("control '{0}' is bound more than once")]
    DuplicateControl(String),

    /// Unknown control kind.
    #[error("unknown kind '{kind}' for control '{control}'")]
    UnknownKind {
        /// Control identifier.
        control: String,
        /// The rejected kind.
        kind: String,
    },

    /// Unknown scaling curve.
    #[error("unknown scale '{scale}' for control '{control}'")]
    UnknownScale {
        /// Control identifier.
        control: String,
        /// The rejected scale name.
        scale: String,
    },

    /// A target names a parameter the engine does not have.
    #[error("unknown parameter '{param}' targeted by control '{control}'")]
    UnknownParameter {
        /// Control identifier.
        control: String,
        /// The rejected parameter name.
        param: String,
    },

    /// A logarithmic range with a bound at or below zero.
    #[error("logarithmic control '{control}' needs positive bounds, got [{min}, {max}]")]
    NonPositiveLogBounds {
        /// Control identifier.
        control: String,
        /// Range minimum.
        min: f32,
        /// Range maximum.
        max: f32,
    },

    /// A logarithmic range whose bounds coincide.
    #[error("logarithmic control '{control}' has an empty range at {value}")]
    EmptyLogRange {
        /// Control identifier.
        control: String,
        /// The shared bound.
        value: f32,
    },

    /// A numeric field is NaN or infinite.
    #[error("field '{field}' of control '{control}' is not finite")]
    NonFinite {
        /// Control identifier.
        control: String,
        /// Name of the offending field.
        field: &'static str,
    },

    /// The default raw position is outside `0.0..=1.0`.
    #[error("default {value} of control '{control}' is outside [0, 1]")]
    DefaultOutOfRange {
        /// Control identifier.
        control: String,
        /// The rejected default.
        value: f32,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Stable name of a control kind, as written in binding files.
pub fn kind_name(kind: ControlType) -> String {
    match kind {
        ControlType::Knob => "knob".to_string(),
        ControlType::Slider => "slider".to_string(),
        ControlType::Toggle => "toggle".to_string(),
        ControlType::Segmented(n) => format!("segmented:{n}"),
    }
}

/// Parses a name produced by [`kind_name`].
pub fn parse_kind(name: &str) -> Option<ControlType> {
    match name {
        "knob" => Some(ControlType::Knob),
        "slider" => Some(ControlType::Slider),
        "toggle" => Some(ControlType::Toggle),
        _ => name
            .strip_prefix("segmented:")
            .and_then(|n| n.parse().ok())
            .map(ControlType::Segmented),
    }
}

/// Validates one row and converts it into a router binding.
///
/// Collects every problem on the row; a single problem is returned as
/// itself, several as [`ValidationError::Multiple`].
pub fn validate_binding(row: &BindingConfig) -> ValidationResult<(ControlId, ControlBinding)> {
    let control = row.id.clone();
    let mut errors = Vec::new();

    if row.id.is_empty() {
        errors.push(ValidationError::EmptyId);
    }

    let kind = parse_kind(&row.kind).unwrap_or_else(|| {
        errors.push(ValidationError::UnknownKind {
            control: control.clone(),
            kind: row.kind.clone(),
        });
        ControlType::Knob
    });

    let scale = ParamScale::from_name(&row.scale).unwrap_or_else(|| {
        errors.push(ValidationError::UnknownScale {
            control: control.clone(),
            scale: row.scale.clone(),
        });
        ParamScale::Linear
    });

    for (field, value) in [
        ("min", row.min),
        ("max", row.max),
        ("post_scale", row.post_scale),
        ("default", row.default),
    ] {
        if !value.is_finite() {
            errors.push(ValidationError::NonFinite {
                control: control.clone(),
                field,
            });
        }
    }

    if scale == ParamScale::Logarithmic && (row.min <= 0.0 || row.max <= 0.0) {
        errors.push(ValidationError::NonPositiveLogBounds {
            control: control.clone(),
            min: row.min,
            max: row.max,
        });
    } else if scale == ParamScale::Logarithmic && row.min == row.max {
        errors.push(ValidationError::EmptyLogRange {
            control: control.clone(),
            value: row.min,
        });
    }

    if row.default.is_finite() && !(0.0..=1.0).contains(&row.default) {
        errors.push(ValidationError::DefaultOutOfRange {
            control: control.clone(),
            value: row.default,
        });
    }

    let mut targets = Vec::with_capacity(row.targets.len());
    for target in &row.targets {
        match target.param.parse::<EngineParam>() {
            Ok(param) if target.multiplier.is_finite() => {
                targets.push(ParamTarget::scaled(param, target.multiplier));
            }
            Ok(_) => errors.push(ValidationError::NonFinite {
                control: control.clone(),
                field: "multiplier",
            }),
            Err(_) => errors.push(ValidationError::UnknownParameter {
                control: control.clone(),
                param: target.param.clone(),
            }),
        }
    }

    if let Some(err) = collapse(errors) {
        return Err(err);
    }

    let binding = ControlBinding {
        label: row.label.clone().into(),
        kind,
        range: ScaleRange::new(row.min, row.max, scale),
        post_scale: row.post_scale,
        targets,
        default: row.default,
    };
    Ok((ControlId::new(control), binding))
}

/// Validates every row of a table, in order.
///
/// Reports every problem in the table at once rather than stopping at the
/// first bad row.
pub fn validate_table(table: &BindingTable) -> ValidationResult<Vec<(ControlId, ControlBinding)>> {
    let mut seen = BTreeSet::new();
    let mut errors = Vec::new();
    let mut bindings = Vec::with_capacity(table.bindings.len());

    for row in &table.bindings {
        if !row.id.is_empty() && !seen.insert(row.id.as_str()) {
            errors.push(ValidationError::DuplicateControl(row.id.clone()));
        }
        match validate_binding(row) {
            Ok(binding) => bindings.push(binding),
            Err(ValidationError::Multiple(row_errors)) => errors.extend(row_errors),
            Err(err) => errors.push(err),
        }
    }

    match collapse(errors) {
        Some(err) => Err(err),
        None => Ok(bindings),
    }
}

fn collapse(mut errors: Vec<ValidationError>) -> Option<ValidationError> {
    match errors.len() {
        0 => None,
        1 => errors.pop(),
        _ => Some(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding_table::TargetConfig;

    fn row(id: &str) -> BindingConfig {
        BindingConfig::new(id, "Test", "linear", 0.0, 1.0)
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in [
            ControlType::Knob,
            ControlType::Slider,
            ControlType::Toggle,
            ControlType::Segmented(4),
        ] {
            assert_eq!(parse_kind(&kind_name(kind)), Some(kind));
        }
        assert_eq!(parse_kind("dial"), None);
        assert_eq!(parse_kind("segmented:x"), None);
    }

    #[test]
    fn valid_row_converts() {
        let r = row("pwm")
            .with_target(TargetConfig::new("pulse.1.width"))
            .with_target(TargetConfig::scaled("pulse.2.width", 0.5));
        let (id, binding) = validate_binding(&r).unwrap();
        assert_eq!(id.as_str(), "pwm");
        assert_eq!(binding.targets[1].multiplier, 0.5);
        assert_eq!(binding.kind, ControlType::Knob);
    }

    #[test]
    fn unknown_parameter_rejected() {
        let r = row("wah").with_target(TargetConfig::new("filter.wah"));
        assert_eq!(
            validate_binding(&r).unwrap_err(),
            ValidationError::UnknownParameter {
                control: "wah".to_string(),
                param: "filter.wah".to_string(),
            }
        );
    }

    #[test]
    fn log_bounds_must_be_positive() {
        let mut r = row("cutoff");
        r.scale = "log".to_string();
        let err = validate_binding(&r).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveLogBounds { .. }));

        r.min = 100.0;
        r.max = 100.0;
        assert_eq!(
            validate_binding(&r).unwrap_err(),
            ValidationError::EmptyLogRange {
                control: "cutoff".to_string(),
                value: 100.0,
            }
        );
    }

    #[test]
    fn row_errors_are_collected() {
        let mut r = row("");
        r.kind = "dial".to_string();
        r.default = 2.0;
        r.max = f32::NAN;
        let ValidationError::Multiple(errors) = validate_binding(&r).unwrap_err() else {
            panic!("expected several errors");
        };
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], ValidationError::EmptyId);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let table = BindingTable {
            bindings: vec![row("a"), row("b"), row("a")],
            ..BindingTable::default()
        };
        assert_eq!(
            validate_table(&table).unwrap_err(),
            ValidationError::DuplicateControl("a".to_string())
        );
    }

    #[test]
    fn multiple_display_joins_messages() {
        let err = ValidationError::Multiple(vec![
            ValidationError::EmptyId,
            ValidationError::DuplicateControl("x".to_string()),
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: control identifier is empty; control 'x' is bound more than once"
        );
    }
}
