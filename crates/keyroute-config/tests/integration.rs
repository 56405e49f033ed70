//! Integration tests for keyroute-config.
//!
//! These tests verify binding tables end to end: files on disk, validation,
//! and routers built from loaded tables.

use keyroute_config::{
    BindingConfig, BindingSource, BindingTable, ConfigError, TargetConfig, ValidationError,
};
use keyroute_core::{EffectParam, EngineParam, RecordingEngine};
use keyroute_router::{Controller, InboundEvent, factory_bindings, factory_panel};
use tempfile::TempDir;

/// Saving and reloading the factory table reproduces the factory bindings.
#[test]
fn test_factory_table_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("bindings.toml");

    BindingTable::factory().save(&path).unwrap();
    let loaded = BindingTable::load(&path).unwrap();

    assert_eq!(loaded.name.as_deref(), Some("Factory"));
    assert_eq!(loaded.to_bindings().unwrap(), factory_bindings());
}

/// A hand-written table drives a controller with the mapping it describes.
#[test]
fn test_custom_table_drives_controller() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        r#"
name = "Dark"

[[bindings]]
id = "cutoff"
label = "Cutoff"
scale = "log"
min = 20.0
max = 2000.0
default = 0.0

[[bindings.targets]]
param = "filter.cutoff"

[[bindings.targets]]
param = "filter.lfo_amplitude"
multiplier = 0.5
"#,
    )
    .unwrap();

    let router = BindingTable::load(&path).unwrap().to_router().unwrap();
    let mut controller = Controller::with_layout(RecordingEngine::new(), router, factory_panel());

    let lines = controller.handle(InboundEvent::ControlChanged {
        control: "cutoff".into(),
        value: 1.0,
    });
    assert_eq!(lines[0].to_string(), "Cutoff: 2000.00");

    let writes: Vec<_> = controller.engine().param_writes().collect();
    assert_eq!(writes[0].0, EngineParam::Effect(EffectParam::FilterCutoff));
    assert!((writes[0].1 - 2000.0).abs() < 0.5);
    assert_eq!(writes[1].0, EngineParam::Effect(EffectParam::LfoAmplitude));
    assert!((writes[1].1 - 1000.0).abs() < 0.5);
}

/// Every bad row is reported, not just the first.
#[test]
fn test_invalid_table_reports_all_errors() {
    let table = BindingTable {
        bindings: vec![
            BindingConfig::new("a", "A", "linear", 0.0, 1.0)
                .with_target(TargetConfig::new("voice.all.vibrato")),
            BindingConfig::new("b", "B", "log", 0.0, 100.0),
            BindingConfig::new("a", "A again", "linear", 0.0, 1.0),
        ],
        ..BindingTable::default()
    };

    let err = table.to_router().unwrap_err();
    let ConfigError::Validation(ValidationError::Multiple(errors)) = err else {
        panic!("expected several validation errors, got {err}");
    };
    assert_eq!(errors.len(), 3);
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnknownParameter { param, .. } if param == "voice.all.vibrato"))
    );
    assert!(errors.contains(&ValidationError::DuplicateControl("a".to_string())));
}

/// A missing file is a read error carrying the path.
#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = BindingTable::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

/// An explicit path wins over the user file and the factory table.
#[test]
fn test_resolve_prefers_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("explicit.toml");
    BindingTable::new("Explicit").save(&path).unwrap();

    let (table, source) = BindingTable::resolve(Some(&path)).unwrap();
    assert_eq!(table.name.as_deref(), Some("Explicit"));
    assert_eq!(source, BindingSource::Explicit(path));
}

/// Malformed TOML surfaces as a parse error.
#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[[bindings]\nid = ").unwrap();
    assert!(matches!(
        BindingTable::load(&path).unwrap_err(),
        ConfigError::TomlParse(_)
    ));
}
