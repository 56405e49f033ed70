//! Binding table file format and operations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use keyroute_core::ControlId;
use keyroute_router::{ControlBinding, ParameterRouter, factory_bindings};

use crate::error::ConfigError;
use crate::paths::user_bindings_path;
use crate::validation::{kind_name, validate_table};

/// A table of control bindings, as stored on disk.
///
/// Every row names a control, its scaling curve, and the engine parameters
/// it writes. Parameter names use the engine's stable string form
/// (`"filter.cutoff"`, `"voice.all.attack"`, `"pulse.1.width"`).
///
/// # TOML Format
///
/// ```toml
/// name = "Factory"
///
/// [[bindings]]
/// id = "cutoff"
/// label = "Cutoff"
/// scale = "log"
/// min = 30.0
/// max = 7000.0
/// post_scale = 4.0
/// default = 0.845
///
/// [[bindings.targets]]
/// param = "filter.cutoff"
///
/// [[bindings]]
/// id = "attack"
/// label = "Attack"
/// kind = "slider"
/// min = 0.0
/// max = 1.0
/// default = 0.01
///
/// [[bindings.targets]]
/// param = "voice.all.attack"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BindingTable {
    /// Name of the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// One row per control.
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// One control binding row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BindingConfig {
    /// Stable control identifier.
    pub id: String,

    /// Label shown in status messages.
    pub label: String,

    /// Control shape: `knob`, `slider`, `toggle`, or `segmented:N`.
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Scaling curve: `linear`, `log`, or `stepped`.
    #[serde(default = "default_scale")]
    pub scale: String,

    /// Value at raw position 0.
    pub min: f32,

    /// Value at raw position 1.
    pub max: f32,

    /// Factor applied after scaling.
    #[serde(default = "one")]
    pub post_scale: f32,

    /// Raw position applied at startup.
    #[serde(default)]
    pub default: f32,

    /// Parameters written on every update. Empty for display-only controls.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<TargetConfig>,
}

/// One parameter written by a binding row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetConfig {
    /// Engine parameter name.
    pub param: String,

    /// Factor applied to the binding's value for this target.
    #[serde(default = "one", skip_serializing_if = "is_one")]
    pub multiplier: f32,
}

fn default_kind() -> String {
    "knob".to_string()
}

fn default_scale() -> String {
    "linear".to_string()
}

fn one() -> f32 {
    1.0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_one(v: &f32) -> bool {
    *v == 1.0
}

impl TargetConfig {
    /// Target that receives the binding's value unchanged.
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            multiplier: 1.0,
        }
    }

    /// Target that receives the binding's value times `multiplier`.
    pub fn scaled(param: impl Into<String>, multiplier: f32) -> Self {
        Self {
            param: param.into(),
            multiplier,
        }
    }
}

impl BindingConfig {
    /// Create a display-only knob row.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        scale: impl Into<String>,
        min: f32,
        max: f32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: default_kind(),
            scale: scale.into(),
            min,
            max,
            post_scale: 1.0,
            default: 0.0,
            targets: Vec::new(),
        }
    }

    /// Add a target to the row.
    pub fn with_target(mut self, target: TargetConfig) -> Self {
        self.targets.push(target);
        self
    }

    /// Describe an existing router binding.
    pub fn from_binding(id: &ControlId, binding: &ControlBinding) -> Self {
        Self {
            id: id.to_string(),
            label: binding.label.to_string(),
            kind: kind_name(binding.kind),
            scale: binding.range.scale.name().to_string(),
            min: binding.range.min,
            max: binding.range.max,
            post_scale: binding.post_scale,
            default: binding.default,
            targets: binding
                .targets
                .iter()
                .map(|t| TargetConfig::scaled(t.param.to_string(), t.multiplier))
                .collect(),
        }
    }
}

/// Where a loaded table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingSource {
    /// A file named explicitly by the caller.
    Explicit(PathBuf),
    /// The user's bindings file in the config directory.
    User(PathBuf),
    /// The built-in factory layout.
    Factory,
}

impl BindingTable {
    /// Create an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
            bindings: Vec::new(),
        }
    }

    /// The factory layout as a table.
    pub fn factory() -> Self {
        let bindings = factory_bindings();
        let mut table = Self::from_bindings(bindings.iter().map(|(id, b)| (id, b)));
        table.name = Some("Factory".to_string());
        table
    }

    /// Describe router bindings as a table.
    pub fn from_bindings<'a>(
        bindings: impl IntoIterator<Item = (&'a ControlId, &'a ControlBinding)>,
    ) -> Self {
        Self {
            name: None,
            description: None,
            bindings: bindings
                .into_iter()
                .map(|(id, b)| BindingConfig::from_binding(id, b))
                .collect(),
        }
    }

    /// Load a table from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let table = Self::from_toml(&content)?;
        tracing::info!(
            "config: loaded {} bindings from {}",
            table.bindings.len(),
            path.display()
        );
        Ok(table)
    }

    /// Load a table from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the table to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::info!("config: saved {} bindings to {}", self.bindings.len(), path.display());
        Ok(())
    }

    /// Serialize the table to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Find a row by control identifier.
    pub fn get(&self, id: &str) -> Option<&BindingConfig> {
        self.bindings.iter().find(|b| b.id == id)
    }

    /// Validate every row and convert the table into router bindings.
    pub fn to_bindings(&self) -> Result<Vec<(ControlId, ControlBinding)>, ConfigError> {
        Ok(validate_table(self)?)
    }

    /// Validate the table and build a parameter router from it.
    pub fn to_router(&self) -> Result<ParameterRouter, ConfigError> {
        Ok(ParameterRouter::with_bindings(self.to_bindings()?))
    }

    /// Resolve the table to use.
    ///
    /// An explicit path must load. Without one, the user's bindings file is
    /// used if it exists, otherwise the factory layout.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, BindingSource), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, BindingSource::Explicit(path.to_path_buf())));
        }
        let user = user_bindings_path();
        if user.is_file() {
            return Ok((Self::load(&user)?, BindingSource::User(user)));
        }
        tracing::debug!("config: no bindings at {}, using factory layout", user.display());
        Ok((Self::factory(), BindingSource::Factory))
    }
}
