//! Control binding tables for keyroute.
//!
//! Binding tables describe how every knob and slider reaches the engine:
//! scaling curve, post-scale factor, default position, and parameter
//! targets. They are plain TOML, so a front panel can be re-mapped without
//! recompiling.
//!
//! # Features
//!
//! - **Binding tables**: Load and save [`BindingTable`] files
//! - **Validation**: Reject unknown parameters, bad ranges, and duplicate ids
//! - **Paths**: Platform-specific config directory
//!
//! # Example
//!
//! ```rust
//! use keyroute_config::BindingTable;
//!
//! let table = BindingTable::factory();
//! let text = table.to_toml().unwrap();
//!
//! let parsed = BindingTable::from_toml(&text).unwrap();
//! let router = parsed.to_router().unwrap();
//! assert!(router.contains("cutoff"));
//! ```

mod binding_table;
mod error;

/// Platform-specific paths for configuration.
pub mod paths;

/// Binding table validation.
pub mod validation;

pub use binding_table::{BindingConfig, BindingSource, BindingTable, TargetConfig};
pub use error::ConfigError;
pub use paths::{BINDINGS_FILE, ensure_user_config_dir, user_bindings_path, user_config_dir};
pub use validation::{
    ValidationError, ValidationResult, kind_name, parse_kind, validate_binding, validate_table,
};
