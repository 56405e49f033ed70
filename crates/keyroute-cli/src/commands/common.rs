//! Shared CLI helpers used across multiple commands.

use std::path::{Path, PathBuf};

use clap::Args;
use keyroute_config::{BindingSource, BindingTable};
use keyroute_router::ParameterRouter;

/// Options shared by every command that builds a controller.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Binding table to use instead of the user or factory bindings
    #[arg(short, long, value_name = "FILE")]
    pub bindings: Option<PathBuf>,

    /// Record engine calls and print them instead of driving the voice bank
    #[arg(long)]
    pub dry_run: bool,

    /// Do not push default control values before the first event
    #[arg(long)]
    pub no_defaults: bool,
}

/// Resolve a binding table: explicit file, then user file, then factory.
pub fn load_table(explicit: Option<&Path>) -> anyhow::Result<BindingTable> {
    let (table, source) = BindingTable::resolve(explicit)?;
    match &source {
        BindingSource::Explicit(path) | BindingSource::User(path) => {
            tracing::info!("using bindings from {}", path.display());
        }
        BindingSource::Factory => tracing::info!("using factory bindings"),
    }
    Ok(table)
}

/// Resolve and validate a binding table into a parameter router.
pub fn load_params(explicit: Option<&Path>) -> anyhow::Result<ParameterRouter> {
    Ok(load_table(explicit)?.to_router()?)
}
