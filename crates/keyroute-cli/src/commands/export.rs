//! Write a binding table as TOML.

use std::path::PathBuf;

use clap::Args;
use keyroute_config::{BINDINGS_FILE, BindingTable, ensure_user_config_dir};

use super::common::load_table;

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (prints to stdout if omitted)
    #[arg(value_name = "OUTPUT", conflicts_with = "user")]
    output: Option<PathBuf>,

    /// Write to the user bindings file in the config directory
    #[arg(long)]
    user: bool,

    /// Export this table instead of the factory layout
    #[arg(short, long, value_name = "FILE")]
    bindings: Option<PathBuf>,
}

pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    let table = match &args.bindings {
        Some(path) => {
            let table = load_table(Some(path))?;
            // Refuse to re-export a table that would not load.
            table.to_bindings()?;
            table
        }
        None => BindingTable::factory(),
    };

    let target = if args.user {
        Some(ensure_user_config_dir()?.join(BINDINGS_FILE))
    } else {
        args.output
    };

    match target {
        Some(path) => {
            table.save(&path)?;
            println!("Wrote {} bindings to {}", table.bindings.len(), path.display());
        }
        None => print!("{}", table.to_toml()?),
    }
    Ok(())
}
