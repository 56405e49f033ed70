//! Replay an event script.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use keyroute_core::RecordingEngine;
use keyroute_synth::Synth;

use super::common::{LayoutArgs, load_params};
use crate::script::parse_script;
use crate::session::{Session, SessionEngine};

#[derive(Args)]
pub struct ReplayArgs {
    /// Script file, one command per line
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Print keyboard and voice state after the last step
    #[arg(long)]
    summary: bool,
}

pub fn run(args: ReplayArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script '{}'", args.script.display()))?;
    let steps = parse_script(&text)
        .with_context(|| format!("in script '{}'", args.script.display()))?;
    tracing::info!("replaying {} steps", steps.len());

    if args.layout.dry_run {
        replay(RecordingEngine::new(), &args, steps)
    } else {
        replay(Synth::new(), &args, steps)
    }
}

fn replay<E: SessionEngine>(
    engine: E,
    args: &ReplayArgs,
    steps: Vec<crate::script::Step>,
) -> anyhow::Result<()> {
    let params = load_params(args.layout.bindings.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session::new(engine, params, &mut out);

    if !args.layout.no_defaults {
        session.apply_defaults();
    }
    for step in steps {
        session.run(step)?;
    }
    if args.summary {
        session.summarize()?;
    }
    drop(session);
    out.flush()?;
    Ok(())
}
