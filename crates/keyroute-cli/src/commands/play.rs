//! Interactive session on stdin.

use std::io::{self, BufRead, Write};

use clap::Args;
use keyroute_core::RecordingEngine;
use keyroute_synth::Synth;

use super::common::{LayoutArgs, load_params};
use crate::script::parse_line;
use crate::session::{Session, SessionEngine};

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    layout: LayoutArgs,
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    if args.layout.dry_run {
        play(RecordingEngine::new(), &args.layout)
    } else {
        play(Synth::new(), &args.layout)
    }
}

fn play<E: SessionEngine>(engine: E, layout: &LayoutArgs) -> anyhow::Result<()> {
    let params = load_params(layout.bindings.as_deref())?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session::new(engine, params, &mut out);

    if !layout.no_defaults {
        session.apply_defaults();
    }

    for (i, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        match line.trim() {
            "quit" | "exit" => break,
            "state" => {
                session.summarize()?;
                continue;
            }
            _ => {}
        }
        // Bad input is reported and skipped; the session keeps going.
        match parse_line(&line, i + 1) {
            Ok(Some(step)) => session.run(step)?,
            Ok(None) => {}
            Err(err) => {
                tracing::debug!("play: skipped input line {}", err.line());
                eprintln!("error: {err}");
            }
        }
    }

    session.summarize()?;
    drop(session);
    out.flush()?;
    Ok(())
}
