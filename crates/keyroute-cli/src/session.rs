//! Drives a controller from script steps and reports what happened.

use std::io::{self, Write};

use keyroute_core::{EngineCall, RecordingEngine, SynthEngine, VoiceId};
use keyroute_router::{Controller, ParameterRouter, factory_panel};
use keyroute_synth::Synth;

use crate::script::Step;

/// Engine behaviour the CLI needs beyond [`SynthEngine`].
pub trait SessionEngine: SynthEngine {
    /// Let `seconds` of time pass.
    fn advance(&mut self, seconds: f32);

    /// Removes and returns the calls made since the last drain, if the
    /// engine records them.
    fn drain_calls(&mut self) -> Vec<EngineCall> {
        Vec::new()
    }

    /// Writes a closing summary of engine state.
    fn summarize(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl SessionEngine for Synth {
    fn advance(&mut self, seconds: f32) {
        Synth::advance(self, seconds);
    }

    fn summarize(&self, out: &mut dyn Write) -> io::Result<()> {
        for id in VoiceId::ALL {
            let voice = self.bank().voice(id);
            let notes: Vec<String> = voice
                .notes()
                .iter()
                .map(|n| {
                    if n.is_held() {
                        n.note.to_string()
                    } else {
                        format!("{}~", n.note)
                    }
                })
                .collect();
            writeln!(out, "voice {:6} [{}]", id.name(), notes.join(" "))?;
        }
        Ok(())
    }
}

impl SessionEngine for RecordingEngine {
    fn advance(&mut self, _seconds: f32) {}

    fn drain_calls(&mut self) -> Vec<EngineCall> {
        self.take()
    }

    fn summarize(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

/// A controller plus the output it reports to.
pub struct Session<'a, E: SessionEngine> {
    controller: Controller<E>,
    out: &'a mut dyn Write,
}

impl<'a, E: SessionEngine> Session<'a, E> {
    /// Creates a session over `engine` with the given bindings and the
    /// factory switches and selectors.
    pub fn new(engine: E, params: ParameterRouter, out: &'a mut dyn Write) -> Self {
        Self {
            controller: Controller::with_layout(engine, params, factory_panel()),
            out,
        }
    }

    /// Pushes every default control value to the engine without reporting
    /// the individual writes.
    pub fn apply_defaults(&mut self) -> usize {
        let applied = self.controller.apply_defaults();
        self.controller.engine_mut().drain_calls();
        applied
    }

    /// Runs one step and prints its status lines, then any engine calls.
    pub fn run(&mut self, step: Step) -> io::Result<()> {
        match step {
            Step::Event(event) => {
                for status in self.controller.handle(event) {
                    writeln!(self.out, "{status}")?;
                }
            }
            Step::Wait(seconds) => {
                self.controller.engine_mut().advance(seconds);
                tracing::debug!("session: advanced {seconds}s");
            }
        }
        for call in self.controller.engine_mut().drain_calls() {
            writeln!(self.out, "  -> {call}")?;
        }
        Ok(())
    }

    /// Prints keyboard and engine state.
    pub fn summarize(&mut self) -> io::Result<()> {
        let keys = self.controller.keys();
        let context = keys.context();
        writeln!(
            self.out,
            "octave {} mono {} hold {}",
            context.octave(),
            on_off(context.is_mono()),
            on_off(context.is_hold()),
        )?;
        let latched: Vec<String> = keys.keys_held().iter().map(u8::to_string).collect();
        writeln!(self.out, "latched [{}]", latched.join(" "))?;
        self.controller.engine().summarize(&mut *self.out)
    }

    /// The controller.
    #[cfg(test)]
    pub fn controller(&self) -> &Controller<E> {
        &self.controller
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    fn run_script<E: SessionEngine>(engine: E, script: &str) -> String {
        let mut out = Vec::new();
        {
            let mut session = Session::new(
                engine,
                ParameterRouter::with_bindings(keyroute_router::factory_bindings()),
                &mut out,
            );
            for step in parse_script(script).unwrap() {
                session.run(step).unwrap();
            }
            session.summarize().unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn recording_session_prints_calls() {
        let text = run_script(RecordingEngine::new(), "press 60\nrelease 60\n");
        assert!(text.contains("Key Pressed: 60\n  -> play_note 60 127\n"), "{text}");
        assert!(text.contains("Key Released\n  -> stop_note 60\n"), "{text}");
        assert!(text.contains("octave 0 mono off hold off"), "{text}");
    }

    #[test]
    fn synth_session_shows_releasing_notes() {
        let text = run_script(Synth::new(), "press 60\npress 64\nrelease 60\n");
        assert!(text.contains("voice sine   [60~ 64]"), "{text}");
    }

    #[test]
    fn wait_lets_release_finish() {
        let text = run_script(Synth::new(), "press 60\nrelease 60\nwait 5\n");
        assert!(text.contains("voice sine   []"), "{text}");
    }

    #[test]
    fn defaults_are_not_echoed() {
        let mut out = Vec::new();
        let mut session = Session::new(
            RecordingEngine::new(),
            ParameterRouter::with_bindings(keyroute_router::factory_bindings()),
            &mut out,
        );
        assert!(session.apply_defaults() > 0);
        assert!(session.controller().engine().calls().is_empty());
    }
}
