//! Event script parsing.
//!
//! One command per line; `#` starts a comment.
//!
//! ```text
//! press 60            # key down
//! release 60          # key up
//! octave up           # or: octave down
//! hold                # toggle hold mode
//! mono                # toggle mono mode
//! set cutoff 0.25     # move a knob, slider, or switch
//! toggle delay        # tap a switch
//! select lfo_waveform 2
//! wait 0.5            # let envelopes run, in seconds
//! panic
//! ```

use keyroute_core::ControlId;
use keyroute_router::InboundEvent;
use thiserror::Error;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// An event for the controller.
    Event(InboundEvent),
    /// Let time pass in the engine.
    Wait(f32),
}

/// Errors raised while parsing a script, with the 1-based line number.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScriptError {
    /// The first word is not a command.
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand {
        /// Line number.
        line: usize,
        /// The rejected word.
        command: String,
    },

    /// A required argument is absent.
    #[error("line {line}: '{command}' expects {expected}")]
    MissingArgument {
        /// Line number.
        line: usize,
        /// Command name.
        command: &'static str,
        /// Description of the missing argument.
        expected: &'static str,
    },

    /// An argument does not parse.
    #[error("line {line}: invalid {what} '{value}'")]
    InvalidValue {
        /// Line number.
        line: usize,
        /// What the argument should have been.
        what: &'static str,
        /// The rejected text.
        value: String,
    },

    /// Extra words after a complete command.
    #[error("line {line}: unexpected '{extra}'")]
    TrailingInput {
        /// Line number.
        line: usize,
        /// The first extra word.
        extra: String,
    },
}

impl ScriptError {
    /// Line the error was found on.
    pub fn line(&self) -> usize {
        match self {
            ScriptError::UnknownCommand { line, .. }
            | ScriptError::MissingArgument { line, .. }
            | ScriptError::InvalidValue { line, .. }
            | ScriptError::TrailingInput { line, .. } => *line,
        }
    }
}

/// Parses a whole script. Stops at the first bad line.
pub fn parse_script(text: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        if let Some(step) = parse_line(raw, i + 1)? {
            steps.push(step);
        }
    }
    Ok(steps)
}

/// Parses one line. Blank lines and comments yield `None`.
pub fn parse_line(raw: &str, line: usize) -> Result<Option<Step>, ScriptError> {
    let text = raw.split('#').next().unwrap_or_default().trim();
    let mut words = text.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let mut arg = |command: &'static str, expected: &'static str| {
        words
            .next()
            .ok_or(ScriptError::MissingArgument {
                line,
                command,
                expected,
            })
    };

    let step = match command {
        "press" => Step::Event(InboundEvent::KeyPressed(key(
            arg("press", "a key index")?,
            line,
        )?)),
        "release" => Step::Event(InboundEvent::KeyReleased(key(
            arg("release", "a key index")?,
            line,
        )?)),
        "octave" => match arg("octave", "'up' or 'down'")? {
            "up" => Step::Event(InboundEvent::OctaveUp),
            "down" => Step::Event(InboundEvent::OctaveDown),
            other => {
                return Err(ScriptError::InvalidValue {
                    line,
                    what: "octave direction",
                    value: other.to_string(),
                });
            }
        },
        "hold" => Step::Event(InboundEvent::ToggleHoldMode),
        "mono" => Step::Event(InboundEvent::ToggleMonoMode),
        "panic" => Step::Event(InboundEvent::PanicPressed),
        "set" => {
            let control = control(arg("set", "a control and a value")?);
            let value = number(arg("set", "a control and a value")?, line)?;
            Step::Event(InboundEvent::ControlChanged { control, value })
        }
        "toggle" => Step::Event(InboundEvent::Toggle(control(arg("toggle", "a switch")?))),
        "select" => {
            let control = control(arg("select", "a selector and a segment")?);
            let index = arg("select", "a selector and a segment")?;
            let index = index.parse().map_err(|_| ScriptError::InvalidValue {
                line,
                what: "segment index",
                value: index.to_string(),
            })?;
            Step::Event(InboundEvent::SegmentSelected { control, index })
        }
        "wait" => {
            let seconds = number(arg("wait", "a duration in seconds")?, line)?;
            if seconds < 0.0 {
                return Err(ScriptError::InvalidValue {
                    line,
                    what: "duration",
                    value: seconds.to_string(),
                });
            }
            Step::Wait(seconds)
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };

    if let Some(extra) = words.next() {
        return Err(ScriptError::TrailingInput {
            line,
            extra: extra.to_string(),
        });
    }
    Ok(Some(step))
}

fn key(text: &str, line: usize) -> Result<u8, ScriptError> {
    text.parse().map_err(|_| ScriptError::InvalidValue {
        line,
        what: "key index",
        value: text.to_string(),
    })
}

fn number(text: &str, line: usize) -> Result<f32, ScriptError> {
    match text.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ScriptError::InvalidValue {
            line,
            what: "number",
            value: text.to_string(),
        }),
    }
}

fn control(text: &str) -> ControlId {
    ControlId::new(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        let steps = parse_script(
            "press 60\nrelease 60\noctave up\noctave down\nhold\nmono\n\
             set cutoff 0.25\ntoggle delay\nselect lfo_waveform 2\nwait 0.5\npanic\n",
        )
        .unwrap();
        assert_eq!(steps.len(), 11);
        assert_eq!(steps[0], Step::Event(InboundEvent::KeyPressed(60)));
        assert_eq!(
            steps[6],
            Step::Event(InboundEvent::ControlChanged {
                control: ControlId::from("cutoff"),
                value: 0.25,
            })
        );
        assert_eq!(
            steps[8],
            Step::Event(InboundEvent::SegmentSelected {
                control: ControlId::from("lfo_waveform"),
                index: 2,
            })
        );
        assert_eq!(steps[9], Step::Wait(0.5));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let steps = parse_script("# intro\n\n   press 1   # low key\n").unwrap();
        assert_eq!(steps, [Step::Event(InboundEvent::KeyPressed(1))]);
    }

    #[test]
    fn reports_line_numbers() {
        let err = parse_script("press 60\n\nstrum 4\n").unwrap_err();
        assert_eq!(err.line(), 3);
        assert_eq!(err.to_string(), "line 3: unknown command 'strum'");
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(
            parse_line("press", 1),
            Err(ScriptError::MissingArgument { command: "press", .. })
        ));
        assert!(matches!(
            parse_line("press 300", 1),
            Err(ScriptError::InvalidValue { what: "key index", .. })
        ));
        assert!(matches!(
            parse_line("set cutoff nan", 1),
            Err(ScriptError::InvalidValue { what: "number", .. })
        ));
        assert!(matches!(
            parse_line("octave sideways", 1),
            Err(ScriptError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_line("wait -1", 1),
            Err(ScriptError::InvalidValue { what: "duration", .. })
        ));
        assert!(matches!(
            parse_line("hold now", 1),
            Err(ScriptError::TrailingInput { .. })
        ));
    }
}
