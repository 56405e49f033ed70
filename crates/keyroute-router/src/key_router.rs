//! Keyboard policy: which notes to start and stop for each key event.
//!
//! [`KeyRouter`] owns the keyboard state (octave offset, mono and hold
//! modes, the last key pressed, and the keys latched by hold mode) and turns
//! physical key presses and releases into `play_note`/`stop_note` calls on
//! whatever [`SynthEngine`] it is handed.
//!
//! # Modes
//!
//! | Mode | Press | Release |
//! |------|-------|---------|
//! | poly | start note | stop note |
//! | mono | stop the last key if it is a different key, then any other sounding key, start note | stop note |
//! | hold | start note | latch the key; it keeps sounding |
//! | hold + mono | as mono | stop the last key if it is a different key |
//!
//! Latched keys are released by [`KeyRouter::turn_off_held_keys`], which runs
//! automatically when hold mode is switched off or mono mode is switched on.
//! It also stops any key still sounding after it came up, so a note kept by
//! hold + mono cannot outlive the release. Switching mono on additionally
//! silences keys that are still down, leaving the keyboard with no note
//! playing.
//!
//! # Note Bookkeeping
//!
//! A key remembers the note it started. Stopping a key stops that note, even
//! if the octave has changed since, and stopping a key that is not sounding
//! makes no engine call.

use std::collections::BTreeMap;

use keyroute_core::{SynthEngine, is_black_key, key_note};

/// Lowest keyboard octave offset.
pub const OCTAVE_MIN: i8 = -3;

/// Highest keyboard octave offset.
pub const OCTAVE_MAX: i8 = 3;

/// Velocity used for keyboard notes unless changed.
pub const DEFAULT_VELOCITY: u8 = 127;

/// Result of an octave adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctaveChange {
    /// The offset moved to the contained value.
    Moved(i8),
    /// The adjustment would leave `OCTAVE_MIN..=OCTAVE_MAX`; nothing changed.
    Rejected,
}

/// Keyboard modes and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardContext {
    octave: i8,
    mono: bool,
    hold: bool,
    last_key: Option<u8>,
}

impl KeyboardContext {
    /// Octave offset, always in `OCTAVE_MIN..=OCTAVE_MAX`.
    pub fn octave(&self) -> i8 {
        self.octave
    }

    /// Returns true in mono mode.
    pub fn is_mono(&self) -> bool {
        self.mono
    }

    /// Returns true in hold mode.
    pub fn is_hold(&self) -> bool {
        self.hold
    }

    /// The key most recently pressed or released.
    pub fn last_key(&self) -> Option<u8> {
        self.last_key
    }
}

/// State of one on-screen key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    index: u8,
    down: bool,
    held: bool,
    sounding: Option<u8>,
}

impl KeyState {
    fn new(index: u8) -> Self {
        Self {
            index,
            down: false,
            held: false,
            sounding: None,
        }
    }

    /// Physical key index.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Returns true while the key is physically down.
    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Returns true while the key is down or latched by hold mode.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Returns true if the key has a note playing.
    pub fn is_sounding(&self) -> bool {
        self.sounding.is_some()
    }

    /// The note this key started, if it is still playing.
    pub fn sounding_note(&self) -> Option<u8> {
        self.sounding
    }

    /// Returns true if the key is drawn black.
    pub fn is_black(&self) -> bool {
        is_black_key(self.index)
    }
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressOutcome {
    /// Key whose note the mono cut stopped. `None` when there was no cut or
    /// the last key was already silent.
    pub cut: Option<u8>,
    /// Note started, or `None` if the note fell outside `0..=127`.
    pub note: Option<u8>,
}

/// What a key release did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The contained key was turned off.
    Stopped(u8),
    /// Hold mode latched the key; it keeps sounding.
    Latched,
    /// Hold and mono are both on and the released key is the last key; it
    /// keeps sounding.
    Kept,
}

/// Routes key events to note-on and note-off calls.
///
/// # Example
///
/// ```rust
/// use keyroute_core::{EngineCall, RecordingEngine};
/// use keyroute_router::KeyRouter;
///
/// let mut keys = KeyRouter::new();
/// let mut engine = RecordingEngine::new();
///
/// keys.toggle_mono_mode(&mut engine);
/// keys.key_pressed(60, &mut engine);
/// keys.key_pressed(64, &mut engine);
///
/// assert_eq!(
///     engine.calls(),
///     &[
///         EngineCall::PlayNote { note: 60, velocity: 127 },
///         EngineCall::StopNote { note: 60 },
///         EngineCall::PlayNote { note: 64, velocity: 127 },
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct KeyRouter {
    context: KeyboardContext,
    keys: BTreeMap<u8, KeyState>,
    keys_held: Vec<u8>,
    velocity: u8,
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyRouter {
    /// Creates a router at octave 0 with mono and hold off.
    pub fn new() -> Self {
        Self {
            context: KeyboardContext::default(),
            keys: BTreeMap::new(),
            keys_held: Vec::new(),
            velocity: DEFAULT_VELOCITY,
        }
    }

    /// Keyboard modes and position.
    pub fn context(&self) -> &KeyboardContext {
        &self.context
    }

    /// Octave offset.
    pub fn octave(&self) -> i8 {
        self.context.octave
    }

    /// Keys latched by hold mode, in the order they were released.
    pub fn keys_held(&self) -> &[u8] {
        &self.keys_held
    }

    /// State of one key, if it has ever been touched.
    pub fn key(&self, index: u8) -> Option<&KeyState> {
        self.keys.get(&index)
    }

    /// Every key that has been touched, by index.
    pub fn keys(&self) -> impl Iterator<Item = &KeyState> {
        self.keys.values()
    }

    /// Notes currently playing from the keyboard, by key index.
    pub fn sounding_notes(&self) -> impl Iterator<Item = u8> + '_ {
        self.keys.values().filter_map(|k| k.sounding)
    }

    /// Velocity used for keyboard notes.
    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    /// Sets the keyboard velocity (clamped to 1..=127).
    pub fn set_velocity(&mut self, velocity: u8) {
        self.velocity = velocity.clamp(1, 127);
    }

    /// Handles a key going down.
    pub fn key_pressed<E: SynthEngine + ?Sized>(&mut self, key: u8, engine: &mut E) -> PressOutcome {
        let mut cut = None;
        if self.context.mono {
            if let Some(last) = self.context.last_key
                && last != key
                && self.stop_key(last, engine)
            {
                cut = Some(last);
            }
            // The last key may have moved to a key that was already silent.
            let swept = self.stop_keys_where(engine, |state| state.index != key);
            cut = cut.or(swept.first().copied());
        }
        let note = self.start_key(key, engine);
        self.context.last_key = Some(key);
        PressOutcome { cut, note }
    }

    /// Handles a key coming up.
    pub fn key_released<E: SynthEngine + ?Sized>(
        &mut self,
        key: u8,
        engine: &mut E,
    ) -> ReleaseOutcome {
        if let Some(state) = self.keys.get_mut(&key) {
            state.down = false;
        }
        let outcome = if self.context.hold && self.context.mono {
            // Mirrors the press-time mono cut. Releasing the last key itself
            // leaves it sounding.
            match self.context.last_key {
                Some(last) if last != key => {
                    self.stop_key(last, engine);
                    ReleaseOutcome::Stopped(last)
                }
                _ => ReleaseOutcome::Kept,
            }
        } else if self.context.hold {
            if !self.keys_held.contains(&key) {
                self.keys_held.push(key);
            }
            ReleaseOutcome::Latched
        } else {
            self.stop_key(key, engine);
            ReleaseOutcome::Stopped(key)
        };
        self.context.last_key = Some(key);
        outcome
    }

    /// Stops every latched key, then the last key, then any other key that
    /// is sounding but no longer down, and empties the latch.
    ///
    /// Returns the number of notes stopped. A key that is not sounding is
    /// skipped, so no note is stopped twice.
    pub fn turn_off_held_keys<E: SynthEngine + ?Sized>(&mut self, engine: &mut E) -> usize {
        let mut stopped = 0;
        for key in std::mem::take(&mut self.keys_held) {
            if self.stop_key(key, engine) {
                stopped += 1;
            }
        }
        if let Some(last) = self.context.last_key
            && self.stop_key(last, engine)
        {
            stopped += 1;
        }
        stopped += self.stop_keys_where(engine, |state| !state.down).len();
        tracing::info!("key_router: released {stopped} held key(s)");
        stopped
    }

    /// Moves the keyboard up one octave.
    pub fn octave_up(&mut self) -> OctaveChange {
        self.shift_octave(1)
    }

    /// Moves the keyboard down one octave.
    pub fn octave_down(&mut self) -> OctaveChange {
        self.shift_octave(-1)
    }

    /// Turns hold mode on or off. Turning it off releases latched keys.
    pub fn set_hold_mode<E: SynthEngine + ?Sized>(&mut self, on: bool, engine: &mut E) {
        if self.context.hold == on {
            return;
        }
        self.context.hold = on;
        tracing::info!("key_router: hold mode {}", on_off(on));
        if !on {
            self.turn_off_held_keys(engine);
        }
    }

    /// Flips hold mode. Returns the new state.
    pub fn toggle_hold_mode<E: SynthEngine + ?Sized>(&mut self, engine: &mut E) -> bool {
        self.set_hold_mode(!self.context.hold, engine);
        self.context.hold
    }

    /// Turns mono mode on or off. Turning it on releases latched keys and
    /// silences keys that are still down.
    pub fn set_mono_mode<E: SynthEngine + ?Sized>(&mut self, on: bool, engine: &mut E) {
        if self.context.mono == on {
            return;
        }
        self.context.mono = on;
        tracing::info!("key_router: mono mode {}", on_off(on));
        if on {
            self.turn_off_held_keys(engine);
            let silenced = self.stop_keys_where(engine, |_| true).len();
            if silenced > 0 {
                tracing::debug!("key_router: mono silenced {silenced} key(s) still down");
            }
        }
    }

    /// Flips mono mode. Returns the new state.
    pub fn toggle_mono_mode<E: SynthEngine + ?Sized>(&mut self, engine: &mut E) -> bool {
        self.set_mono_mode(!self.context.mono, engine);
        self.context.mono
    }

    /// Silences the engine and forgets every sounding and latched key.
    ///
    /// Modes, octave, and the last key are kept.
    pub fn panic<E: SynthEngine + ?Sized>(&mut self, engine: &mut E) {
        tracing::info!("key_router: panic");
        engine.panic();
        for state in self.keys.values_mut() {
            state.held = false;
            state.sounding = None;
        }
        self.keys_held.clear();
    }

    fn start_key<E: SynthEngine + ?Sized>(&mut self, key: u8, engine: &mut E) -> Option<u8> {
        let octave = self.context.octave;
        let note = key_note(key, octave);
        let state = self.keys.entry(key).or_insert_with(|| KeyState::new(key));
        state.down = true;
        state.held = true;

        // A latched key pressed again in another octave hands over its note.
        if let Some(previous) = state.sounding
            && Some(previous) != note
        {
            tracing::debug!("key_router: key {key} stop {previous} (retriggered)");
            engine.stop_note(previous);
            state.sounding = None;
        }

        match note {
            Some(note) => {
                tracing::debug!("key_router: key {key} play {note}");
                engine.play_note(note, self.velocity);
                state.sounding = Some(note);
            }
            None => {
                tracing::warn!("key_router: key {key} at octave {octave} is outside the note range");
            }
        }
        note
    }

    /// Turns a key off. Returns true if a note was stopped.
    fn stop_key<E: SynthEngine + ?Sized>(&mut self, key: u8, engine: &mut E) -> bool {
        let Some(state) = self.keys.get_mut(&key) else {
            return false;
        };
        state.held = false;
        match state.sounding.take() {
            Some(note) => {
                tracing::debug!("key_router: key {key} stop {note}");
                engine.stop_note(note);
                true
            }
            None => false,
        }
    }

    /// Stops every sounding key matching `pred`, in key order. Returns the
    /// keys stopped.
    fn stop_keys_where<E, F>(&mut self, engine: &mut E, pred: F) -> Vec<u8>
    where
        E: SynthEngine + ?Sized,
        F: Fn(&KeyState) -> bool,
    {
        let targets: Vec<u8> = self
            .keys
            .values()
            .filter(|state| state.sounding.is_some() && pred(state))
            .map(|state| state.index)
            .collect();
        targets
            .into_iter()
            .filter(|&key| self.stop_key(key, engine))
            .collect()
    }

    fn shift_octave(&mut self, delta: i8) -> OctaveChange {
        let target = self.context.octave + delta;
        if !(OCTAVE_MIN..=OCTAVE_MAX).contains(&target) {
            tracing::debug!("key_router: octave {target} rejected");
            return OctaveChange::Rejected;
        }
        self.context.octave = target;
        tracing::info!("key_router: octave {target}");
        OctaveChange::Moved(target)
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
