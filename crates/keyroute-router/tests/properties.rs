//! Property-based tests for keyroute-router key policy and control routing.

use std::collections::BTreeSet;

use keyroute_core::{EngineCall, RecordingEngine};
use keyroute_router::{
    KeyRouter, OCTAVE_MAX, OCTAVE_MIN, OctaveChange, ParameterRouter, factory_bindings,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum KeyEvent {
    Press(u8),
    Release(u8),
    ToggleHold,
    ToggleMono,
}

fn key_events(max_len: usize) -> impl Strategy<Value = Vec<KeyEvent>> {
    prop::collection::vec(
        prop_oneof![
            (0u8..=24).prop_map(KeyEvent::Press),
            (0u8..=24).prop_map(KeyEvent::Release),
        ],
        0..max_len,
    )
}

/// Key events with hold and mono toggles mixed in.
fn mixed_events(max_len: usize) -> impl Strategy<Value = Vec<KeyEvent>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0u8..=24).prop_map(KeyEvent::Press),
            4 => (0u8..=24).prop_map(KeyEvent::Release),
            1 => Just(KeyEvent::ToggleHold),
            1 => Just(KeyEvent::ToggleMono),
        ],
        0..max_len,
    )
}

fn apply(keys: &mut KeyRouter, engine: &mut RecordingEngine, event: KeyEvent) {
    match event {
        KeyEvent::Press(k) => {
            keys.key_pressed(k, engine);
        }
        KeyEvent::Release(k) => {
            keys.key_released(k, engine);
        }
        KeyEvent::ToggleHold => {
            keys.toggle_hold_mode(engine);
        }
        KeyEvent::ToggleMono => {
            keys.toggle_mono_mode(engine);
        }
    }
}

/// Notes currently sounding according to the engine's call log.
fn sounding(calls: &[EngineCall]) -> Vec<u8> {
    let mut notes = Vec::new();
    for call in calls {
        match *call {
            EngineCall::PlayNote { note, .. } => {
                if !notes.contains(&note) {
                    notes.push(note);
                }
            }
            EngineCall::StopNote { note } => notes.retain(|n| *n != note),
            EngineCall::Panic => notes.clear(),
            EngineCall::SetParam { .. } => {}
        }
    }
    notes
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The octave never leaves [-3, 3] and accepted moves step by exactly one.
    #[test]
    fn octave_stays_in_range(ups in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut keys = KeyRouter::new();
        for up in ups {
            let before = keys.octave();
            let change = if up { keys.octave_up() } else { keys.octave_down() };
            let after = keys.octave();
            prop_assert!((OCTAVE_MIN..=OCTAVE_MAX).contains(&after));
            match change {
                OctaveChange::Moved(o) => {
                    prop_assert_eq!(o, after);
                    prop_assert_eq!((after - before).abs(), 1);
                }
                OctaveChange::Rejected => prop_assert_eq!(before, after),
            }
        }
    }

    /// Hold mode without mono never stops a note until hold is turned off,
    /// and turning it off stops every latched note and the last key exactly once.
    #[test]
    fn hold_defers_every_stop(
        taps in prop::collection::vec(0u8..=24, 0..40),
        down in prop::option::of(0u8..=24),
    ) {
        let mut keys = KeyRouter::new();
        let mut engine = RecordingEngine::new();
        keys.set_hold_mode(true, &mut engine);

        for key in taps {
            keys.key_pressed(key, &mut engine);
            keys.key_released(key, &mut engine);
        }
        if let Some(key) = down {
            keys.key_pressed(key, &mut engine);
        }
        prop_assert_eq!(engine.stopped_notes().count(), 0);

        let mut expected = sounding(engine.calls());
        expected.sort_unstable();
        engine.clear();
        keys.set_hold_mode(false, &mut engine);

        let mut stopped: Vec<u8> = engine.stopped_notes().collect();
        stopped.sort_unstable();
        prop_assert_eq!(stopped, expected);
        prop_assert!(keys.keys_held().is_empty());
        prop_assert_eq!(keys.sounding_notes().count(), 0);
    }

    /// With mono on from the start, at most one keyboard note sounds at a time.
    #[test]
    fn mono_sounds_at_most_one_note(events in key_events(60), hold in any::<bool>()) {
        let mut keys = KeyRouter::new();
        let mut engine = RecordingEngine::new();
        keys.set_mono_mode(true, &mut engine);
        keys.set_hold_mode(hold, &mut engine);

        for event in events {
            apply(&mut keys, &mut engine, event);
            prop_assert!(
                sounding(engine.calls()).len() <= 1,
                "sounding {:?}",
                sounding(engine.calls())
            );
        }
    }

    /// Under any mix of key events and mode toggles, mono never lets two
    /// notes sound and, with hold off, only keys that are down sound.
    #[test]
    fn modes_hold_across_toggles(events in mixed_events(80)) {
        let mut keys = KeyRouter::new();
        let mut engine = RecordingEngine::new();
        let mut down = BTreeSet::new();

        for event in events {
            match event {
                KeyEvent::Press(k) => {
                    down.insert(k);
                }
                KeyEvent::Release(k) => {
                    down.remove(&k);
                }
                KeyEvent::ToggleHold | KeyEvent::ToggleMono => {}
            }
            apply(&mut keys, &mut engine, event);

            let now = sounding(engine.calls());
            if keys.context().is_mono() {
                prop_assert!(now.len() <= 1, "mono with {:?} sounding after {:?}", now, event);
            }
            if !keys.context().is_hold() {
                // Notes equal key indices at octave 0.
                for note in &now {
                    prop_assert!(down.contains(note), "note {} stuck after {:?}", note, event);
                }
            }

            let mut from_router: Vec<u8> = keys.sounding_notes().collect();
            from_router.sort_unstable();
            let mut from_engine = now;
            from_engine.sort_unstable();
            prop_assert_eq!(from_router, from_engine);
        }
    }

    /// In poly mode without hold, a press followed by its release produces
    /// exactly one start and one stop of the same note.
    #[test]
    fn poly_press_release_pairs(key in 0u8..=127, octave_ups in 0usize..3) {
        let mut keys = KeyRouter::new();
        for _ in 0..octave_ups {
            keys.octave_up();
        }
        let mut engine = RecordingEngine::new();
        let outcome = keys.key_pressed(key, &mut engine);
        keys.key_released(key, &mut engine);

        match outcome.note {
            Some(note) => {
                prop_assert_eq!(
                    engine.calls(),
                    &[
                        EngineCall::PlayNote { note, velocity: 127 },
                        EngineCall::StopNote { note },
                    ]
                );
            }
            None => prop_assert!(engine.calls().is_empty()),
        }
    }

    /// Engine and router agree on what is sounding after any poly sequence.
    #[test]
    fn poly_router_matches_engine(events in key_events(80)) {
        let mut keys = KeyRouter::new();
        let mut engine = RecordingEngine::new();
        for event in events {
            apply(&mut keys, &mut engine, event);
        }
        let mut from_router: Vec<u8> = keys.sounding_notes().collect();
        from_router.sort_unstable();
        let mut from_engine = sounding(engine.calls());
        from_engine.sort_unstable();
        prop_assert_eq!(from_router, from_engine);
    }

    /// Every factory control writes finite values for any raw position.
    #[test]
    fn factory_writes_are_finite(raw in -1.0f32..2.0) {
        let mut params = ParameterRouter::with_bindings(factory_bindings());
        let mut engine = RecordingEngine::new();
        let ids: Vec<_> = params.bindings().map(|(id, _)| id.clone()).collect();
        for id in ids {
            let change = params.update(id.as_str(), raw, &mut engine);
            prop_assert!(change.is_some());
        }
        for (param, value) in engine.param_writes() {
            prop_assert!(value.is_finite(), "{param} = {value}");
        }
    }
}
