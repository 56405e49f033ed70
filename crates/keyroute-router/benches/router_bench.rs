//! Criterion benchmarks for keyroute-router event handling
//!
//! Run with: cargo bench -p keyroute-router

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use keyroute_core::RecordingEngine;
use keyroute_router::bindings::controls;
use keyroute_router::{Controller, InboundEvent, KeyRouter, ParameterRouter, factory_bindings};
use keyroute_synth::Synth;

const EVENT_COUNTS: &[usize] = &[16, 64, 256, 1024];

// ============================================================================
// Key router benchmarks
// ============================================================================

fn bench_key_router_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("KeyRouter");

    let modes = [
        ("Poly", false, false),
        ("Mono", true, false),
        ("Hold", false, true),
        ("MonoHold", true, true),
    ];

    for (name, mono, hold) in modes {
        for &count in EVENT_COUNTS {
            group.bench_with_input(BenchmarkId::new(name, count), &count, |b, &count| {
                let mut keys = KeyRouter::new();
                let mut engine = Synth::new();
                keys.set_mono_mode(mono, &mut engine);
                keys.set_hold_mode(hold, &mut engine);
                b.iter(|| {
                    for i in 0..count {
                        let key = (i % 25) as u8;
                        keys.key_pressed(black_box(key), &mut engine);
                        keys.key_released(black_box(key), &mut engine);
                    }
                    keys.turn_off_held_keys(&mut engine);
                })
            });
        }
    }

    group.finish();
}

// ============================================================================
// Parameter router benchmarks
// ============================================================================

fn bench_parameter_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("ParameterRouter");

    let cases = [
        ("Linear", "osc_mix"),
        ("Log", "cutoff"),
        ("Stepped", "osc1_semitones"),
        ("FanOut", "crush_amount"),
        ("AllVoices", "attack"),
    ];

    for (name, control) in cases {
        group.bench_function(name, |b| {
            let mut params = ParameterRouter::with_bindings(factory_bindings());
            let mut engine = Synth::new();
            let mut raw = 0.0f32;
            b.iter(|| {
                raw = (raw + 0.013) % 1.0;
                black_box(params.update(black_box(control), raw, &mut engine))
            })
        });
    }

    group.finish();
}

// ============================================================================
// Controller benchmarks
// ============================================================================

fn bench_controller_mixed_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("Controller");

    for &count in EVENT_COUNTS {
        let events: Vec<InboundEvent> = (0..count)
            .map(|i| match i % 6 {
                0 => InboundEvent::KeyPressed((i % 25) as u8),
                1 => InboundEvent::KeyReleased(((i - 1) % 25) as u8),
                2 => InboundEvent::ControlChanged {
                    control: controls::CUTOFF,
                    value: (i % 100) as f32 / 100.0,
                },
                3 => InboundEvent::Toggle(controls::DELAY),
                4 => InboundEvent::ControlChanged {
                    control: controls::RELEASE,
                    value: 0.3,
                },
                _ => InboundEvent::SegmentSelected {
                    control: controls::LFO_WAVEFORM,
                    index: i % 4,
                },
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("Synth", count),
            &events,
            |b, events| {
                let mut controller = Controller::new(Synth::new());
                controller.apply_defaults();
                b.iter(|| {
                    for event in events {
                        black_box(controller.handle(event.clone()));
                    }
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("Recording", count),
            &events,
            |b, events| {
                b.iter(|| {
                    let mut controller = Controller::new(RecordingEngine::new());
                    for event in events {
                        controller.handle(event.clone());
                    }
                    black_box(controller.into_engine().take().len())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_key_router_modes,
    bench_parameter_updates,
    bench_controller_mixed_events,
);

criterion_main!(benches);
