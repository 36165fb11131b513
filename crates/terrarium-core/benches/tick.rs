//! Performance benchmarks for the engine tick

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use terrarium_core::prelude::*;
use terrarium_logic::animals::Species;
use terrarium_logic::geometry::{Rect, SUBSTRATE_MARGIN};
use terrarium_logic::helpers::HelperKind;

fn populated_engine(animals: usize) -> TerrariumEngine {
    let mut engine = TerrariumEngine::new(TerrariumConfig {
        seed: 42,
        level: 3,
        starter_species: None,
        owned_helpers: HelperKind::ALL.to_vec(),
    });

    let area = Rect::substrate().inset(SUBSTRATE_MARGIN);
    for i in 0..animals {
        let t = i as f32 / animals.max(1) as f32;
        let x = area.min.x + area.width() * t;
        let y = area.min.y + area.height() * ((i % 7) as f32 / 7.0);
        let species = Species::ALL[i % 3];
        engine.world.spawn((
            Position::new(x, y),
            Animal::new(species, 1.0),
            CoinTimer { remaining: 1.0 },
            Wander::new(
                (WANDER_SPEED_MIN, WANDER_SPEED_MAX),
                (WANDER_PAUSE_MIN, WANDER_PAUSE_MAX),
                area,
            ),
        ));
        if i % 4 == 0 {
            engine.drop_food(x, y);
        }
    }
    engine
}

fn benchmark_engine_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_tick");

    for population in [10, 100, 500].iter() {
        let mut engine = populated_engine(*population);

        // Warm up
        for _ in 0..60 {
            engine.update(1.0 / 60.0);
        }

        group.bench_with_input(
            BenchmarkId::new("animals", population),
            population,
            |b, _| {
                b.iter(|| {
                    engine.update(1.0 / 60.0);
                    engine.drain_events()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_engine_tick);
criterion_main!(benches);
