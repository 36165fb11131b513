//! Terrarium Headless Simulation Harness
//!
//! Validates the static catalogs and plays whole sessions with a scripted
//! player. Runs entirely in-process: no rendering, no input devices.
//!
//! Usage:
//!   cargo run -p terrarium-simtest
//!   cargo run -p terrarium-simtest -- --verbose --seed 7
//!   cargo run -p terrarium-simtest -- --config terrarium.json

use log::{debug, info};
use terrarium_core::engine::TerrariumConfig;
use terrarium_core::persistence::{load_config, load_session, save_session};
use terrarium_core::prelude::*;
use terrarium_logic::animals::{cheapest_unlocked_cost, unlocked_species, Species};
use terrarium_logic::foods::{FoodKind, DEFAULT_FOOD};
use terrarium_logic::helpers::HelperKind;
use terrarium_logic::levels::{all_levels, level_config, EGG_PIECES, TOTAL_LEVELS};
use terrarium_logic::outcome::LevelOutcome;

const TICK: f32 = 1.0 / 30.0;
/// Give up on a level after this much simulated time.
const LEVEL_TIME_LIMIT_SECS: f64 = 1800.0;
/// Seconds between scripted clicks on the same poacher.
const CLICK_COOLDOWN_SECS: f32 = 0.25;
/// Herd size the scripted player builds before saving for eggs.
const TARGET_HERD: usize = 6;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    config: TerrariumConfig,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        verbose: false,
        config: TerrariumConfig::default(),
    };
    let mut seed_override = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => options.verbose = true,
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|e| format!("bad --seed {}: {}", value, e))?;
                seed_override = Some(seed);
            }
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                options.config = load_config(&path).map_err(|e| format!("{}: {}", path, e))?;
            }
            other => return Err(format!("unknown argument {}", other)),
        }
    }
    if let Some(seed) = seed_override {
        options.config.seed = seed;
    }
    Ok(options)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    let verbose = options.verbose;
    println!("=== Terrarium Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Static catalogs
    results.extend(validate_catalogs(verbose));

    // 2. Level table
    results.extend(validate_levels(verbose));

    // 3. Roster persistence
    results.extend(validate_persistence(verbose));

    // 4. Scripted session
    results.extend(run_autoplay(&options.config, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Catalogs ─────────────────────────────────────────────────────────

fn validate_catalogs(verbose: bool) -> Vec<TestResult> {
    println!("--- Catalogs ---");
    let mut results = Vec::new();

    let bad_species: Vec<&str> = Species::ALL
        .iter()
        .map(|s| s.config())
        .filter(|c| {
            c.cost == 0 || c.coin_value == 0 || c.feeds_to_grow == 0 || c.hunger_rate <= 0.0
        })
        .map(|c| c.key)
        .collect();
    results.push(TestResult {
        name: "species_tuning_positive".into(),
        passed: bad_species.is_empty(),
        detail: if bad_species.is_empty() {
            format!("{} species", Species::ALL.len())
        } else {
            format!("bad tuning: {}", bad_species.join(", "))
        },
    });

    let keys_roundtrip = Species::ALL
        .iter()
        .all(|s| Species::from_key(s.key()) == Some(*s))
        && HelperKind::ALL
            .iter()
            .all(|k| HelperKind::from_key(k.config().key) == Some(*k));
    results.push(TestResult {
        name: "catalog_keys_unique".into(),
        passed: keys_roundtrip,
        detail: "species and helper keys resolve back to themselves".into(),
    });

    results.push(TestResult {
        name: "default_food_free".into(),
        passed: DEFAULT_FOOD.config().cost == 0 && DEFAULT_FOOD.is_unlocked(1),
        detail: format!("{} costs {}", DEFAULT_FOOD.config().name, DEFAULT_FOOD.config().cost),
    });

    let unlocked_foods: Vec<usize> = (1..=TOTAL_LEVELS)
        .map(|level| FoodKind::ALL.iter().filter(|f| f.is_unlocked(level)).count())
        .collect();
    results.push(TestResult {
        name: "foods_unlock_monotonic".into(),
        passed: unlocked_foods.windows(2).all(|w| w[0] <= w[1]),
        detail: format!("unlocked per level: {:?}", unlocked_foods),
    });

    let periodic_ok = HelperKind::ALL
        .iter()
        .filter_map(|k| k.config().effect.period_ms())
        .all(|ms| ms > 0);
    results.push(TestResult {
        name: "helper_periods_positive".into(),
        passed: periodic_ok,
        detail: format!("{} helper pets", HelperKind::ALL.len()),
    });

    if verbose {
        for kind in HelperKind::ALL {
            let cfg = kind.config();
            println!("  {:<14} {:?}: {}", cfg.name, cfg.effect.role(), cfg.description);
        }
    }

    results
}

// ── 2. Levels ───────────────────────────────────────────────────────────

fn validate_levels(verbose: bool) -> Vec<TestResult> {
    println!("--- Levels ---");
    let mut results = Vec::new();
    let levels = all_levels();

    results.push(TestResult {
        name: "level_count".into(),
        passed: levels.len() == TOTAL_LEVELS as usize,
        detail: format!("{} levels", levels.len()),
    });

    let numbering_ok = levels
        .iter()
        .enumerate()
        .all(|(i, l)| l.level == i as u32 + 1);
    results.push(TestResult {
        name: "level_numbering".into(),
        passed: numbering_ok,
        detail: "levels numbered 1..N in order".into(),
    });

    results.push(TestResult {
        name: "level_one_safe".into(),
        passed: level_config(1).poacher.is_none(),
        detail: "no poachers on level 1".into(),
    });

    let affordable_start: Vec<u32> = levels
        .iter()
        .filter(|l| cheapest_unlocked_cost(l.level).map_or(true, |cost| l.start_coins < cost))
        .map(|l| l.level)
        .collect();
    results.push(TestResult {
        name: "level_start_affordable".into(),
        passed: affordable_start.is_empty(),
        detail: if affordable_start.is_empty() {
            "every level can buy its cheapest animal".into()
        } else {
            format!("levels too poor to start: {:?}", affordable_start)
        },
    });

    let eggs_rising = levels.iter().all(|l| {
        l.egg_costs.len() == EGG_PIECES && l.egg_costs.windows(2).all(|w| w[0] <= w[1])
    });
    results.push(TestResult {
        name: "egg_costs_rising".into(),
        passed: eggs_rising,
        detail: "egg pieces get pricier within each level".into(),
    });

    let poachers_ok = levels.iter().filter_map(|l| l.poacher).all(|p| {
        p.clicks_to_repel > 0 && p.frequency_ms > 0 && p.speed > 0.0 && p.max_overlapping > 0
    });
    results.push(TestResult {
        name: "poacher_tuning_positive".into(),
        passed: poachers_ok,
        detail: "clicks, frequency, speed and cap all positive".into(),
    });

    if verbose {
        for l in levels {
            println!(
                "  level {}: {} coins, eggs {:?}, total {}",
                l.level,
                l.start_coins,
                l.egg_costs,
                l.total_egg_cost()
            );
        }
    }

    results
}

// ── 3. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut roster = PetRoster::new();
    roster.add(HelperKind::Snail);
    roster.add(HelperKind::Mantis);
    let session = GameSession::resume(11, 3, roster.clone());

    let mut buffer = Vec::new();
    let outcome = save_session(&mut buffer, &session)
        .and_then(|_| load_session(buffer.as_slice()));
    let (passed, detail) = match outcome {
        Ok(loaded) if loaded.level() == 3 && loaded.roster() == &roster => {
            (true, format!("{} bytes", buffer.len()))
        }
        Ok(loaded) => (
            false,
            format!("loaded level {} roster {:?}", loaded.level(), loaded.roster()),
        ),
        Err(e) => (false, e.to_string()),
    };
    results.push(TestResult {
        name: "roster_roundtrip".into(),
        passed,
        detail,
    });

    let json = serde_json::to_string(&TerrariumConfig::default());
    let parsed = json
        .as_ref()
        .ok()
        .and_then(|text| serde_json::from_str::<TerrariumConfig>(text).ok());
    results.push(TestResult {
        name: "config_json_roundtrip".into(),
        passed: parsed == Some(TerrariumConfig::default()),
        detail: json.unwrap_or_else(|e| e.to_string()),
    });

    results
}

// ── 4. Autoplay ─────────────────────────────────────────────────────────

#[derive(Default)]
struct LevelStats {
    outcomes: usize,
    coins_collected: u32,
    food_dropped: usize,
    animals_bought: usize,
    deaths: usize,
    poachers: usize,
    poachers_repelled: usize,
    balance_mismatch: bool,
}

/// Scripted player: feeds the hungry, picks up every coin, fights poachers,
/// grows a herd and then buys the egg pieces in order.
struct Autoplayer {
    click_cooldown: f32,
}

impl Autoplayer {
    fn new() -> Self {
        Self { click_cooldown: 0.0 }
    }

    fn act(&mut self, engine: &mut TerrariumEngine, stats: &mut LevelStats) {
        let hungry = engine.hungry_animals();
        if engine.food_count() < hungry.len() {
            if let Some((_, at)) = hungry.get(engine.food_count()) {
                if engine.drop_food(at.x, at.y).is_some() {
                    stats.food_dropped += 1;
                }
            }
        }

        for (coin, _, _) in engine.coins_on_field() {
            engine.click_coin(coin);
        }

        self.click_cooldown -= TICK;
        if self.click_cooldown <= 0.0 {
            if let Some(poacher) = engine.active_poachers().first().copied() {
                engine.click_poacher(poacher);
                self.click_cooldown = CLICK_COOLDOWN_SECS;
            }
        }

        let level = engine.level().level;
        let herd = engine.living_animal_count();
        if herd < TARGET_HERD {
            let cheapest = unlocked_species(level).min_by_key(|s| s.config().cost);
            if let Some(species) = cheapest {
                let affordable = engine.coins() >= species.config().cost;
                if affordable && engine.buy_animal(species).is_some() {
                    stats.animals_bought += 1;
                }
            }
            return;
        }

        let next_piece = engine.ledger().egg_pieces().iter().position(|bought| !bought);
        if let Some(index) = next_piece {
            if engine.level().egg_cost(index).is_some_and(|cost| engine.coins() >= cost) {
                engine.buy_egg_piece(index);
            }
        }
    }
}

fn play_level(engine: &mut TerrariumEngine, stats: &mut LevelStats) -> Option<LevelOutcome> {
    let mut player = Autoplayer::new();
    let mut outcome = None;

    while engine.sim_time() < LEVEL_TIME_LIMIT_SECS {
        player.act(engine, stats);
        engine.update(TICK);

        let mut last_balance = None;
        for event in engine.drain_events() {
            match event {
                SimEvent::CoinCollected { value, .. } => stats.coins_collected += value,
                SimEvent::CoinsChanged { balance } => last_balance = Some(balance),
                SimEvent::AnimalDied { species, cause, .. } => {
                    debug!("{:?} died: {:?}", species, cause);
                    stats.deaths += 1;
                }
                SimEvent::PoacherSpawned { .. } => stats.poachers += 1,
                SimEvent::PoacherRepelled { .. } => stats.poachers_repelled += 1,
                SimEvent::LevelEnded(o) => {
                    stats.outcomes += 1;
                    outcome = Some(o);
                }
                _ => {}
            }
        }
        if last_balance.is_some_and(|b| b != engine.coins()) {
            stats.balance_mismatch = true;
        }

        if engine.is_resolved() {
            // A few more ticks prove the level stays frozen
            for _ in 0..30 {
                engine.update(TICK);
                stats.outcomes += engine
                    .drain_events()
                    .iter()
                    .filter(|e| matches!(e, SimEvent::LevelEnded(_)))
                    .count();
            }
            break;
        }
    }
    outcome
}

fn run_autoplay(config: &TerrariumConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Autoplay (seed {}) ---", config.seed);
    let mut results = Vec::new();

    let mut roster = PetRoster::new();
    for kind in &config.owned_helpers {
        roster.add(*kind);
    }
    let mut session = GameSession::resume(config.seed, config.level.max(1), roster);
    session.set_starter_species(config.starter_species);

    let mut levels_won = 0;
    loop {
        let level = session.level();
        let mut stats = LevelStats::default();
        let engine = session.start_level();
        let outcome = play_level(engine, &mut stats);
        let sim_time = engine.sim_time();

        info!(
            "Level {}: {:?} after {:.0}s ({} coins collected, {} bought, {} died, {}/{} poachers repelled)",
            level,
            outcome,
            sim_time,
            stats.coins_collected,
            stats.animals_bought,
            stats.deaths,
            stats.poachers_repelled,
            stats.poachers,
        );

        results.push(TestResult {
            name: format!("level_{}_resolves", level),
            passed: outcome.is_some(),
            detail: format!("{:?} after {:.0}s", outcome, sim_time),
        });
        results.push(TestResult {
            name: format!("level_{}_single_outcome", level),
            passed: stats.outcomes == 1,
            detail: format!("{} LevelEnded event(s)", stats.outcomes),
        });
        results.push(TestResult {
            name: format!("level_{}_balance_events", level),
            passed: !stats.balance_mismatch,
            detail: "CoinsChanged always matches the ledger".into(),
        });
        results.push(TestResult {
            name: format!("level_{}_poachers_bounded", level),
            passed: stats.poachers_repelled <= stats.poachers,
            detail: format!("{} spawned, {} repelled", stats.poachers, stats.poachers_repelled),
        });
        if verbose {
            println!(
                "  level {}: {} food dropped, {} coins collected",
                level, stats.food_dropped, stats.coins_collected
            );
        }

        session.poll_outcome();
        match session.phase() {
            SessionPhase::ChoosingPet => {
                levels_won += 1;
                let choices = session.pet_choices(terrarium_core::session::DEFAULT_PET_CHOICES);
                match choices.first() {
                    Some(kind) => {
                        session.choose_pet(*kind);
                    }
                    None => {
                        session.continue_without_pet();
                    }
                }
            }
            SessionPhase::Finished => {
                levels_won += 1;
                break;
            }
            SessionPhase::GameOver | SessionPhase::Playing => break,
        }
    }

    results.push(TestResult {
        name: "autoplay_wins_level_one".into(),
        passed: levels_won >= 1,
        detail: format!(
            "{} level(s) won, roster {:?}",
            levels_won,
            session.roster().owned()
        ),
    });

    results
}
