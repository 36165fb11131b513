//! Poacher scheduling and behavior.
//!
//! [`PoacherAi`] owns the spawn schedule and the modifiers helpers install
//! (speed factor, passive damage). [`poacher_system`] drives every live
//! poacher through entering, seeking, and the two terminal exits.

use hecs::{Entity, World};
use log::{debug, info};
use rand::Rng;
use terrarium_logic::geometry::{ease_sine_out, Vec2, SUBSTRATE_TOP};
use terrarium_logic::levels::PoacherConfig;

use crate::components::{
    roll_range, Animal, Countdown, DamageOutcome, DeathCause, Movement, Poacher, PoacherState,
    Position, Wander, CAPTURE_RADIUS, ENTER_SECS, EXIT_Y, SPAWN_X_MAX, SPAWN_X_MIN, SPAWN_Y,
};
use crate::events::{Outbox, SimEvent};

/// Fraction of the spawn period before the first attempt.
pub const FIRST_SPAWN_FRACTION: f32 = 0.6;
/// Poachers stop just above the substrate after entering.
pub const ENTER_STOP_OFFSET: f32 = 10.0;

/// Spawn scheduler and helper-installed modifiers for one level
#[derive(Debug, Clone)]
pub struct PoacherAi {
    config: Option<PoacherConfig>,
    first_attempt: Option<Countdown>,
    spawn_timer: Option<Countdown>,
    speed_multiplier: f32,
    auto_damage_interval_ms: u32,
}

impl PoacherAi {
    /// `None` disables poachers for the level.
    pub fn new(config: Option<PoacherConfig>) -> Self {
        let first_attempt = config.map(|cfg| {
            let period = cfg.frequency_secs();
            Countdown {
                interval: period,
                remaining: period * FIRST_SPAWN_FRACTION,
            }
        });
        let spawn_timer = config.map(|cfg| {
            let period = cfg.frequency_secs();
            Countdown {
                interval: period,
                remaining: period,
            }
        });
        Self {
            config,
            first_attempt,
            spawn_timer,
            speed_multiplier: 1.0,
            auto_damage_interval_ms: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn auto_damage_interval_ms(&self) -> u32 {
        self.auto_damage_interval_ms
    }

    /// Speed factor for every poacher, current and future.
    pub fn set_speed_multiplier(&mut self, world: &mut World, factor: f32) {
        self.speed_multiplier = factor;
        for (_, poacher) in world.query_mut::<&mut Poacher>() {
            poacher.set_speed_multiplier(factor);
        }
    }

    /// Passive damage period for every poacher, current and future. 0 disables.
    pub fn set_auto_damage_interval(&mut self, world: &mut World, interval_ms: u32) {
        self.auto_damage_interval_ms = interval_ms;
        for (_, poacher) in world.query_mut::<&mut Poacher>() {
            if !poacher.is_terminal() {
                poacher.set_auto_damage_interval(interval_ms);
            }
        }
    }

    /// Poachers on the field, including ones still playing their exit.
    pub fn active_count(world: &World) -> usize {
        world.query::<&Poacher>().iter().count()
    }

    /// Advance the spawn schedule, spawning when a timer fires and the
    /// level allows it. The one-shot early attempt runs alongside the
    /// periodic one, so attempts land at 0.6f, f, 2f, 3f.
    pub fn update(
        &mut self,
        world: &mut World,
        rng: &mut impl Rng,
        delta_seconds: f32,
        outbox: &mut Outbox,
    ) -> Option<Entity> {
        let first_fired = match self.first_attempt.as_mut() {
            Some(timer) => timer.tick(delta_seconds),
            None => false,
        };
        if first_fired {
            self.first_attempt = None;
        }
        let periodic_fired = self.spawn_timer.as_mut()?.tick(delta_seconds);
        if !first_fired && !periodic_fired {
            return None;
        }
        self.try_spawn(world, rng, outbox)
    }

    /// Spawn a poacher unless the cap is reached or nothing is left to steal.
    pub fn try_spawn(
        &mut self,
        world: &mut World,
        rng: &mut impl Rng,
        outbox: &mut Outbox,
    ) -> Option<Entity> {
        let config = self.config?;
        if Self::active_count(world) >= config.max_overlapping {
            return None;
        }
        let target = pick_target(world)?;

        let mut poacher = Poacher::new(&config, SUBSTRATE_TOP - ENTER_STOP_OFFSET);
        poacher.set_speed_multiplier(self.speed_multiplier);
        poacher.set_auto_damage_interval(self.auto_damage_interval_ms);
        poacher.set_target(target);

        let x = roll_range(rng, SPAWN_X_MIN, SPAWN_X_MAX);
        let entity = world.spawn((Position::new(x, SPAWN_Y), poacher));

        info!("Poacher spawned at x={:.0}, hunting {:?}", x, target);
        outbox.emit(SimEvent::PoacherSpawned {
            poacher: entity,
            target: Some(target),
        });
        Some(entity)
    }
}

/// The living animal with the highest coin value. Ties go to the first found.
pub fn pick_target(world: &World) -> Option<Entity> {
    let mut best: Option<(Entity, u32)> = None;
    for (entity, animal) in world.query::<&Animal>().iter() {
        if !animal.alive {
            continue;
        }
        let value = animal.config().coin_value;
        if best.map_or(true, |(_, v)| value > v) {
            best = Some((entity, value));
        }
    }
    best.map(|(entity, _)| entity)
}

fn target_is_valid(world: &World, target: Entity) -> bool {
    world
        .get::<&Animal>(target)
        .map(|animal| animal.alive)
        .unwrap_or(false)
}

fn ease_quad_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Apply one click of damage to `poacher`. Returns the outcome, or `None`
/// if the handle no longer names a poacher.
pub fn damage_poacher(
    world: &mut World,
    poacher: Entity,
    outbox: &mut Outbox,
) -> Option<DamageOutcome> {
    let mut query = world.query_one::<(&mut Poacher, &Position)>(poacher).ok()?;
    let (state, pos) = query.get()?;
    let outcome = state.take_damage(pos.0.y);
    if outcome == DamageOutcome::Repelled {
        info!("Poacher {:?} repelled", poacher);
        outbox.emit(SimEvent::PoacherRepelled { poacher });
    }
    Some(outcome)
}

/// Drive every poacher for one tick
pub fn poacher_system(world: &mut World, delta_seconds: f32, outbox: &mut Outbox) {
    let poachers: Vec<Entity> = world
        .query::<&Poacher>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in poachers {
        // Passive damage first, so a guard can repel before a grab lands
        let auto_hit = match world.get::<&mut Poacher>(entity) {
            Ok(mut poacher) => poacher
                .auto_damage
                .as_mut()
                .map_or(false, |timer| timer.tick(delta_seconds)),
            Err(_) => continue,
        };
        if auto_hit {
            damage_poacher(world, entity, outbox);
        }

        let (state, target) = match world.get::<&Poacher>(entity) {
            Ok(poacher) => (poacher.state, poacher.target),
            Err(_) => continue,
        };

        match state {
            PoacherState::Entering => enter(world, entity, delta_seconds),
            PoacherState::Seeking => seek(world, entity, target, delta_seconds, outbox),
            PoacherState::Grabbing | PoacherState::Retreating => {
                exit(world, entity, target, delta_seconds, outbox)
            }
        }
    }
}

/// Finish the exits already under way and nothing else. Runs after the
/// level resolves so a grab in progress still ends with the animal gone.
pub fn poacher_exit_system(world: &mut World, delta_seconds: f32, outbox: &mut Outbox) {
    let exiting: Vec<(Entity, Option<Entity>)> = world
        .query::<&Poacher>()
        .iter()
        .filter(|(_, poacher)| poacher.is_terminal())
        .map(|(entity, poacher)| (entity, poacher.target))
        .collect();

    for (entity, target) in exiting {
        exit(world, entity, target, delta_seconds, outbox);
    }
}

fn enter(world: &mut World, entity: Entity, delta_seconds: f32) {
    let Ok(mut query) = world.query_one::<(&mut Poacher, &mut Position)>(entity) else {
        return;
    };
    let Some((poacher, pos)) = query.get() else {
        return;
    };
    poacher.state_time += delta_seconds;
    let t = poacher.state_time / ENTER_SECS;
    let span = poacher.enter_to_y - poacher.enter_from_y;
    pos.0.y = poacher.enter_from_y + span * ease_sine_out(t);
    if t >= 1.0 {
        poacher.state = PoacherState::Seeking;
        poacher.state_time = 0.0;
    }
}

fn seek(
    world: &mut World,
    entity: Entity,
    target: Option<Entity>,
    delta_seconds: f32,
    outbox: &mut Outbox,
) {
    // A lost target leaves the poacher holding position
    let Some(target) = target.filter(|t| target_is_valid(world, *t)) else {
        if let Ok(mut poacher) = world.get::<&mut Poacher>(entity) {
            poacher.target = None;
        }
        return;
    };
    let Ok(target_pos) = world.get::<&Position>(target).map(|p| p.0) else {
        return;
    };

    let grabbed = {
        let Ok(mut query) = world.query_one::<(&mut Poacher, &mut Position)>(entity) else {
            return;
        };
        let Some((poacher, pos)) = query.get() else {
            return;
        };
        poacher.state_time += delta_seconds;
        if pos.0.distance(&target_pos) < CAPTURE_RADIUS {
            poacher.begin_grab(pos.0.y)
        } else {
            let heading = (target_pos - pos.0).normalize();
            pos.0 = pos.0 + heading * (poacher.speed() * delta_seconds);
            false
        }
    };

    if grabbed {
        if let Ok(mut animal) = world.get::<&mut Animal>(target) {
            animal.kill();
        }
        // Carried off: no more wandering or seeking
        let _ = world.remove_one::<Movement>(target);
        let _ = world.remove_one::<Wander>(target);
        info!("Poacher {:?} grabbed animal {:?}", entity, target);
        outbox.emit(SimEvent::AnimalGrabbed {
            poacher: entity,
            animal: target,
        });
    }
}

fn exit(
    world: &mut World,
    entity: Entity,
    target: Option<Entity>,
    delta_seconds: f32,
    outbox: &mut Outbox,
) {
    let (y, finished, grabbing) = {
        let Ok(mut query) = world.query_one::<(&mut Poacher, &mut Position)>(entity) else {
            return;
        };
        let Some((poacher, pos)) = query.get() else {
            return;
        };
        let Some(duration) = poacher.exit_duration() else {
            return;
        };
        poacher.state_time += delta_seconds;
        let t = poacher.state_time / duration;
        pos.0.y = poacher.exit_from_y + (EXIT_Y - poacher.exit_from_y) * ease_quad_in(t);
        (
            pos.0.y,
            t >= 1.0,
            poacher.state == PoacherState::Grabbing,
        )
    };

    let carried = if grabbing { target } else { None };
    if let Some(animal) = carried {
        if let Ok(mut pos) = world.get::<&mut Position>(animal) {
            pos.0 = Vec2::new(pos.0.x, y);
        }
    }

    if !finished {
        return;
    }

    if let Some(animal) = carried {
        let species = world.get::<&Animal>(animal).map(|a| a.species).ok();
        if let Some(species) = species {
            outbox.emit(SimEvent::AnimalDied {
                animal,
                species,
                cause: DeathCause::Poached,
            });
            let _ = world.despawn(animal);
        }
    }
    debug!("Poacher {:?} left the field", entity);
    let _ = world.despawn(entity);
}
