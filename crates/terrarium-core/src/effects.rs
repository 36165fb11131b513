//! Helper pet effect registry.
//!
//! Every owned helper installs exactly one effect, chosen by its
//! [`HelperEffect`] variant. Periodic effects arm a timer on the pet entity;
//! passive effects bind a hook slot or tune the poacher AI. Hooks hold the pet
//! as a non-owning handle and fall back to the identity once it is gone.

use hecs::{Entity, World};
use log::debug;
use rand::Rng;
use terrarium_logic::geometry::Vec2;
use terrarium_logic::helpers::{HelperEffect, HelperRole};

use crate::components::{Countdown, HelperPet, Position};
use crate::systems::PoacherAi;

#[derive(Debug, Clone, Copy)]
struct CoinBoost {
    pet: Entity,
    radius: f32,
    multiplier: f32,
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    pet: Entity,
    value: f32,
}

/// Single-slot rule modifications installed by passive helpers
#[derive(Debug, Clone, Default)]
pub struct EffectHooks {
    coin_boost: Option<CoinBoost>,
    nutrition: Option<Binding>,
    breeder: Option<Binding>,
}

impl EffectHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_coin_boost(&mut self, pet: Entity, radius: f32, multiplier: f32) {
        self.coin_boost = Some(CoinBoost {
            pet,
            radius,
            multiplier,
        });
    }

    pub fn bind_nutrition(&mut self, pet: Entity, multiplier: f32) {
        self.nutrition = Some(Binding {
            pet,
            value: multiplier,
        });
    }

    pub fn bind_breeder(&mut self, pet: Entity, chance: f32) {
        self.breeder = Some(Binding { pet, value: chance });
    }

    /// Multiplier for a coin dropped at `at`.
    pub fn coin_multiplier(&self, world: &World, at: Vec2) -> f32 {
        let Some(boost) = self.coin_boost else {
            return 1.0;
        };
        match world.get::<&Position>(boost.pet) {
            Ok(pos) if pos.0.distance(&at) < boost.radius => boost.multiplier,
            _ => 1.0,
        }
    }

    pub fn nutrition_multiplier(&self, world: &World) -> f32 {
        match self.nutrition {
            Some(binding) if world.contains(binding.pet) => binding.value,
            _ => 1.0,
        }
    }

    /// Roll the breeder chance after a successful feed.
    pub fn should_breed(&self, world: &World, rng: &mut impl Rng) -> bool {
        match self.breeder {
            Some(binding) if world.contains(binding.pet) => rng.gen::<f32>() < binding.value,
            _ => false,
        }
    }
}

/// Everything an installer may touch
pub struct InstallContext<'a> {
    pub world: &'a mut World,
    pub hooks: &'a mut EffectHooks,
    pub poacher_ai: &'a mut PoacherAi,
}

/// Installs one effect for the helper `pet`
pub type EffectInstaller = fn(&mut InstallContext<'_>, Entity, &HelperEffect);

/// Registry: the installer for each role.
pub fn installer_for(role: HelperRole) -> EffectInstaller {
    match role {
        HelperRole::AutoFeeder | HelperRole::CoinCollector | HelperRole::Scavenger => {
            install_periodic
        }
        HelperRole::Guard => install_guard,
        HelperRole::CoinBooster => install_coin_booster,
        HelperRole::FoodUpgrader => install_food_upgrader,
        HelperRole::Intimidator => install_intimidator,
        HelperRole::Breeder => install_breeder,
    }
}

/// Install the effect of the helper on `pet`. Does nothing if `pet` is not a
/// helper.
pub fn install_effect(ctx: &mut InstallContext<'_>, pet: Entity) {
    let effect = match ctx.world.get::<&HelperPet>(pet) {
        Ok(helper) => helper.effect(),
        Err(_) => return,
    };
    debug!("Installing {:?} for helper {:?}", effect.role(), pet);
    installer_for(effect.role())(ctx, pet, &effect);
}

fn install_periodic(ctx: &mut InstallContext<'_>, pet: Entity, effect: &HelperEffect) {
    let Some(period_ms) = effect.period_ms() else {
        return;
    };
    if let Ok(mut helper) = ctx.world.get::<&mut HelperPet>(pet) {
        helper.effect_timer = Some(Countdown::from_ms(period_ms));
    }
}

fn install_guard(ctx: &mut InstallContext<'_>, _pet: Entity, effect: &HelperEffect) {
    if let HelperEffect::Guard { damage_interval_ms } = *effect {
        ctx.poacher_ai.set_auto_damage_interval(ctx.world, damage_interval_ms);
    }
}

fn install_coin_booster(ctx: &mut InstallContext<'_>, pet: Entity, effect: &HelperEffect) {
    if let HelperEffect::CoinBooster {
        boost_radius,
        boost_multiplier,
    } = *effect
    {
        ctx.hooks.bind_coin_boost(pet, boost_radius, boost_multiplier);
    }
}

fn install_food_upgrader(ctx: &mut InstallContext<'_>, pet: Entity, effect: &HelperEffect) {
    if let HelperEffect::FoodUpgrader {
        nutrition_multiplier,
    } = *effect
    {
        ctx.hooks.bind_nutrition(pet, nutrition_multiplier);
    }
}

fn install_intimidator(ctx: &mut InstallContext<'_>, _pet: Entity, effect: &HelperEffect) {
    if let HelperEffect::Intimidator { slow_factor } = *effect {
        ctx.poacher_ai.set_speed_multiplier(ctx.world, slow_factor);
    }
}

fn install_breeder(ctx: &mut InstallContext<'_>, pet: Entity, effect: &HelperEffect) {
    if let HelperEffect::Breeder { breed_chance } = *effect {
        ctx.hooks.bind_breeder(pet, breed_chance);
    }
}
