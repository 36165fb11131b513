//! Terrarium Core - Terrarium Simulation Engine
//!
//! An ECS-based simulation of a pet terrarium: animals that get hungry, grow
//! up and drop coins, food that crawls around, helper pets bending the rules,
//! and poachers reaching in to steal the most valuable animal.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Animals, food, coins, helper pets, poachers
//! - **Components**: Pure data attached to entities (Position, Animal, Coin, etc.)
//! - **Systems**: Logic that queries and updates components
//!
//! Systems never mutate other entity kinds directly; they queue
//! [`events::Intent`]s that the engine applies at the end of each tick.
//!
//! # Example
//!
//! ```rust,no_run
//! use terrarium_core::prelude::*;
//!
//! let mut engine = TerrariumEngine::new(TerrariumConfig::default());
//!
//! // Run simulation
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//!     for event in engine.drain_events() {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod components;
pub mod effects;
pub mod engine;
pub mod events;
pub mod persistence;
pub mod session;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{TerrariumConfig, TerrariumEngine};
    pub use crate::events::SimEvent;
    pub use crate::session::{GameSession, PetRoster, SessionPhase};
}
