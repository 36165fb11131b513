//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities. Behavior that
//! concerns a single component lives in its methods; everything that spans
//! entities lives in systems.

mod common;
mod creatures;
mod helpers;
mod threats;

pub use common::*;
pub use creatures::*;
pub use helpers::*;
pub use threats::*;
