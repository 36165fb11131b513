//! Systems - logic that operates on components

mod cleanup;
mod coins;
mod feeding;
mod food;
mod foraging;
mod helpers;
mod hunger;
mod movement;
mod poacher;
mod wandering;

pub use cleanup::*;
pub use coins::*;
pub use feeding::*;
pub use food::*;
pub use foraging::*;
pub use helpers::*;
pub use hunger::*;
pub use movement::*;
pub use poacher::*;
pub use wandering::*;
