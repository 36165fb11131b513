//! Pure terrarium rules for the terrarium simulation.
//!
//! This crate holds everything that does not need an entity world: static
//! catalogs, the coin ledger and level outcome rules. Functions take plain
//! data and return results, so they are unit-testable on their own and
//! shared by the engine and the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`animals`] | Species catalog (cost, income, hunger, growth) |
//! | [`economy`] | Coin balance and egg piece ledger with change notifications |
//! | [`foods`] | Food catalog (cost, nutrition, crawl speed) |
//! | [`geometry`] | 2D vectors, play-field layout, easing curves |
//! | [`helpers`] | Helper pet catalog and typed effect payloads |
//! | [`levels`] | Per-level starting coins, egg prices, poacher tuning |
//! | [`outcome`] | Win/loss latching with delayed reporting |

pub mod animals;
pub mod economy;
pub mod foods;
pub mod geometry;
pub mod helpers;
pub mod levels;
pub mod outcome;
