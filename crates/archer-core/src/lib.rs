//! # Archer Core
//!
//! Simulation core for a top-down arcade archer game.
//!
//! The player's archer stands in a rectangular arena, aims with the pointer
//! and walks with the direction keys. Enemies spawn on the arena edge, walk
//! in until the player is in range, then shoot. Destroying every enemy of
//! the session wins; taking one enemy projectile loses.
//!
//! ## Architecture
//!
//! Entity behaviour follows the Entity-Plugin-Resolver pattern:
//!
//! - **Entities**: the player, enemies, projectiles and obstacles, stored in
//!   an [`Arena`](arena::Arena)
//! - **Plugins**: per-kind update hooks that read a
//!   [`WorldView`](world_view::WorldView) and emit commands
//! - **Resolvers**: apply commands: motion, combat, lifecycle
//!
//! [`Simulation`](simulation::Simulation) drives ticks, spawning, scoring
//! and the win/lose states, and reports changes as
//! [`Signal`](signal::Signal)s. Rendering and input capture are left to the
//! host.
//!
//! ## Usage
//!
//! ```
//! use archer_core::config::SimulationConfig;
//! use archer_core::input::InputEvent;
//! use archer_core::simulation::Simulation;
//! use glam::DVec2;
//! use std::time::Duration;
//!
//! let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
//! sim.handle_input(InputEvent::PointerMoved(DVec2::new(300.0, 0.0)));
//! sim.handle_input(InputEvent::FireClicked);
//! sim.step(Duration::from_millis(30));
//!
//! for signal in sim.drain_signals() {
//!     println!("{signal:?}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod input;
pub mod output;
pub mod plugin;
pub mod plugins;
pub mod resolver;
pub mod roster;
pub mod scoring;
pub mod signal;
pub mod simulation;
pub mod spawner;
pub mod world_view;

#[cfg(test)]
mod tests;

pub use arena::{Arena, Bounds};
pub use config::SimulationConfig;
pub use entity::{Entity, EntityId, EntityTag};
pub use error::{ArenaError, ConfigError, SimError};
pub use input::{Direction, InputEvent};
pub use signal::{EntitySnapshot, Outcome, Signal};
pub use simulation::{Phase, Simulation};
