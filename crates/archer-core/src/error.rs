//! Error types.
//!
//! Attacks on cooldown and projectiles leaving the arena are ordinary
//! control flow and never surface here.

use crate::entity::EntityId;

/// Errors from entity storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
    /// The entity existed once and has already been destroyed.
    ///
    /// Hitting this means an entity was registered or destroyed twice, which
    /// is a lifecycle bug in the caller.
    #[error("entity {0} was already destroyed")]
    AlreadyDestroyed(EntityId),

    /// No entity with this id was ever spawned in this arena.
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),
}

/// Errors from session configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Arena width or height is not a positive finite number.
    #[error("arena size must be positive and finite, got {width}x{height}")]
    ArenaSize {
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },

    /// The session needs at least one enemy to be winnable.
    #[error("total_enemies must be at least 1")]
    NoEnemies,

    /// Tick period of zero.
    #[error("tick_period_ms must be at least 1")]
    TickPeriod,

    /// Spawn interval of zero.
    #[error("spawn_interval_ms must be at least 1")]
    SpawnInterval,

    /// Player loadout with a non-positive speed, attack speed or size.
    #[error("invalid player loadout: {0}")]
    Loadout(&'static str),

    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from the public [`Simulation`](crate::simulation::Simulation) API.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Entity storage rejected the operation.
    #[error(transparent)]
    Arena(#[from] ArenaError),

    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The entity cannot attack.
    #[error("entity {0} is not a fighter")]
    NotAFighter(EntityId),
}
