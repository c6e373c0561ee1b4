//! Session configuration.
//!
//! Every field has a default, so a JSON document only needs the fields it
//! overrides:
//!
//! ```
//! use archer_core::config::SimulationConfig;
//!
//! let config = SimulationConfig::from_json_str(r#"{ "total_enemies": 10, "seed": 7 }"#).unwrap();
//! assert_eq!(config.total_enemies, 10);
//! assert_eq!(config.arena_width, 600.0);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::roster::PlayerLoadout;

/// Default arena width and height.
pub const DEFAULT_ARENA_SIZE: f64 = 600.0;
/// Default number of enemies per session.
pub const DEFAULT_TOTAL_ENEMIES: u32 = 143;
/// Default tick period (about 33 ticks per second).
pub const DEFAULT_TICK_PERIOD_MS: u64 = 30;
/// Default minimum time between spawns.
pub const DEFAULT_SPAWN_INTERVAL_MS: u64 = 1000;

/// Fixed parameters of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Arena width.
    pub arena_width: f64,
    /// Arena height.
    pub arena_height: f64,
    /// Enemies to spawn; destroying all of them wins.
    pub total_enemies: u32,
    /// Fixed tick period.
    pub tick_period_ms: u64,
    /// Minimum time between enemy spawns.
    pub spawn_interval_ms: u64,
    /// Seed for every random roll.
    pub seed: u64,
    /// The player's archer.
    pub player: PlayerLoadout,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_SIZE,
            arena_height: DEFAULT_ARENA_SIZE,
            total_enemies: DEFAULT_TOTAL_ENEMIES,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            seed: 0,
            player: PlayerLoadout::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, or any validation error.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// The first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.arena_width) || !positive(self.arena_height) {
            return Err(ConfigError::ArenaSize {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.total_enemies == 0 {
            return Err(ConfigError::NoEnemies);
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::TickPeriod);
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::SpawnInterval);
        }
        if !positive(self.player.speed) {
            return Err(ConfigError::Loadout("speed must be positive"));
        }
        if !positive(self.player.attack_speed) {
            return Err(ConfigError::Loadout("attack_speed must be positive"));
        }
        if !positive(self.player.size.x) || !positive(self.player.size.y) {
            return Err(ConfigError::Loadout("size must be positive"));
        }
        Ok(())
    }

    /// Tick period as a `Duration`.
    #[must_use]
    pub const fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}
