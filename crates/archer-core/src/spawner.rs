//! Enemy spawn policy.
//!
//! Spawns are rate-limited to one per `interval_ms`. Each spawn rolls a
//! species and tier scaled by the difficulty level, and a position on the
//! arena boundary. Enemies never spawn in the interior.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arena::Bounds;
use crate::roster::{EnemySpecies, Tier};

/// A rolled spawn: what to spawn and where.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPlan {
    /// Species to spawn.
    pub species: EnemySpecies,
    /// Difficulty tier.
    pub tier: Tier,
    /// Position on the arena boundary.
    pub position: DVec2,
}

/// Tier roll: uniform over `0..=level / 4`, clamped to the three tiers.
pub fn roll_tier<R: Rng + ?Sized>(rng: &mut R, level: u32) -> Tier {
    let row = rng.gen_range(0..=level / 4);
    Tier::from_index(row.min(2) as usize)
}

/// Species roll: uniform over `0..=min(level - 1, 2)`.
pub fn roll_species<R: Rng + ?Sized>(rng: &mut R, level: u32) -> EnemySpecies {
    let max = level.saturating_sub(1).min(2);
    EnemySpecies::from_index(rng.gen_range(0..=max) as usize)
}

/// A point on the boundary of `bounds`.
///
/// Half the time x is uniform and y snaps to the top or bottom edge;
/// otherwise y is uniform and x snaps to the left or right edge.
pub fn roll_edge_position<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds) -> DVec2 {
    let snap = |rng: &mut R, extent: f64| if rng.gen_bool(0.5) { 0.0 } else { extent };

    if rng.gen_bool(0.5) {
        let x = rng.gen_range(0.0..=bounds.width);
        DVec2::new(x, snap(rng, bounds.height))
    } else {
        let y = rng.gen_range(0.0..=bounds.height);
        DVec2::new(snap(rng, bounds.width), y)
    }
}

/// Rate limiter and roller for enemy spawns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    interval_ms: f64,
    last_spawn_ms: Option<f64>,
}

impl Spawner {
    /// A spawner allowing one spawn per `interval_ms`. The first spawn is due
    /// immediately.
    #[must_use]
    pub const fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_spawn_ms: None,
        }
    }

    /// True if a spawn is allowed at `now_ms`.
    #[must_use]
    pub fn is_due(&self, now_ms: f64) -> bool {
        self.last_spawn_ms
            .map_or(true, |last| now_ms >= last + self.interval_ms)
    }

    /// Records a spawn at `now_ms`.
    pub fn mark(&mut self, now_ms: f64) {
        self.last_spawn_ms = Some(now_ms);
    }

    /// Rolls species, tier and position for the current level.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R, level: u32, bounds: Bounds) -> SpawnPlan {
        let tier = roll_tier(rng, level);
        let species = roll_species(rng, level);
        let position = roll_edge_position(rng, bounds);
        SpawnPlan {
            species,
            tier,
            position,
        }
    }
}
