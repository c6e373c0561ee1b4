//! Static definitions: sprite kinds, projectile kinds, the enemy roster and
//! the player's loadout.
//!
//! Enemies are instantiated by picking one [`EnemySpecies`] and one
//! [`Tier`]; the tier selects a row from the species' three-tier stat arrays.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

// =============================================================================
// Sprite Kind
// =============================================================================

/// Visual kind of an entity, forwarded to the presentation layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    /// The player-controlled archer.
    Archer,
    /// Fast, short-ranged stone thrower.
    Goblin,
    /// Slow axe thrower.
    Orc,
    /// Long-ranged fireball caster.
    Warlock,
    /// Player arrow.
    Arrow,
    /// Goblin stone.
    Stone,
    /// Orc throwing axe.
    Axe,
    /// Warlock fireball.
    Fireball,
    /// Inert scenery.
    Rock,
}

impl SpriteKind {
    /// Degrees added to a computed look-angle to orient this sprite.
    ///
    /// Character sprites are drawn facing up (270°); the arrow and axe are
    /// drawn pointing right; the fireball trails to the right, pointing left.
    #[must_use]
    pub const fn facing_offset(self) -> f64 {
        match self {
            Self::Archer | Self::Goblin | Self::Orc | Self::Warlock => 90.0,
            Self::Arrow | Self::Stone | Self::Axe | Self::Rock => 0.0,
            Self::Fireball => 180.0,
        }
    }
}

impl fmt::Display for SpriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Archer => "archer",
            Self::Goblin => "goblin",
            Self::Orc => "orc",
            Self::Warlock => "warlock",
            Self::Arrow => "arrow",
            Self::Stone => "stone",
            Self::Axe => "axe",
            Self::Fireball => "fireball",
            Self::Rock => "rock",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Projectile Kind
// =============================================================================

/// Kind of projectile a fighter launches.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Player arrow: fast and thin.
    Arrow,
    /// Goblin stone.
    Stone,
    /// Orc throwing axe.
    Axe,
    /// Warlock fireball.
    Fireball,
}

impl ProjectileKind {
    /// Sprite used to draw this projectile.
    #[must_use]
    pub const fn sprite(self) -> SpriteKind {
        match self {
            Self::Arrow => SpriteKind::Arrow,
            Self::Stone => SpriteKind::Stone,
            Self::Axe => SpriteKind::Axe,
            Self::Fireball => SpriteKind::Fireball,
        }
    }

    /// Body size (width, height).
    #[must_use]
    pub const fn size(self) -> DVec2 {
        match self {
            Self::Arrow => DVec2::new(30.0, 8.0),
            Self::Stone => DVec2::new(12.0, 12.0),
            Self::Axe => DVec2::new(20.0, 20.0),
            Self::Fireball => DVec2::new(24.0, 18.0),
        }
    }

    /// Flight speed in arena units per normalised tick.
    #[must_use]
    pub const fn speed(self) -> f64 {
        match self {
            Self::Arrow => 12.0,
            Self::Stone => 7.0,
            Self::Axe => 6.0,
            Self::Fireball => 5.0,
        }
    }
}

// =============================================================================
// Difficulty Tier
// =============================================================================

/// Difficulty tier selecting an enemy's stat row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Row 0.
    Novice,
    /// Row 1.
    Veteran,
    /// Row 2.
    Elite,
}

impl Tier {
    /// All tiers in row order.
    pub const ALL: [Self; 3] = [Self::Novice, Self::Veteran, Self::Elite];

    /// Tier for a row index, clamped into `0..=2`.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Novice,
            1 => Self::Veteran,
            _ => Self::Elite,
        }
    }

    /// Row index of this tier.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Novice => 0,
            Self::Veteran => 1,
            Self::Elite => 2,
        }
    }
}

// =============================================================================
// Enemy Roster
// =============================================================================

/// Enemy species. The roster is fixed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemySpecies {
    /// Species 0.
    Goblin,
    /// Species 1.
    Orc,
    /// Species 2.
    Warlock,
}

impl EnemySpecies {
    /// All species in roster order.
    pub const ALL: [Self; 3] = [Self::Goblin, Self::Orc, Self::Warlock];

    /// Species for a roster index, clamped into `0..=2`.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Goblin,
            1 => Self::Orc,
            _ => Self::Warlock,
        }
    }

    /// Static definition of this species.
    #[must_use]
    pub fn definition(self) -> &'static EnemyDefinition {
        &ROSTER[self.index()]
    }

    /// Roster index of this species.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Goblin => 0,
            Self::Orc => 1,
            Self::Warlock => 2,
        }
    }
}

/// Static description of one enemy species.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyDefinition {
    /// Sprite drawn for this species.
    pub sprite: SpriteKind,
    /// Body size (width, height).
    pub size: DVec2,
    /// Projectile launched when attacking.
    pub projectile: ProjectileKind,
    /// Distance at which the enemy stops approaching and attacks, per tier.
    pub attack_range: [f64; 3],
    /// Attacks per second, per tier.
    pub attack_speed: [f64; 3],
    /// Movement speed in arena units per normalised tick, per tier.
    pub move_speed: [f64; 3],
}

impl EnemyDefinition {
    /// Stat row for `tier`.
    #[must_use]
    pub const fn stats(&self, tier: Tier) -> EnemyStats {
        let row = tier.index();
        EnemyStats {
            attack_range: self.attack_range[row],
            attack_speed: self.attack_speed[row],
            move_speed: self.move_speed[row],
        }
    }
}

/// One tier's row of an [`EnemyDefinition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    /// Attack range in arena units.
    pub attack_range: f64,
    /// Attacks per second.
    pub attack_speed: f64,
    /// Movement speed.
    pub move_speed: f64,
}

/// The enemy roster, indexed by species.
pub static ROSTER: [EnemyDefinition; 3] = [
    EnemyDefinition {
        sprite: SpriteKind::Goblin,
        size: DVec2::new(40.0, 40.0),
        projectile: ProjectileKind::Stone,
        attack_range: [150.0, 180.0, 210.0],
        attack_speed: [0.5, 0.75, 1.0],
        move_speed: [1.0, 1.3, 1.6],
    },
    EnemyDefinition {
        sprite: SpriteKind::Orc,
        size: DVec2::new(52.0, 52.0),
        projectile: ProjectileKind::Axe,
        attack_range: [120.0, 140.0, 160.0],
        attack_speed: [0.4, 0.6, 0.8],
        move_speed: [0.8, 1.0, 1.2],
    },
    EnemyDefinition {
        sprite: SpriteKind::Warlock,
        size: DVec2::new(44.0, 48.0),
        projectile: ProjectileKind::Fireball,
        attack_range: [260.0, 300.0, 340.0],
        attack_speed: [0.3, 0.45, 0.6],
        move_speed: [0.6, 0.8, 1.0],
    },
];

// =============================================================================
// Player Loadout
// =============================================================================

/// Size, speed and weapon of the player's archer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerLoadout {
    /// Body size (width, height).
    pub size: DVec2,
    /// Walking speed in arena units per normalised tick.
    pub speed: f64,
    /// Shots per second.
    pub attack_speed: f64,
    /// Projectile fired.
    pub projectile: ProjectileKind,
}

impl Default for PlayerLoadout {
    fn default() -> Self {
        Self {
            size: DVec2::new(48.0, 48.0),
            speed: 4.0,
            attack_speed: 2.5,
            projectile: ProjectileKind::Arrow,
        }
    }
}
