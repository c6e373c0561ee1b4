//! Component structs for each entity kind.
//!
//! Shared behaviour (steering, cooldown) lives on [`Body`] and [`Cooldown`]
//! and is composed into the per-kind structs rather than inherited.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{angle_to_target, collision_radius, step_along, Circle};
use crate::input::{InputState, MoveDirections};
use crate::roster::{EnemySpecies, PlayerLoadout, ProjectileKind, SpriteKind, Tier};

/// Which side fired a projectile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Fired by the player; hits enemies.
    Player,
    /// Fired by an enemy; hits the player.
    Enemy,
}

// =============================================================================
// Body
// =============================================================================

/// Position, size and orientation shared by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Centre in arena coordinates.
    pub position: DVec2,
    /// Width and height.
    pub size: DVec2,
    /// Visual rotation in degrees, offset included.
    pub facing: f64,
    /// Per-sprite constant added to every computed look-angle.
    pub facing_offset: f64,
    /// Sprite drawn for this body.
    pub sprite: SpriteKind,
}

impl Body {
    /// Creates a body facing its sprite's rest orientation.
    #[must_use]
    pub fn new(position: DVec2, size: DVec2, sprite: SpriteKind) -> Self {
        let facing_offset = sprite.facing_offset();
        Self {
            position,
            size,
            facing: facing_offset,
            facing_offset,
            sprite,
        }
    }

    /// Collision radius: half the shorter side.
    #[must_use]
    pub fn collision_radius(&self) -> f64 {
        collision_radius(self.size)
    }

    /// Collision circle at the current position.
    #[must_use]
    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.collision_radius())
    }

    /// Turns to face `point` and returns the raw heading towards it.
    pub fn look_at(&mut self, point: DVec2) -> f64 {
        let heading = angle_to_target(self.position, point);
        self.facing = heading + self.facing_offset;
        heading
    }

    /// Faces `point` and advances towards it by `speed * delta`.
    pub fn step_to(&mut self, point: DVec2, speed: f64, delta: f64) {
        let heading = self.look_at(point);
        self.position = step_along(self.position, heading, speed, delta);
    }

    /// Euclidean distance between body centres.
    #[must_use]
    pub fn distance_to(&self, other: &Body) -> f64 {
        self.position.distance(other.position)
    }
}

// =============================================================================
// Cooldown
// =============================================================================

/// Attack cooldown: at most one attack per `1 / attack_speed` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Attacks per second.
    pub attack_speed: f64,
    /// Clock time of the last attack, if any.
    pub last_attack_ms: Option<f64>,
}

impl Cooldown {
    /// A cooldown that is ready immediately.
    #[must_use]
    pub const fn new(attack_speed: f64) -> Self {
        Self {
            attack_speed,
            last_attack_ms: None,
        }
    }

    /// Minimum time between attacks.
    #[must_use]
    pub fn interval_ms(&self) -> f64 {
        1000.0 / self.attack_speed
    }

    /// True once `now_ms >= last_attack + interval`.
    #[must_use]
    pub fn is_ready(&self, now_ms: f64) -> bool {
        self.last_attack_ms
            .map_or(true, |last| now_ms >= last + self.interval_ms())
    }

    /// Starts a fresh cooldown at `now_ms` if ready. Returns whether it was.
    pub fn try_trigger(&mut self, now_ms: f64) -> bool {
        if !self.is_ready(now_ms) {
            return false;
        }
        self.last_attack_ms = Some(now_ms);
        true
    }
}

// =============================================================================
// Per-kind components
// =============================================================================

/// Movement and weapon state shared by the player and enemies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    /// Movement speed in arena units per normalised tick.
    pub speed: f64,
    /// Attack cooldown.
    pub cooldown: Cooldown,
    /// Projectile launched by [`attack_to`](crate::resolver::attack_to).
    pub projectile: ProjectileKind,
    /// Side the fighter's projectiles belong to.
    pub faction: Faction,
}

/// Components of inert scenery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleComponents;

/// Components of an in-flight projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileComponents {
    /// Projectile kind.
    pub kind: ProjectileKind,
    /// Flight speed.
    pub speed: f64,
    /// Fixed flight heading in degrees.
    pub launch_angle: f64,
    /// Who fired it.
    pub faction: Faction,
}

impl ProjectileComponents {
    /// Projectile of `kind` flying along `launch_angle`.
    #[must_use]
    pub const fn new(kind: ProjectileKind, faction: Faction, launch_angle: f64) -> Self {
        Self {
            kind,
            speed: kind.speed(),
            launch_angle,
            faction,
        }
    }
}

/// Components of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyComponents {
    /// Species this enemy was built from.
    pub species: EnemySpecies,
    /// Difficulty tier this enemy was built from.
    pub tier: Tier,
    /// Distance at which it stops approaching and attacks.
    pub attack_range: f64,
    /// Movement and weapon.
    pub fighter: Fighter,
}

impl EnemyComponents {
    /// Builds the components for `species` at `tier` from the roster.
    #[must_use]
    pub fn from_roster(species: EnemySpecies, tier: Tier) -> Self {
        let definition = species.definition();
        let stats = definition.stats(tier);
        Self {
            species,
            tier,
            attack_range: stats.attack_range,
            fighter: Fighter {
                speed: stats.move_speed,
                cooldown: Cooldown::new(stats.attack_speed),
                projectile: definition.projectile,
                faction: Faction::Enemy,
            },
        }
    }
}

/// Components of the player's archer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerComponents {
    /// Movement and weapon.
    pub fighter: Fighter,
    /// Intent recorded from host input.
    pub input: InputState,
}

impl PlayerComponents {
    /// A player archer with no recorded input.
    #[must_use]
    pub const fn from_loadout(loadout: &PlayerLoadout) -> Self {
        Self {
            fighter: Fighter {
                speed: loadout.speed,
                cooldown: Cooldown::new(loadout.attack_speed),
                projectile: loadout.projectile,
                faction: Faction::Player,
            },
            input: InputState {
                pointer: None,
                fire_held: false,
                fire_pulse: false,
                directions: MoveDirections::empty(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod body_tests {
        use super::*;

        #[test]
        fn new_body_faces_rest_orientation() {
            let body = Body::new(DVec2::ZERO, DVec2::new(10.0, 10.0), SpriteKind::Archer);
            assert_eq!(body.facing, 90.0);
            assert_eq!(body.facing_offset, 90.0);
        }

        #[test]
        fn look_at_adds_offset() {
            let mut body = Body::new(DVec2::ZERO, DVec2::new(10.0, 10.0), SpriteKind::Archer);
            let heading = body.look_at(DVec2::new(10.0, 0.0));
            assert!(heading.abs() < 1e-9);
            assert!((body.facing - 90.0).abs() < 1e-9);
        }

        #[test]
        fn step_to_moves_and_faces() {
            let mut body = Body::new(DVec2::ZERO, DVec2::new(10.0, 10.0), SpriteKind::Arrow);
            body.step_to(DVec2::new(100.0, 0.0), 3.0, 2.0);
            assert!((body.position.x - 6.0).abs() < 1e-9);
            assert!(body.facing.abs() < 1e-9);
        }

        #[test]
        fn circle_uses_shorter_side() {
            let body = Body::new(DVec2::new(5.0, 5.0), DVec2::new(30.0, 8.0), SpriteKind::Arrow);
            assert_eq!(body.circle(), Circle::new(DVec2::new(5.0, 5.0), 4.0));
        }
    }

    mod cooldown_tests {
        use super::*;

        #[test]
        fn fresh_cooldown_is_ready() {
            assert!(Cooldown::new(2.0).is_ready(0.0));
        }

        #[test]
        fn trigger_blocks_until_interval_elapses() {
            let mut cooldown = Cooldown::new(2.0);
            assert!(cooldown.try_trigger(100.0));
            assert!(!cooldown.try_trigger(100.0));
            assert!(!cooldown.try_trigger(599.0));
            assert!(cooldown.try_trigger(600.0));
            assert_eq!(cooldown.last_attack_ms, Some(600.0));
        }

        #[test]
        fn dropped_attempt_does_not_reset_timer() {
            let mut cooldown = Cooldown::new(1.0);
            assert!(cooldown.try_trigger(0.0));
            assert!(!cooldown.try_trigger(500.0));
            assert_eq!(cooldown.last_attack_ms, Some(0.0));
        }
    }

    #[test]
    fn enemy_components_follow_roster() {
        let enemy = EnemyComponents::from_roster(EnemySpecies::Orc, Tier::Veteran);
        let stats = EnemySpecies::Orc.definition().stats(Tier::Veteran);
        assert_eq!(enemy.attack_range, stats.attack_range);
        assert_eq!(enemy.fighter.speed, stats.move_speed);
        assert_eq!(enemy.fighter.cooldown.attack_speed, stats.attack_speed);
        assert_eq!(enemy.fighter.projectile, ProjectileKind::Axe);
        assert_eq!(enemy.fighter.faction, Faction::Enemy);
    }

    #[test]
    fn projectile_takes_kind_speed() {
        let projectile = ProjectileComponents::new(ProjectileKind::Stone, Faction::Enemy, 45.0);
        assert_eq!(projectile.speed, ProjectileKind::Stone.speed());
    }
}
