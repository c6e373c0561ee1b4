//! Notifications for the presentation layer.
//!
//! The simulation queues [`Signal`]s as state changes; hosts drain them with
//! [`Simulation::drain_signals`](crate::simulation::Simulation::drain_signals)
//! after each step. Nothing here is polled.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityTag};
use crate::roster::SpriteKind;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every enemy was destroyed.
    Won,
    /// An enemy projectile hit the player.
    Lost,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

/// Presentation state of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Entity id.
    pub id: EntityId,
    /// Entity kind.
    pub tag: EntityTag,
    /// Sprite to draw.
    pub sprite: SpriteKind,
    /// Centre position.
    pub position: DVec2,
    /// Rotation in degrees.
    pub facing: f64,
    /// Width and height.
    pub size: DVec2,
    /// Always true here: snapshots are only taken of entities still in the
    /// arena. Removal is reported by [`Signal::EntityRemoved`].
    pub alive: bool,
}

impl EntitySnapshot {
    /// Captures the presentation state of `entity`.
    #[must_use]
    pub fn of(entity: &Entity) -> Self {
        let body = entity.body();
        Self {
            id: entity.id(),
            tag: entity.tag(),
            sprite: body.sprite,
            position: body.position,
            facing: body.facing,
            size: body.size,
            alive: entity.is_alive(),
        }
    }
}

/// A state-change notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    /// A new entity appeared.
    EntitySpawned(EntitySnapshot),
    /// An entity's position or facing changed this tick.
    EntityUpdated(EntitySnapshot),
    /// An entity was removed; stop drawing it.
    EntityRemoved {
        /// Removed entity.
        id: EntityId,
    },
    /// The score changed.
    ScoreChanged(u32),
    /// The difficulty level changed.
    LevelChanged(u32),
    /// The number of enemies still to spawn changed.
    EnemiesRemainingChanged(u32),
    /// The session ended. Sent once.
    GameEnded(Outcome),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Body, EntityInner, ObstacleComponents};

    #[test]
    fn snapshot_copies_body() {
        let entity = Entity::new(
            EntityId::new(2),
            Body::new(DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0), SpriteKind::Rock),
            EntityInner::Obstacle(ObstacleComponents),
        );
        let snapshot = EntitySnapshot::of(&entity);
        assert_eq!(snapshot.id, EntityId::new(2));
        assert_eq!(snapshot.tag, EntityTag::Obstacle);
        assert_eq!(snapshot.position, DVec2::new(1.0, 2.0));
        assert_eq!(snapshot.size, DVec2::new(3.0, 4.0));
        assert!(snapshot.alive);
    }

    #[test]
    fn signals_serialize_for_hosts() {
        let json = serde_json::to_string(&Signal::GameEnded(Outcome::Won)).unwrap();
        assert_eq!(json, r#"{"GameEnded":"Won"}"#);
    }
}
