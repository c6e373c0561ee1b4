//! Entity types for the arena.
//!
//! - [`EntityId`]: unique, monotonically assigned identifier
//! - [`EntityTag`]: kind classification used to select plugins
//! - [`EntityInner`]: kind-specific component storage
//! - [`Entity`]: the complete entity, a [`Body`] plus its components
//!
//! # Example
//!
//! ```
//! use archer_core::entity::{Body, Entity, EntityId, EntityInner, EntityTag, ObstacleComponents};
//! use archer_core::roster::SpriteKind;
//! use glam::DVec2;
//!
//! let rock = Entity::new(
//!     EntityId::new(3),
//!     Body::new(DVec2::new(10.0, 10.0), DVec2::new(32.0, 32.0), SpriteKind::Rock),
//!     EntityInner::Obstacle(ObstacleComponents),
//! );
//!
//! assert_eq!(rock.id().as_u64(), 3);
//! assert_eq!(rock.tag(), EntityTag::Obstacle);
//! assert!(rock.is_alive());
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{
    Body, Cooldown, EnemyComponents, Faction, Fighter, ObstacleComponents, PlayerComponents,
    ProjectileComponents,
};

/// Unique identifier for an entity.
///
/// Ids are assigned by the [`Arena`](crate::arena::Arena) in increasing order
/// and never reused, so ordering by id is ordering by creation.
///
/// ```
/// use archer_core::entity::EntityId;
///
/// assert!(EntityId::new(1) < EntityId::new(2));
/// assert_eq!(EntityId::new(5).to_string(), "5");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an `EntityId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Entity kind, used to pick the plugin bundle that updates an entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    /// Inert scenery. Never updated.
    Obstacle,
    /// In-flight projectile.
    Projectile,
    /// Hostile fighter.
    Enemy,
    /// The player's archer.
    Player,
}

impl EntityTag {
    /// True for kinds that receive a per-tick update.
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        !matches!(self, Self::Obstacle)
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Obstacle => write!(f, "Obstacle"),
            Self::Projectile => write!(f, "Projectile"),
            Self::Enemy => write!(f, "Enemy"),
            Self::Player => write!(f, "Player"),
        }
    }
}

/// Kind-specific component storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityInner {
    /// Scenery components.
    Obstacle(ObstacleComponents),
    /// Projectile components.
    Projectile(ProjectileComponents),
    /// Enemy components.
    Enemy(EnemyComponents),
    /// Player components.
    Player(PlayerComponents),
}

impl EntityInner {
    /// Tag matching this variant.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        match self {
            Self::Obstacle(_) => EntityTag::Obstacle,
            Self::Projectile(_) => EntityTag::Projectile,
            Self::Enemy(_) => EntityTag::Enemy,
            Self::Player(_) => EntityTag::Player,
        }
    }

    /// Projectile components, if this is a projectile.
    #[must_use]
    pub const fn as_projectile(&self) -> Option<&ProjectileComponents> {
        match self {
            Self::Projectile(components) => Some(components),
            _ => None,
        }
    }

    /// Enemy components, if this is an enemy.
    #[must_use]
    pub const fn as_enemy(&self) -> Option<&EnemyComponents> {
        match self {
            Self::Enemy(components) => Some(components),
            _ => None,
        }
    }

    /// Player components, if this is the player.
    #[must_use]
    pub const fn as_player(&self) -> Option<&PlayerComponents> {
        match self {
            Self::Player(components) => Some(components),
            _ => None,
        }
    }

    /// Mutable player components, if this is the player.
    #[must_use]
    pub fn as_player_mut(&mut self) -> Option<&mut PlayerComponents> {
        match self {
            Self::Player(components) => Some(components),
            _ => None,
        }
    }

    /// Fighter state for the player and enemies.
    #[must_use]
    pub const fn fighter(&self) -> Option<&Fighter> {
        match self {
            Self::Enemy(components) => Some(&components.fighter),
            Self::Player(components) => Some(&components.fighter),
            Self::Obstacle(_) | Self::Projectile(_) => None,
        }
    }

    /// Mutable fighter state for the player and enemies.
    #[must_use]
    pub fn fighter_mut(&mut self) -> Option<&mut Fighter> {
        match self {
            Self::Enemy(components) => Some(&mut components.fighter),
            Self::Player(components) => Some(&mut components.fighter),
            Self::Obstacle(_) | Self::Projectile(_) => None,
        }
    }
}

/// A complete entity.
///
/// # Invariants
///
/// - The id is unique within its arena.
/// - The tag always matches the [`EntityInner`] variant; it is derived from
///   it on construction.
/// - Once `alive` is false it never becomes true again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    tag: EntityTag,
    body: Body,
    alive: bool,
    inner: EntityInner,
}

impl Entity {
    /// Creates a live entity.
    #[must_use]
    pub const fn new(id: EntityId, body: Body, inner: EntityInner) -> Self {
        Self {
            id,
            tag: inner.tag(),
            body,
            alive: true,
            inner,
        }
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Kind tag.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.tag
    }

    /// Position, size and orientation.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Mutable body.
    #[must_use]
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// False once the entity has been destroyed.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.alive = false;
    }

    /// Kind-specific components.
    #[must_use]
    pub const fn inner(&self) -> &EntityInner {
        &self.inner
    }

    /// Mutable kind-specific components.
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut EntityInner {
        &mut self.inner
    }

    /// Body and components together, for updates touching both.
    pub fn parts_mut(&mut self) -> (&mut Body, &mut EntityInner) {
        (&mut self.body, &mut self.inner)
    }

    /// Projectile components, if this is a projectile.
    #[must_use]
    pub const fn as_projectile(&self) -> Option<&ProjectileComponents> {
        self.inner.as_projectile()
    }

    /// Enemy components, if this is an enemy.
    #[must_use]
    pub const fn as_enemy(&self) -> Option<&EnemyComponents> {
        self.inner.as_enemy()
    }

    /// Player components, if this is the player.
    #[must_use]
    pub const fn as_player(&self) -> Option<&PlayerComponents> {
        self.inner.as_player()
    }

    /// Fighter state, if this entity can attack.
    #[must_use]
    pub const fn fighter(&self) -> Option<&Fighter> {
        self.inner.fighter()
    }

    /// Movement speed: fighter speed or projectile flight speed.
    #[must_use]
    pub fn speed(&self) -> f64 {
        match &self.inner {
            EntityInner::Projectile(p) => p.speed,
            EntityInner::Enemy(e) => e.fighter.speed,
            EntityInner::Player(p) => p.fighter.speed,
            EntityInner::Obstacle(_) => 0.0,
        }
    }
}
