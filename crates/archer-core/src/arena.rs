//! Entity storage for one session.
//!
//! The arena owns every entity plus the bookkeeping that tick dispatch and
//! collision checks read:
//! - entity storage with deterministic iteration order (`BTreeMap`)
//! - the subscriber set of entities that receive a per-tick update
//! - the set of live enemies that player projectiles test against
//! - the player slot, the tick counter and the simulation clock
//!
//! Ids are assigned monotonically and never reused, so iterating by id is
//! iterating in creation order.
//!
//! # Example
//!
//! ```
//! use archer_core::arena::{Arena, Bounds};
//! use archer_core::entity::{Body, EntityInner, EnemyComponents};
//! use archer_core::roster::{EnemySpecies, Tier};
//! use glam::DVec2;
//!
//! let mut arena = Arena::new(Bounds::new(600.0, 600.0));
//! let definition = EnemySpecies::Goblin.definition();
//! let goblin = arena.spawn(
//!     Body::new(DVec2::new(0.0, 300.0), definition.size, definition.sprite),
//!     EntityInner::Enemy(EnemyComponents::from_roster(EnemySpecies::Goblin, Tier::Novice)),
//! );
//!
//! assert!(arena.live_enemies().contains(&goblin));
//! assert!(arena.despawn(goblin).is_ok());
//! assert!(arena.despawn(goblin).is_err());
//! ```

use std::collections::{BTreeMap, BTreeSet};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::entity::{Body, Entity, EntityId, EntityInner, EntityTag};
use crate::error::ArenaError;

// =============================================================================
// Bounds
// =============================================================================

/// The rectangle `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Width of the arena.
    pub width: f64,
    /// Height of the arena.
    pub height: f64,
}

impl Bounds {
    /// Creates bounds of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True if `point` lies inside the rectangle. Edges count as inside.
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Nearest point inside the rectangle.
    #[must_use]
    pub fn clamp(&self, point: DVec2) -> DVec2 {
        DVec2::new(point.x.clamp(0.0, self.width), point.y.clamp(0.0, self.height))
    }

    /// Centre of the rectangle.
    #[must_use]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

// =============================================================================
// Arena
// =============================================================================

/// Container for every entity in a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    /// Monotonically increasing id counter.
    next_id: u64,
    /// Live entities, iterated in id order.
    entities: BTreeMap<EntityId, Entity>,
    /// Entities that receive a per-tick update.
    subscribers: BTreeSet<EntityId>,
    /// Live enemies, for player projectile collision.
    live_enemies: BTreeSet<EntityId>,
    /// The player, while alive.
    player: Option<EntityId>,
    bounds: Bounds,
    /// Completed ticks.
    tick: u64,
    /// Simulation clock at the start of the current tick.
    now_ms: f64,
}

impl Arena {
    /// Creates an empty arena at tick 0, time 0.
    #[must_use]
    pub const fn new(bounds: Bounds) -> Self {
        Self {
            next_id: 0,
            entities: BTreeMap::new(),
            subscribers: BTreeSet::new(),
            live_enemies: BTreeSet::new(),
            player: None,
            bounds,
            tick: 0,
            now_ms: 0.0,
        }
    }

    /// Adds an entity and registers it with the sets its kind belongs to.
    ///
    /// Mobile kinds join the subscriber set, enemies join the live-enemy set
    /// and a player entity fills the player slot.
    pub fn spawn(&mut self, body: Body, inner: EntityInner) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;

        let entity = Entity::new(id, body, inner);
        let tag = entity.tag();
        if tag.is_mobile() {
            self.subscribers.insert(id);
        }
        match tag {
            EntityTag::Enemy => {
                self.live_enemies.insert(id);
            }
            EntityTag::Player => self.player = Some(id),
            EntityTag::Obstacle | EntityTag::Projectile => {}
        }

        self.entities.insert(id, entity);
        id
    }

    /// Removes an entity from storage and from every set.
    ///
    /// The returned entity is marked not alive.
    ///
    /// # Errors
    ///
    /// [`ArenaError::AlreadyDestroyed`] if the id was issued by this arena but
    /// the entity is gone; [`ArenaError::UnknownEntity`] if it never existed.
    pub fn despawn(&mut self, id: EntityId) -> Result<Entity, ArenaError> {
        let Some(mut entity) = self.entities.remove(&id) else {
            return Err(self.missing(id));
        };

        self.subscribers.remove(&id);
        self.live_enemies.remove(&id);
        if self.player == Some(id) {
            self.player = None;
        }
        entity.mark_destroyed();
        Ok(entity)
    }

    /// Entity by id, or the reason it is not available.
    ///
    /// # Errors
    ///
    /// Same as [`despawn`](Self::despawn).
    pub fn require(&self, id: EntityId) -> Result<&Entity, ArenaError> {
        self.entities.get(&id).ok_or_else(|| self.missing(id))
    }

    fn missing(&self, id: EntityId) -> ArenaError {
        if id.as_u64() < self.next_id {
            ArenaError::AlreadyDestroyed(id)
        } else {
            ArenaError::UnknownEntity(id)
        }
    }

    /// Entity by id, if alive.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Mutable entity by id, if alive.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// True if the entity is alive.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Entity ids in id order.
    pub fn entity_ids_sorted(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Entities in id order.
    pub fn entities_sorted(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Copy of the subscriber set, in id order.
    ///
    /// Tick dispatch iterates this copy so entities spawned or destroyed
    /// mid-tick do not disturb the iteration.
    #[must_use]
    pub fn subscribers_snapshot(&self) -> Vec<EntityId> {
        self.subscribers.iter().copied().collect()
    }

    /// Live enemy ids, in id order.
    #[must_use]
    pub const fn live_enemies(&self) -> &BTreeSet<EntityId> {
        &self.live_enemies
    }

    /// The player's id, while alive.
    #[must_use]
    pub const fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    /// The player entity, while alive.
    #[must_use]
    pub fn player(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.entities.get(&id))
    }

    /// Mutable player entity, while alive.
    #[must_use]
    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.player.and_then(|id| self.entities.get_mut(&id))
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// True if no entity is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Arena rectangle.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Completed ticks.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Simulation clock in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Advances the tick counter.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// Advances the simulation clock.
    pub fn advance_time(&mut self, elapsed_ms: f64) {
        self.now_ms += elapsed_ms;
    }
}

// =============================================================================
// Tests
// =============================================================================
