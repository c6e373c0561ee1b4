//! Read-only access to arena state for plugins.
//!
//! A [`WorldView`] borrows the arena immutably, so plugins can inspect any
//! entity but can only change state by returning commands.
//!
//! # Example
//!
//! ```
//! use archer_core::arena::{Arena, Bounds};
//! use archer_core::entity::{Body, EntityInner, EnemyComponents};
//! use archer_core::geometry::Circle;
//! use archer_core::roster::{EnemySpecies, Tier};
//! use archer_core::world_view::WorldView;
//! use glam::DVec2;
//!
//! let mut arena = Arena::new(Bounds::new(600.0, 600.0));
//! let definition = EnemySpecies::Orc.definition();
//! let orc = arena.spawn(
//!     Body::new(DVec2::new(100.0, 100.0), definition.size, definition.sprite),
//!     EntityInner::Enemy(EnemyComponents::from_roster(EnemySpecies::Orc, Tier::Elite)),
//! );
//!
//! let view = WorldView::new(&arena);
//! let probe = Circle::new(DVec2::new(110.0, 100.0), 4.0);
//! assert_eq!(view.first_enemy_hit(probe), Some(orc));
//! ```

use crate::arena::{Arena, Bounds};
use crate::entity::{Body, Entity, EntityId, EntityTag};
use crate::geometry::{circles_overlap, Circle};

// =============================================================================
// WorldView
// =============================================================================

/// Immutable view of one arena.
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    arena: &'a Arena,
}

impl<'a> WorldView<'a> {
    /// Creates a view of `arena`.
    #[must_use]
    pub const fn new(arena: &'a Arena) -> Self {
        Self { arena }
    }

    /// Entity by id, if alive.
    #[must_use]
    pub fn get_entity(&self, id: EntityId) -> Option<&'a Entity> {
        self.arena.get(id)
    }

    /// Body of an entity, if alive.
    #[must_use]
    pub fn get_body(&self, id: EntityId) -> Option<&'a Body> {
        self.arena.get(id).map(Entity::body)
    }

    /// The player, while alive.
    #[must_use]
    pub fn player(&self) -> Option<&'a Entity> {
        self.arena.player()
    }

    /// Arena rectangle.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.arena.bounds()
    }

    /// Simulation clock at the start of the tick.
    #[must_use]
    pub const fn now_ms(&self) -> f64 {
        self.arena.now_ms()
    }

    /// Live enemies in id order.
    pub fn live_enemies(&self) -> impl Iterator<Item = &'a Entity> + 'a {
        let arena = self.arena;
        arena.live_enemies().iter().filter_map(move |id| arena.get(*id))
    }

    /// Entities of a given kind in id order.
    pub fn query_by_tag(&self, tag: EntityTag) -> impl Iterator<Item = &'a Entity> + 'a {
        self.arena.entities_sorted().filter(move |e| e.tag() == tag)
    }

    /// Lowest-id live enemy whose collision circle overlaps `circle`.
    #[must_use]
    pub fn first_enemy_hit(&self, circle: Circle) -> Option<EntityId> {
        self.live_enemies()
            .find(|enemy| circles_overlap(circle, enemy.body().circle()))
            .map(Entity::id)
    }

    /// True if the player is alive and its collision circle overlaps `circle`.
    #[must_use]
    pub fn hits_player(&self, circle: Circle) -> bool {
        self.player()
            .is_some_and(|player| circles_overlap(circle, player.body().circle()))
    }
}

// =============================================================================
// Tests
// =============================================================================
