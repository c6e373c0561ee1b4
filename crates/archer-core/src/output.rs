//! What plugins emit and resolvers report.
//!
//! - [`Command`]: a state change a plugin asks for; resolvers apply it
//! - [`Event`]: something that happened while applying commands
//! - [`EventLog`]: per-tick buffer of events, drained by the simulation
//!
//! Commands carry everything the resolver needs, so applying them never
//! consults the plugin again.
//!
//! # Example
//!
//! ```
//! use archer_core::entity::EntityId;
//! use archer_core::output::{Command, CommandKind, DestroyCause};
//!
//! let command = Command::Despawn {
//!     target: EntityId::new(4),
//!     cause: DestroyCause::OutOfBounds,
//! };
//! assert_eq!(command.kind(), CommandKind::Lifecycle);
//! assert_eq!(command.subject(), EntityId::new(4));
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::{EntityId, EntityTag};

// =============================================================================
// Plugin Identification
// =============================================================================

/// Registered name of a plugin type.
///
/// ```
/// use archer_core::output::PluginId;
///
/// let id = PluginId::new("enemy_ai");
/// assert_eq!(id.as_str(), "enemy_ai");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PluginId(String);

impl PluginId {
    /// Creates a `PluginId` from a string.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Creates a `PluginId` from a built-in plugin name.
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        Self::new(id)
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PluginId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Why an entity left the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestroyCause {
    /// A projectile hit something, or was hit.
    Collision,
    /// A projectile flew past the arena edge.
    OutOfBounds,
    /// The host asked for it.
    Host,
    /// The session is being torn down.
    Teardown,
}

impl fmt::Display for DestroyCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collision => write!(f, "collision"),
            Self::OutOfBounds => write!(f, "out_of_bounds"),
            Self::Host => write!(f, "host"),
            Self::Teardown => write!(f, "teardown"),
        }
    }
}

/// A requested state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Turn to face a point.
    LookAt {
        /// Entity to turn.
        target: EntityId,
        /// Point to face.
        point: DVec2,
    },
    /// Face a point and advance towards it at the entity's own speed.
    StepTo {
        /// Entity to move.
        target: EntityId,
        /// Point to approach.
        point: DVec2,
        /// Normalised tick duration.
        delta: f64,
    },
    /// Place an entity at an already computed position.
    MoveTo {
        /// Entity to move.
        target: EntityId,
        /// New centre.
        position: DVec2,
    },
    /// Face a point and launch a projectile at it if the cooldown allows.
    AttackTo {
        /// Attacking fighter.
        source: EntityId,
        /// Aim point.
        point: DVec2,
    },
    /// A projectile struck a victim.
    Strike {
        /// The projectile; always destroyed.
        projectile: EntityId,
        /// What it hit.
        victim: EntityId,
    },
    /// Remove an entity.
    Despawn {
        /// Entity to remove.
        target: EntityId,
        /// Why.
        cause: DestroyCause,
    },
}

/// Routing category of a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// Orientation and position changes.
    Motion,
    /// Attacks and hits.
    Combat,
    /// Removals.
    Lifecycle,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Motion => write!(f, "Motion"),
            Self::Combat => write!(f, "Combat"),
            Self::Lifecycle => write!(f, "Lifecycle"),
        }
    }
}

impl Command {
    /// Routing category.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::LookAt { .. } | Self::StepTo { .. } | Self::MoveTo { .. } => CommandKind::Motion,
            Self::AttackTo { .. } | Self::Strike { .. } => CommandKind::Combat,
            Self::Despawn { .. } => CommandKind::Lifecycle,
        }
    }

    /// The entity this command is about.
    #[must_use]
    pub const fn subject(&self) -> EntityId {
        match self {
            Self::LookAt { target, .. }
            | Self::StepTo { target, .. }
            | Self::MoveTo { target, .. }
            | Self::Despawn { target, .. } => *target,
            Self::AttackTo { source, .. } => *source,
            Self::Strike { projectile, .. } => *projectile,
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Something that happened while resolving commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A fighter launched a projectile.
    ProjectileFired {
        /// Shooter.
        source: EntityId,
        /// The new projectile.
        projectile: EntityId,
    },
    /// An entity's position or facing changed.
    Moved {
        /// Entity that moved.
        id: EntityId,
    },
    /// An entity was removed from the arena.
    Destroyed {
        /// Removed entity.
        id: EntityId,
        /// Its kind.
        tag: EntityTag,
        /// Why.
        cause: DestroyCause,
    },
    /// An enemy projectile reached the player.
    PlayerHit {
        /// The projectile.
        projectile: EntityId,
    },
}

/// Per-tick buffer of events in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Removes and returns every buffered event.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Event> {
        self.events.drain(..)
    }

    /// Buffered events.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
