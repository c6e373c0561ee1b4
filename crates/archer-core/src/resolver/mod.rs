//! Resolvers apply plugin commands to the arena.
//!
//! Each resolver declares which [`CommandKind`]s it handles via
//! [`Resolver::handles`]. After every plugin run the simulation routes the
//! returned commands to the resolvers in order: motion, combat, lifecycle.
//! Resolvers record what happened in an [`EventLog`].
//!
//! # Invariants
//!
//! - Resolvers are deterministic given the same arena and command order.
//! - Commands naming an entity that is no longer alive are skipped.
//!
//! # Available Resolvers
//!
//! - [`MotionResolver`]: turning and movement
//! - [`CombatResolver`]: attacks, projectile launches and hits
//! - [`LifecycleResolver`]: removals

mod combat;
mod lifecycle;
mod motion;

pub use combat::{attack_to, spawn_projectile, CombatResolver};
pub use lifecycle::LifecycleResolver;
pub use motion::MotionResolver;

use crate::arena::Arena;
use crate::entity::EntityId;
use crate::output::{Command, CommandKind, DestroyCause, Event, EventLog};

/// Applies commands of the kinds it handles.
///
/// ```
/// use archer_core::arena::Arena;
/// use archer_core::output::{Command, CommandKind, EventLog};
/// use archer_core::resolver::Resolver;
///
/// struct Ignore;
///
/// impl Resolver for Ignore {
///     fn handles(&self) -> &[CommandKind] {
///         &[CommandKind::Motion]
///     }
///
///     fn resolve(&self, _commands: &[&Command], _arena: &mut Arena, _events: &mut EventLog) {}
/// }
///
/// assert_eq!(Ignore.handles(), &[CommandKind::Motion]);
/// ```
pub trait Resolver: Send + Sync {
    /// Command kinds routed to this resolver.
    fn handles(&self) -> &[CommandKind];

    /// Applies `commands` in order.
    ///
    /// # Arguments
    ///
    /// * `commands` - Commands routed here (already filtered by `handles()`)
    /// * `arena` - Arena to mutate
    /// * `events` - Log receiving what happened
    fn resolve(&self, commands: &[&Command], arena: &mut Arena, events: &mut EventLog);
}

/// The standard resolver chain, in application order.
#[must_use]
pub fn default_chain() -> Vec<Box<dyn Resolver>> {
    vec![
        Box::new(MotionResolver::new()),
        Box::new(CombatResolver::new()),
        Box::new(LifecycleResolver::new()),
    ]
}

/// Routes `commands` through `resolvers` in chain order.
pub fn apply(
    resolvers: &[Box<dyn Resolver>],
    commands: &[Command],
    arena: &mut Arena,
    events: &mut EventLog,
) {
    for resolver in resolvers {
        let handles = resolver.handles();
        let routed: Vec<&Command> = commands
            .iter()
            .filter(|command| handles.contains(&command.kind()))
            .collect();
        if !routed.is_empty() {
            resolver.resolve(&routed, arena, events);
        }
    }
}

/// Removes an entity and records its destruction.
///
/// Destroying an entity twice is a lifecycle bug: it is logged, and panics
/// in debug builds.
pub(crate) fn destroy(
    arena: &mut Arena,
    id: EntityId,
    cause: DestroyCause,
    events: &mut EventLog,
) -> bool {
    match arena.despawn(id) {
        Ok(entity) => {
            tracing::debug!(id = %id, tag = %entity.tag(), %cause, "entity destroyed");
            events.push(Event::Destroyed {
                id,
                tag: entity.tag(),
                cause,
            });
            true
        }
        Err(err) => {
            tracing::error!(error = %err, %cause, "despawn rejected");
            debug_assert!(false, "despawn rejected: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Bounds;
    use crate::entity::{Body, EntityInner, ObstacleComponents};
    use crate::roster::SpriteKind;
    use glam::DVec2;

    #[test]
    fn resolver_is_object_safe() {
        fn _accepts_boxed(_resolver: Box<dyn Resolver>) {}
        fn _accepts_slice(_resolvers: &[Box<dyn Resolver>]) {}
    }

    #[test]
    fn default_chain_covers_every_kind_once() {
        let chain = default_chain();
        for kind in [CommandKind::Motion, CommandKind::Combat, CommandKind::Lifecycle] {
            let handlers = chain.iter().filter(|r| r.handles().contains(&kind)).count();
            assert_eq!(handlers, 1, "{kind} handled {handlers} times");
        }
    }

    #[test]
    fn destroy_records_event() {
        let mut arena = Arena::new(Bounds::new(100.0, 100.0));
        let id = arena.spawn(
            Body::new(DVec2::ZERO, DVec2::new(10.0, 10.0), SpriteKind::Rock),
            EntityInner::Obstacle(ObstacleComponents),
        );
        let mut events = EventLog::new();

        assert!(destroy(&mut arena, id, DestroyCause::Host, &mut events));
        assert!(!arena.contains(id));
        assert!(matches!(
            events.events(),
            [Event::Destroyed { cause: DestroyCause::Host, .. }]
        ));
    }
}
