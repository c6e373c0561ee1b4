//! Lifecycle resolver: removals requested by plugins.

use crate::arena::Arena;
use crate::output::{Command, CommandKind, EventLog};

use super::{destroy, Resolver};

/// Applies `Despawn`.
///
/// Despawns for entities already removed earlier in the batch are skipped.
#[derive(Debug, Clone, Default)]
pub struct LifecycleResolver;

impl LifecycleResolver {
    /// Creates a lifecycle resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for LifecycleResolver {
    fn handles(&self) -> &[CommandKind] {
        &[CommandKind::Lifecycle]
    }

    fn resolve(&self, commands: &[&Command], arena: &mut Arena, events: &mut EventLog) {
        for command in commands {
            if let Command::Despawn { target, cause } = command {
                if arena.contains(*target) {
                    destroy(arena, *target, *cause, events);
                }
            }
        }
    }
}
