//! Motion resolver: turning and movement.

use crate::arena::Arena;
use crate::output::{Command, CommandKind, Event, EventLog};

use super::Resolver;

/// Applies `LookAt`, `StepTo` and `MoveTo`.
///
/// `StepTo` moves at the entity's own speed. Every applied command records
/// an [`Event::Moved`].
///
/// ```
/// use archer_core::output::CommandKind;
/// use archer_core::resolver::{MotionResolver, Resolver};
///
/// assert_eq!(MotionResolver::new().handles(), &[CommandKind::Motion]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MotionResolver;

impl MotionResolver {
    /// Creates a motion resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for MotionResolver {
    fn handles(&self) -> &[CommandKind] {
        &[CommandKind::Motion]
    }

    fn resolve(&self, commands: &[&Command], arena: &mut Arena, events: &mut EventLog) {
        for command in commands {
            let id = command.subject();
            let Some(entity) = arena.get_mut(id) else {
                continue;
            };
            match command {
                Command::LookAt { point, .. } => {
                    entity.body_mut().look_at(*point);
                }
                Command::StepTo { point, delta, .. } => {
                    let speed = entity.speed();
                    entity.body_mut().step_to(*point, speed, *delta);
                }
                Command::MoveTo { position, .. } => {
                    entity.body_mut().position = *position;
                }
                _ => continue,
            }
            events.push(Event::Moved { id });
        }
    }
}
