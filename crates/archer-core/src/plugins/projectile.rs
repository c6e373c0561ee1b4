//! Projectile flight.
//!
//! Each tick a projectile advances along its launch angle. Leaving the arena
//! removes it. Otherwise it tests the opposing side at its new position:
//! player projectiles test live enemies, enemy projectiles test the player.
//!
//! # Outputs
//!
//! - `Command::MoveTo` every tick
//! - `Command::Despawn` when the new position is outside the arena
//! - `Command::Strike` on the first hit

use crate::entity::{Entity, EntityTag, Faction};
use crate::geometry::{step_along, Circle};
use crate::output::{Command, CommandKind, DestroyCause, PluginId};
use crate::plugin::{Plugin, PluginContext, PluginDeclaration};
use crate::world_view::WorldView;

/// Moves projectiles and detects their hits.
///
/// ```
/// use archer_core::plugin::Plugin;
/// use archer_core::plugins::ProjectilePlugin;
///
/// let plugin = ProjectilePlugin::new();
/// assert_eq!(plugin.declaration().id.as_str(), "projectile");
/// ```
pub struct ProjectilePlugin {
    declaration: PluginDeclaration,
}

impl ProjectilePlugin {
    /// Creates a new `ProjectilePlugin`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: PluginDeclaration {
                id: PluginId::from_static("projectile"),
                required_tags: vec![EntityTag::Projectile],
                emits: vec![CommandKind::Motion, CommandKind::Combat, CommandKind::Lifecycle],
            },
        }
    }
}

impl Default for ProjectilePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ProjectilePlugin {
    fn declaration(&self) -> &PluginDeclaration {
        &self.declaration
    }

    fn run(&self, ctx: &PluginContext, view: &WorldView) -> Vec<Command> {
        let Some(entity) = view.get_entity(ctx.entity_id) else {
            return vec![];
        };
        let Some(projectile) = entity.as_projectile() else {
            return vec![];
        };

        let body = entity.body();
        let next = step_along(body.position, projectile.launch_angle, projectile.speed, ctx.delta);
        let mut commands = vec![Command::MoveTo {
            target: ctx.entity_id,
            position: next,
        }];

        if !view.bounds().contains(next) {
            commands.push(Command::Despawn {
                target: ctx.entity_id,
                cause: DestroyCause::OutOfBounds,
            });
            return commands;
        }

        let circle = Circle::for_body(next, body.size);
        let victim = match projectile.faction {
            Faction::Player => view.first_enemy_hit(circle),
            Faction::Enemy => view
                .player()
                .map(Entity::id)
                .filter(|_| view.hits_player(circle)),
        };
        if let Some(victim) = victim {
            commands.push(Command::Strike {
                projectile: ctx.entity_id,
                victim,
            });
        }

        commands
    }
}

// =============================================================================
// Tests
// =============================================================================
