//! Enemy behaviour.
//!
//! Enemies have two states, recomputed from distance every tick: out of
//! range they face the player and step towards it; within `attack_range`
//! (inclusive) they attack the player's position, subject to cooldown.
//! Without a live player they idle.

use crate::entity::EntityTag;
use crate::output::{Command, CommandKind, PluginId};
use crate::plugin::{Plugin, PluginContext, PluginDeclaration};
use crate::world_view::WorldView;

/// Approach-or-attack behaviour for enemies.
pub struct EnemyPlugin {
    declaration: PluginDeclaration,
}

impl EnemyPlugin {
    /// Creates a new `EnemyPlugin`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: PluginDeclaration {
                id: PluginId::from_static("enemy_ai"),
                required_tags: vec![EntityTag::Enemy],
                emits: vec![CommandKind::Motion, CommandKind::Combat],
            },
        }
    }
}

impl Default for EnemyPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for EnemyPlugin {
    fn declaration(&self) -> &PluginDeclaration {
        &self.declaration
    }

    fn run(&self, ctx: &PluginContext, view: &WorldView) -> Vec<Command> {
        let Some(entity) = view.get_entity(ctx.entity_id) else {
            return vec![];
        };
        let Some(enemy) = entity.as_enemy() else {
            return vec![];
        };
        let Some(player) = view.player() else {
            return vec![];
        };

        let target = player.body().position;
        if entity.body().distance_to(player.body()) <= enemy.attack_range {
            vec![Command::AttackTo {
                source: ctx.entity_id,
                point: target,
            }]
        } else {
            vec![Command::StepTo {
                target: ctx.entity_id,
                point: target,
                delta: ctx.delta,
            }]
        }
    }
}
