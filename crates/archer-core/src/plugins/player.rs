//! Player behaviour, driven by recorded input instead of AI.
//!
//! Movement follows the blended heading of the held direction keys and is
//! clamped to the arena. Aiming follows the pointer; while fire is wanted
//! the aim becomes an attack.

use crate::entity::EntityTag;
use crate::geometry::step_along;
use crate::output::{Command, CommandKind, PluginId};
use crate::plugin::{Plugin, PluginContext, PluginDeclaration};
use crate::world_view::WorldView;

/// Turns the player's recorded input into commands.
///
/// ```
/// use archer_core::plugin::Plugin;
/// use archer_core::plugins::PlayerPlugin;
///
/// assert_eq!(PlayerPlugin::new().declaration().id.as_str(), "player_input");
/// ```
pub struct PlayerPlugin {
    declaration: PluginDeclaration,
}

impl PlayerPlugin {
    /// Creates a new `PlayerPlugin`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: PluginDeclaration {
                id: PluginId::from_static("player_input"),
                required_tags: vec![EntityTag::Player],
                emits: vec![CommandKind::Motion, CommandKind::Combat],
            },
        }
    }
}

impl Default for PlayerPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PlayerPlugin {
    fn declaration(&self) -> &PluginDeclaration {
        &self.declaration
    }

    fn run(&self, ctx: &PluginContext, view: &WorldView) -> Vec<Command> {
        let Some(entity) = view.get_entity(ctx.entity_id) else {
            return vec![];
        };
        let Some(player) = entity.as_player() else {
            return vec![];
        };
        let input = &player.input;
        let mut commands = Vec::with_capacity(2);

        if let Some(heading) = input.directions.heading() {
            let stepped = step_along(
                entity.body().position,
                heading,
                player.fighter.speed,
                ctx.delta,
            );
            commands.push(Command::MoveTo {
                target: ctx.entity_id,
                position: view.bounds().clamp(stepped),
            });
        }

        // Motion resolves before combat, so both aim from the moved position.
        if let Some(pointer) = input.pointer {
            if input.wants_fire() {
                commands.push(Command::AttackTo {
                    source: ctx.entity_id,
                    point: pointer,
                });
            } else {
                commands.push(Command::LookAt {
                    target: ctx.entity_id,
                    point: pointer,
                });
            }
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Arena, Bounds};
    use crate::entity::{Body, Cooldown, EntityId, EntityInner, Faction, Fighter, PlayerComponents};
    use crate::input::{Direction, InputEvent, InputState};
    use crate::roster::{ProjectileKind, SpriteKind};
    use glam::DVec2;

    fn ctx(entity_id: EntityId) -> PluginContext {
        PluginContext {
            entity_id,
            tick: 0,
            now_ms: 0.0,
            delta: 1.0,
        }
    }

    fn arena_with_player(at: DVec2, events: &[InputEvent]) -> (Arena, EntityId) {
        let mut input = InputState::default();
        for event in events {
            input.apply(*event);
        }
        let mut arena = Arena::new(Bounds::new(600.0, 600.0));
        let id = arena.spawn(
            Body::new(at, DVec2::new(48.0, 48.0), SpriteKind::Archer),
            EntityInner::Player(PlayerComponents {
                fighter: Fighter {
                    speed: 4.0,
                    cooldown: Cooldown::new(2.0),
                    projectile: ProjectileKind::Arrow,
                    faction: Faction::Player,
                },
                input,
            }),
        );
        (arena, id)
    }

    #[test]
    fn idle_input_emits_nothing() {
        let (arena, id) = arena_with_player(DVec2::new(300.0, 300.0), &[]);
        assert!(PlayerPlugin::new().run(&ctx(id), &WorldView::new(&arena)).is_empty());
    }

    #[test]
    fn held_keys_move_along_blended_heading() {
        let (arena, id) = arena_with_player(
            DVec2::new(300.0, 300.0),
            &[
                InputEvent::DirectionPressed(Direction::Down),
                InputEvent::DirectionPressed(Direction::Right),
            ],
        );
        let commands = PlayerPlugin::new().run(&ctx(id), &WorldView::new(&arena));

        let [Command::MoveTo { position, .. }] = commands.as_slice() else {
            panic!("expected a single move, got {commands:?}");
        };
        let expected = 300.0 + 4.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert!((position.x - expected).abs() < 1e-9);
        assert!((position.y - expected).abs() < 1e-9);
    }

    #[test]
    fn movement_is_clamped_to_arena() {
        let (arena, id) = arena_with_player(
            DVec2::new(1.0, 300.0),
            &[InputEvent::DirectionPressed(Direction::Left)],
        );
        let commands = PlayerPlugin::new().run(&ctx(id), &WorldView::new(&arena));
        assert_eq!(
            commands,
            vec![Command::MoveTo {
                target: id,
                position: DVec2::new(0.0, 300.0),
            }]
        );
    }

    #[test]
    fn pointer_without_fire_only_aims() {
        let (arena, id) = arena_with_player(
            DVec2::new(300.0, 300.0),
            &[InputEvent::PointerMoved(DVec2::new(10.0, 10.0))],
        );
        let commands = PlayerPlugin::new().run(&ctx(id), &WorldView::new(&arena));
        assert_eq!(
            commands,
            vec![Command::LookAt {
                target: id,
                point: DVec2::new(10.0, 10.0),
            }]
        );
    }

    #[test]
    fn held_fire_attacks_pointer() {
        let (arena, id) = arena_with_player(
            DVec2::new(300.0, 300.0),
            &[
                InputEvent::PointerMoved(DVec2::new(10.0, 10.0)),
                InputEvent::FirePressed,
            ],
        );
        let commands = PlayerPlugin::new().run(&ctx(id), &WorldView::new(&arena));
        assert_eq!(
            commands,
            vec![Command::AttackTo {
                source: id,
                point: DVec2::new(10.0, 10.0),
            }]
        );
    }
}
