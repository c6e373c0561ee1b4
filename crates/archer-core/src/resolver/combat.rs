//! Combat resolver: attacks, projectile launches and hits.
//!
//! An attack always turns the shooter towards its aim point; it launches a
//! projectile only when the shooter's cooldown allows. Attacks on cooldown
//! are dropped, never queued.

use glam::DVec2;

use crate::arena::Arena;
use crate::entity::{
    Body, Entity, EntityId, EntityInner, EntityTag, Faction, ProjectileComponents,
};
use crate::output::{Command, CommandKind, DestroyCause, Event, EventLog};
use crate::roster::ProjectileKind;

use super::{destroy, Resolver};

/// Spawns a projectile at `position`, launched and facing along
/// `launch_angle`.
pub fn spawn_projectile(
    arena: &mut Arena,
    kind: ProjectileKind,
    faction: Faction,
    position: DVec2,
    launch_angle: f64,
) -> EntityId {
    let mut body = Body::new(position, kind.size(), kind.sprite());
    body.facing = launch_angle + body.facing_offset;
    arena.spawn(
        body,
        EntityInner::Projectile(ProjectileComponents::new(kind, faction, launch_angle)),
    )
}

/// Turns `shooter` towards `point` and fires if its cooldown is ready.
///
/// A pending one-shot fire request on the player is consumed either way.
/// Returns the new projectile, or `None` if the shooter is not a live
/// fighter or is still cooling down.
pub fn attack_to(
    arena: &mut Arena,
    shooter: EntityId,
    point: DVec2,
    events: &mut EventLog,
) -> Option<EntityId> {
    let now_ms = arena.now_ms();
    let entity = arena.get_mut(shooter)?;
    if entity.fighter().is_none() {
        return None;
    }

    let (body, inner) = entity.parts_mut();
    let launch_angle = body.look_at(point);
    let origin = body.position;
    if let Some(player) = inner.as_player_mut() {
        player.input.fire_pulse = false;
    }
    events.push(Event::Moved { id: shooter });

    let fighter = inner.fighter_mut()?;
    if !fighter.cooldown.try_trigger(now_ms) {
        return None;
    }
    let (kind, faction) = (fighter.projectile, fighter.faction);

    let projectile = spawn_projectile(arena, kind, faction, origin, launch_angle);
    tracing::debug!(
        shooter = %shooter,
        projectile = %projectile,
        ?kind,
        angle = launch_angle,
        "projectile fired"
    );
    events.push(Event::ProjectileFired {
        source: shooter,
        projectile,
    });
    Some(projectile)
}

/// Applies `AttackTo` and `Strike`.
///
/// A strike always destroys the projectile. A struck enemy is destroyed; a
/// struck player records [`Event::PlayerHit`].
///
/// ```
/// use archer_core::output::CommandKind;
/// use archer_core::resolver::{CombatResolver, Resolver};
///
/// assert_eq!(CombatResolver::new().handles(), &[CommandKind::Combat]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CombatResolver;

impl CombatResolver {
    /// Creates a combat resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn strike(arena: &mut Arena, projectile: EntityId, victim: EntityId, events: &mut EventLog) {
        let Some(victim_tag) = arena.get(victim).map(Entity::tag) else {
            return;
        };
        if !arena.contains(projectile) {
            return;
        }

        destroy(arena, projectile, DestroyCause::Collision, events);
        match victim_tag {
            EntityTag::Player => {
                tracing::debug!(projectile = %projectile, victim = %victim, "projectile struck player");
                events.push(Event::PlayerHit { projectile });
            }
            EntityTag::Enemy => {
                destroy(arena, victim, DestroyCause::Collision, events);
            }
            EntityTag::Obstacle | EntityTag::Projectile => {}
        }
    }
}

impl Resolver for CombatResolver {
    fn handles(&self) -> &[CommandKind] {
        &[CommandKind::Combat]
    }

    fn resolve(&self, commands: &[&Command], arena: &mut Arena, events: &mut EventLog) {
        for command in commands {
            match command {
                Command::AttackTo { source, point } => {
                    attack_to(arena, *source, *point, events);
                }
                Command::Strike { projectile, victim } => {
                    Self::strike(arena, *projectile, *victim, events);
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Bounds;
    use crate::entity::{Cooldown, EnemyComponents, Fighter, PlayerComponents};
    use crate::input::InputState;
    use crate::roster::{EnemySpecies, SpriteKind, Tier};

    fn arena() -> Arena {
        Arena::new(Bounds::new(600.0, 600.0))
    }

    fn spawn_player(arena: &mut Arena, attack_speed: f64) -> EntityId {
        arena.spawn(
            Body::new(DVec2::new(300.0, 300.0), DVec2::new(48.0, 48.0), SpriteKind::Archer),
            EntityInner::Player(PlayerComponents {
                fighter: Fighter {
                    speed: 4.0,
                    cooldown: Cooldown::new(attack_speed),
                    projectile: ProjectileKind::Arrow,
                    faction: Faction::Player,
                },
                input: InputState::default(),
            }),
        )
    }

    fn spawn_goblin(arena: &mut Arena, at: DVec2) -> EntityId {
        arena.spawn(
            Body::new(at, DVec2::new(40.0, 40.0), SpriteKind::Goblin),
            EntityInner::Enemy(EnemyComponents::from_roster(EnemySpecies::Goblin, Tier::Novice)),
        )
    }

    mod attack_tests {
        use super::*;

        #[test]
        fn first_attack_fires_from_shooter_position() {
            let mut arena = arena();
            let player = spawn_player(&mut arena, 2.0);
            let mut events = EventLog::new();

            let arrow = attack_to(&mut arena, player, DVec2::new(500.0, 300.0), &mut events)
                .expect("cooldown starts ready");

            let arrow = arena.get(arrow).unwrap();
            assert_eq!(arrow.body().position, DVec2::new(300.0, 300.0));
            let components = arrow.as_projectile().unwrap();
            assert_eq!(components.faction, Faction::Player);
            assert!(components.launch_angle.abs() < 1e-9);
            assert!(events
                .events()
                .iter()
                .any(|e| matches!(e, Event::ProjectileFired { source, .. } if *source == player)));
        }

        #[test]
        fn attacks_within_interval_are_dropped() {
            let mut arena = arena();
            let player = spawn_player(&mut arena, 2.0);
            let mut events = EventLog::new();
            let aim = DVec2::new(0.0, 0.0);

            assert!(attack_to(&mut arena, player, aim, &mut events).is_some());
            arena.advance_time(499.0);
            assert!(attack_to(&mut arena, player, aim, &mut events).is_none());
            arena.advance_time(1.0);
            assert!(attack_to(&mut arena, player, aim, &mut events).is_some());

            assert_eq!(projectile_count(&arena), 2);
        }

        #[test]
        fn dropped_attack_still_turns_shooter() {
            let mut arena = arena();
            let player = spawn_player(&mut arena, 1.0);
            let mut events = EventLog::new();

            attack_to(&mut arena, player, DVec2::new(400.0, 300.0), &mut events);
            attack_to(&mut arena, player, DVec2::new(200.0, 300.0), &mut events);

            let facing = arena.get(player).unwrap().body().facing;
            assert!((facing - 270.0).abs() < 1e-9);
        }

        #[test]
        fn pulse_is_consumed_even_on_cooldown() {
            let mut arena = arena();
            let player = spawn_player(&mut arena, 1.0);
            let mut events = EventLog::new();
            attack_to(&mut arena, player, DVec2::ZERO, &mut events);

            if let Some(p) = arena.get_mut(player).and_then(|e| e.inner_mut().as_player_mut()) {
                p.input.fire_pulse = true;
            }
            assert!(attack_to(&mut arena, player, DVec2::ZERO, &mut events).is_none());
            assert!(!arena.get(player).unwrap().as_player().unwrap().input.fire_pulse);
        }

        #[test]
        fn non_fighters_cannot_attack() {
            let mut arena = arena();
            let stone = spawn_projectile(
                &mut arena,
                ProjectileKind::Stone,
                Faction::Enemy,
                DVec2::ZERO,
                0.0,
            );
            let mut events = EventLog::new();
            assert!(attack_to(&mut arena, stone, DVec2::ONE, &mut events).is_none());
            assert!(events.is_empty());
        }
    }

    mod strike_tests {
        use super::*;

        #[test]
        fn enemy_strike_destroys_both() {
            let mut arena = arena();
            let goblin = spawn_goblin(&mut arena, DVec2::new(100.0, 100.0));
            let arrow = spawn_projectile(
                &mut arena,
                ProjectileKind::Arrow,
                Faction::Player,
                DVec2::new(100.0, 100.0),
                0.0,
            );
            let mut events = EventLog::new();
            let command = Command::Strike { projectile: arrow, victim: goblin };

            CombatResolver::new().resolve(&[&command], &mut arena, &mut events);

            assert!(!arena.contains(arrow));
            assert!(!arena.contains(goblin));
            assert!(arena.live_enemies().is_empty());
        }

        #[test]
        fn player_strike_records_hit_and_keeps_player() {
            let mut arena = arena();
            let player = spawn_player(&mut arena, 1.0);
            let stone = spawn_projectile(
                &mut arena,
                ProjectileKind::Stone,
                Faction::Enemy,
                DVec2::new(300.0, 300.0),
                0.0,
            );
            let mut events = EventLog::new();
            let command = Command::Strike { projectile: stone, victim: player };

            CombatResolver::new().resolve(&[&command], &mut arena, &mut events);

            assert!(!arena.contains(stone));
            assert!(arena.contains(player));
            assert!(events
                .events()
                .contains(&Event::PlayerHit { projectile: stone }));
        }
    }

    fn projectile_count(arena: &Arena) -> usize {
        arena
            .entities_sorted()
            .filter(|e| e.tag() == EntityTag::Projectile)
            .count()
    }
}
