//! Scripted stand-in for a human player.
//!
//! Each tick the autopilot aims at the nearest enemy, holds fire while any
//! enemy is alive and walks away from enemies that come too close. It keeps
//! track of what it has already pressed, so it only emits input changes,
//! the way a real keyboard and mouse would.

use archer_core::entity::{Entity, EntityTag};
use archer_core::input::{Direction, InputEvent, MoveDirections};
use archer_core::Simulation;
use glam::DVec2;

/// Distance below which the autopilot backs away from an enemy.
pub const DEFAULT_FLEE_RADIUS: f64 = 200.0;

/// Below this, an axis of the escape vector is ignored.
const AXIS_DEADZONE: f64 = 1.0;

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Input generator with pressed-key memory.
#[derive(Debug, Clone)]
pub struct Autopilot {
    flee_radius: f64,
    held: MoveDirections,
    firing: bool,
}

impl Autopilot {
    pub fn new(flee_radius: f64) -> Self {
        Self {
            flee_radius,
            held: MoveDirections::empty(),
            firing: false,
        }
    }

    /// Input events to apply before the next tick.
    pub fn plan(&mut self, sim: &Simulation) -> Vec<InputEvent> {
        let Some(player) = sim.arena().player() else {
            return vec![];
        };
        let position = player.body().position;
        let nearest = nearest_enemy(sim, position);

        let mut events = Vec::new();
        if let Some(target) = nearest {
            events.push(InputEvent::PointerMoved(target));
        }

        let want_fire = nearest.is_some();
        if want_fire != self.firing {
            events.push(if want_fire {
                InputEvent::FirePressed
            } else {
                InputEvent::FireReleased
            });
            self.firing = want_fire;
        }

        let wanted = nearest
            .filter(|target| target.distance(position) < self.flee_radius)
            .map_or(MoveDirections::empty(), |target| escape(position - target));
        for direction in DIRECTIONS {
            let flag = direction.flag();
            match (self.held.contains(flag), wanted.contains(flag)) {
                (false, true) => events.push(InputEvent::DirectionPressed(direction)),
                (true, false) => events.push(InputEvent::DirectionReleased(direction)),
                _ => {}
            }
        }
        self.held = wanted;

        events
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(DEFAULT_FLEE_RADIUS)
    }
}

fn nearest_enemy(sim: &Simulation, from: DVec2) -> Option<DVec2> {
    sim.arena()
        .entities_sorted()
        .filter(|e| e.tag() == EntityTag::Enemy)
        .map(Entity::body)
        .map(|body| body.position)
        .min_by(|a, b| {
            a.distance_squared(from)
                .partial_cmp(&b.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Keys that walk along `away`, one per axis at most.
fn escape(away: DVec2) -> MoveDirections {
    let mut keys = MoveDirections::empty();
    if away.x > AXIS_DEADZONE {
        keys |= MoveDirections::RIGHT;
    } else if away.x < -AXIS_DEADZONE {
        keys |= MoveDirections::LEFT;
    }
    if away.y > AXIS_DEADZONE {
        keys |= MoveDirections::DOWN;
    } else if away.y < -AXIS_DEADZONE {
        keys |= MoveDirections::UP;
    }
    keys
}
