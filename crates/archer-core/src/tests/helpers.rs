//! Test helper functions for setting up sessions and entities.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use glam::DVec2;

use crate::config::SimulationConfig;
use crate::entity::{EntityId, EntityTag, Faction};
use crate::output::{Command, CommandKind, PluginId};
use crate::plugin::{Plugin, PluginContext, PluginDeclaration};
use crate::roster::{EnemySpecies, Tier};
use crate::signal::Signal;
use crate::simulation::Simulation;
use crate::world_view::WorldView;

/// An on-schedule tick.
pub const TICK: Duration = Duration::from_millis(30);

/// Where the player starts in the default arena.
pub const CENTRE: DVec2 = DVec2::new(300.0, 300.0);

// =============================================================================
// Session Setup
// =============================================================================

/// Default configuration with a fixed seed and the given enemy budget.
pub fn test_config(total_enemies: u32) -> SimulationConfig {
    SimulationConfig {
        total_enemies,
        seed: 42,
        ..SimulationConfig::default()
    }
}

/// A fresh session with its startup signals already drained.
pub fn new_sim(total_enemies: u32) -> Simulation {
    let mut sim = Simulation::new(test_config(total_enemies)).unwrap();
    sim.drain_signals();
    sim
}

/// Runs `n` on-schedule ticks.
pub fn step_ticks(sim: &mut Simulation, n: usize) {
    for _ in 0..n {
        sim.step(TICK);
    }
}

/// Places a novice enemy of `species` at `position`.
pub fn place_enemy(sim: &mut Simulation, species: EnemySpecies, position: DVec2) -> EntityId {
    sim.spawn_enemy(species, Tier::Novice, position)
}

// =============================================================================
// Queries
// =============================================================================

/// Position of a live entity.
pub fn get_position(sim: &Simulation, id: EntityId) -> Option<DVec2> {
    sim.arena().get(id).map(|e| e.body().position)
}

/// True once the entity has been removed.
pub fn is_destroyed(sim: &Simulation, id: EntityId) -> bool {
    !sim.arena().contains(id)
}

/// Live projectiles owned by `faction`.
pub fn count_projectiles(sim: &Simulation, faction: Faction) -> usize {
    sim.arena()
        .entities_sorted()
        .filter_map(|e| e.as_projectile())
        .filter(|p| p.faction == faction)
        .count()
}

/// Number of drained signals matching `predicate`.
pub fn count_signals(signals: &[Signal], predicate: impl Fn(&Signal) -> bool) -> usize {
    signals.iter().filter(|s| predicate(s)).count()
}

// =============================================================================
// Observing Dispatch
// =============================================================================

/// Records every entity it runs for, in dispatch order.
pub struct CountingPlugin {
    declaration: PluginDeclaration,
    calls: Arc<Mutex<Vec<EntityId>>>,
}

impl CountingPlugin {
    /// A plugin for `tags` writing into `calls`.
    pub fn new(tags: &[EntityTag], calls: Arc<Mutex<Vec<EntityId>>>) -> Self {
        Self {
            declaration: PluginDeclaration {
                id: PluginId::new("counting"),
                required_tags: tags.to_vec(),
                emits: vec![CommandKind::Motion],
            },
            calls,
        }
    }
}

impl Plugin for CountingPlugin {
    fn declaration(&self) -> &PluginDeclaration {
        &self.declaration
    }

    fn run(&self, ctx: &PluginContext, _view: &WorldView) -> Vec<Command> {
        self.calls.lock().unwrap().push(ctx.entity_id);
        vec![]
    }
}

/// Adds a [`CountingPlugin`] after the behaviour plugin of every mobile kind
/// and returns the shared call log.
pub fn observe_dispatch(sim: &mut Simulation) -> Arc<Mutex<Vec<EntityId>>> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let tags = [EntityTag::Player, EntityTag::Enemy, EntityTag::Projectile];
    for tag in tags {
        sim.plugins_mut()
            .register(tag, Arc::new(CountingPlugin::new(&tags, Arc::clone(&calls))));
    }
    calls
}
