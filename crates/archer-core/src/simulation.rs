//! The session driver: spawning, per-entity dispatch, scoring and the
//! win/lose states.
//!
//! Each [`Simulation::step`] runs one tick:
//!
//! 1. **WIN CHECK**: if every enemy of the session is destroyed, the game is
//!    won and nothing else runs.
//! 2. **SPAWN**: at most one enemy per spawn interval, on the arena edge.
//! 3. **DISPATCH**: every subscribed entity, in id order, runs its plugin
//!    bundle. Each plugin's commands are resolved before the next plugin or
//!    entity runs, so later entities see earlier moves and removals.
//! 4. **ADVANCE**: the virtual clock and tick counter move forward.
//!
//! Dispatch walks a snapshot of the subscriber set. An entity destroyed
//! mid-tick is skipped when its turn comes; an entity spawned mid-tick first
//! updates on the next tick.
//!
//! # Example
//!
//! ```
//! use archer_core::config::SimulationConfig;
//! use archer_core::simulation::{Phase, Simulation};
//! use std::time::Duration;
//!
//! let config = SimulationConfig {
//!     total_enemies: 3,
//!     seed: 7,
//!     ..SimulationConfig::default()
//! };
//! let mut sim = Simulation::new(config).unwrap();
//!
//! for _ in 0..10 {
//!     sim.step(Duration::from_millis(30));
//! }
//!
//! assert_eq!(sim.tick(), 10);
//! assert_eq!(sim.phase(), Phase::Playing);
//! assert_eq!(sim.arena().live_enemies().len(), 1);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::arena::{Arena, Bounds};
use crate::clock::{self, Clock};
use crate::config::SimulationConfig;
use crate::entity::{
    Body, EnemyComponents, Entity, EntityId, EntityInner, EntityTag, Faction,
    ObstacleComponents, PlayerComponents,
};
use crate::error::SimError;
use crate::input::InputEvent;
use crate::output::{DestroyCause, Event, EventLog};
use crate::plugin::{PluginContext, PluginRegistry};
use crate::resolver::{self, Resolver};
use crate::roster::{EnemySpecies, ProjectileKind, SpriteKind, Tier};
use crate::scoring::Scoreboard;
use crate::signal::{EntitySnapshot, Outcome, Signal};
use crate::spawner::Spawner;
use crate::world_view::WorldView;

// =============================================================================
// Phase
// =============================================================================

/// Lifecycle of a session. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Ticks run.
    Playing,
    /// Every enemy was destroyed.
    Won,
    /// The player was hit.
    Lost,
}

impl Phase {
    /// True for `Won` and `Lost`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }

    /// The outcome of a finished session.
    #[must_use]
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Playing => None,
            Self::Won => Some(Outcome::Won),
            Self::Lost => Some(Outcome::Lost),
        }
    }
}

impl From<Outcome> for Phase {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => Self::Won,
            Outcome::Lost => Self::Lost,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Playing => write!(f, "playing"),
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// One game session.
///
/// `Simulation` owns:
/// - the arena and every entity in it
/// - the plugin registry and resolver chain that make up entity updates
/// - the scoreboard, spawner and seeded RNG
/// - the queue of outward [`Signal`]s
///
/// Hosts call [`handle_input`](Self::handle_input) between ticks, then
/// [`step`](Self::step), then [`drain_signals`](Self::drain_signals).
pub struct Simulation {
    config: SimulationConfig,
    arena: Arena,
    plugins: PluginRegistry,
    resolvers: Vec<Box<dyn Resolver>>,
    scoreboard: Scoreboard,
    spawner: Spawner,
    clock: Clock,
    rng: ChaCha8Rng,
    phase: Phase,
    /// Set by teardown; no further ticks run.
    stopped: bool,
    signals: Vec<Signal>,
    events: EventLog,
    /// Entities moved or turned since the last flush.
    dirty: BTreeSet<EntityId>,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("arena", &self.arena)
            .field("plugins", &self.plugins)
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .field("scoreboard", &self.scoreboard)
            .field("phase", &self.phase)
            .field("stopped", &self.stopped)
            .field("pending_signals", &self.signals.len())
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Starts a session: validates `config` and places the player at the
    /// centre of the arena.
    ///
    /// The first drained signals announce the player and the initial score,
    /// level and enemy budget.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the configuration is invalid.
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;

        let bounds = Bounds::new(config.arena_width, config.arena_height);
        let mut arena = Arena::new(bounds);
        let player = arena.spawn(
            Body::new(bounds.center(), config.player.size, SpriteKind::Archer),
            EntityInner::Player(PlayerComponents::from_loadout(&config.player)),
        );

        let scoreboard = Scoreboard::new(config.total_enemies);
        // Millisecond intervals are far below f64's exact integer range.
        #[allow(clippy::cast_precision_loss)]
        let spawner = Spawner::new(config.spawn_interval_ms as f64);

        let mut sim = Self {
            arena,
            plugins: PluginRegistry::default_bundles(),
            resolvers: resolver::default_chain(),
            scoreboard,
            spawner,
            clock: Clock::new(config.tick_period_ms),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            phase: Phase::Playing,
            stopped: false,
            signals: Vec::new(),
            events: EventLog::new(),
            dirty: BTreeSet::new(),
            config,
        };

        sim.announce(player);
        sim.signals.push(Signal::ScoreChanged(scoreboard.score()));
        sim.signals.push(Signal::LevelChanged(scoreboard.level()));
        sim.signals
            .push(Signal::EnemiesRemainingChanged(scoreboard.remaining()));

        tracing::info!(
            width = bounds.width,
            height = bounds.height,
            total_enemies = scoreboard.total(),
            seed = sim.config.seed,
            "session started"
        );
        Ok(sim)
    }

    /// Runs one tick covering `elapsed` wall time and returns the phase
    /// after it.
    ///
    /// Does nothing once the session is over or torn down.
    pub fn step(&mut self, elapsed: Duration) -> Phase {
        if !self.is_running() {
            return self.phase;
        }
        if self.scoreboard.is_won() {
            self.finish(Outcome::Won);
            return self.phase;
        }

        let delta = self.clock.delta(elapsed);
        let now_ms = self.arena.now_ms();
        let tick = self.arena.current_tick();

        self.try_spawn(now_ms);

        let subscribers = self.arena.subscribers_snapshot();
        tracing::trace!(tick, delta, subscribers = subscribers.len(), "tick");

        for id in subscribers {
            if self.phase != Phase::Playing {
                break;
            }
            let ctx = PluginContext {
                entity_id: id,
                tick,
                now_ms,
                delta,
            };
            self.update_entity(&ctx);
        }

        self.flush_updates();
        self.arena.advance_time(clock::millis(elapsed));
        self.arena.advance_tick();
        self.phase
    }

    /// Runs the plugin bundle of one entity, resolving after each plugin.
    fn update_entity(&mut self, ctx: &PluginContext) {
        let Some(tag) = self.arena.get(ctx.entity_id).map(Entity::tag) else {
            return;
        };
        let bundle = self.plugins.plugins_for(tag).to_vec();

        for plugin in bundle {
            if !self.arena.contains(ctx.entity_id) || self.phase != Phase::Playing {
                break;
            }
            let commands = plugin.run(ctx, &WorldView::new(&self.arena));
            resolver::apply(&self.resolvers, &commands, &mut self.arena, &mut self.events);
            self.absorb_events();
        }
    }

    /// Folds resolver events into the scoreboard, phase and signals.
    fn absorb_events(&mut self) {
        let events: Vec<Event> = self.events.drain().collect();
        for event in events {
            match event {
                Event::ProjectileFired { projectile, .. } => self.announce(projectile),
                Event::Moved { id } => {
                    self.dirty.insert(id);
                }
                Event::Destroyed { id, tag, cause } => {
                    self.dirty.remove(&id);
                    self.signals.push(Signal::EntityRemoved { id });
                    if tag == EntityTag::Enemy && cause != DestroyCause::Teardown {
                        self.record_kill();
                    }
                }
                Event::PlayerHit { projectile } => {
                    tracing::info!(projectile = %projectile, "player hit");
                    self.finish(Outcome::Lost);
                }
            }
        }
    }

    fn record_kill(&mut self) {
        let outcome = self.scoreboard.record_kill();
        self.signals.push(Signal::ScoreChanged(outcome.score));
        if let Some(level) = outcome.level_changed {
            tracing::info!(score = outcome.score, level, "level changed");
            self.signals.push(Signal::LevelChanged(level));
        }
        tracing::info!(
            score = outcome.score,
            total = self.scoreboard.total(),
            "enemy destroyed"
        );
    }

    fn finish(&mut self, outcome: Outcome) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = Phase::from(outcome);
        self.signals.push(Signal::GameEnded(outcome));
        tracing::info!(
            %outcome,
            score = self.scoreboard.score(),
            tick = self.arena.current_tick(),
            "game ended"
        );
    }

    fn try_spawn(&mut self, now_ms: f64) {
        if !self.spawner.is_due(now_ms) {
            return;
        }
        let Some(remaining) = self.scoreboard.claim_spawn() else {
            return;
        };
        self.spawner.mark(now_ms);

        let plan = self
            .spawner
            .roll(&mut self.rng, self.scoreboard.level(), self.arena.bounds());
        let id = self.spawn_enemy(plan.species, plan.tier, plan.position);
        self.signals.push(Signal::EnemiesRemainingChanged(remaining));

        tracing::info!(
            id = %id,
            species = ?plan.species,
            tier = ?plan.tier,
            x = plan.position.x,
            y = plan.position.y,
            remaining,
            "enemy spawned"
        );
    }

    fn announce(&mut self, id: EntityId) {
        if let Some(entity) = self.arena.get(id) {
            self.signals.push(Signal::EntitySpawned(EntitySnapshot::of(entity)));
        }
    }

    fn flush_updates(&mut self) {
        for id in std::mem::take(&mut self.dirty) {
            if let Some(entity) = self.arena.get(id) {
                self.signals.push(Signal::EntityUpdated(EntitySnapshot::of(entity)));
            }
        }
    }

    // ===== Host API =====

    /// Records an input event on the player. Takes effect on the next tick.
    pub fn handle_input(&mut self, event: InputEvent) {
        match self
            .arena
            .player_mut()
            .and_then(|player| player.inner_mut().as_player_mut())
        {
            Some(player) => player.input.apply(event),
            None => tracing::warn!(?event, "input ignored: no player"),
        }
    }

    /// Destroys an entity now. Enemies destroyed this way still score.
    ///
    /// # Errors
    ///
    /// [`SimError::Arena`] if the entity is already gone or never existed.
    pub fn destroy(&mut self, id: EntityId) -> Result<(), SimError> {
        let entity = match self.arena.despawn(id) {
            Ok(entity) => entity,
            Err(err) => {
                tracing::warn!(error = %err, "destroy rejected");
                return Err(err.into());
            }
        };
        tracing::debug!(id = %id, tag = %entity.tag(), "entity destroyed by host");
        self.events.push(Event::Destroyed {
            id,
            tag: entity.tag(),
            cause: DestroyCause::Host,
        });
        self.absorb_events();
        Ok(())
    }

    /// Turns `shooter` towards `point` and fires if its cooldown allows.
    ///
    /// Returns the launched projectile, or `None` while cooling down.
    ///
    /// # Errors
    ///
    /// [`SimError::Arena`] if the shooter is gone, or
    /// [`SimError::NotAFighter`] if it cannot attack.
    pub fn attack_to(
        &mut self,
        shooter: EntityId,
        point: DVec2,
    ) -> Result<Option<EntityId>, SimError> {
        if self.arena.require(shooter)?.fighter().is_none() {
            return Err(SimError::NotAFighter(shooter));
        }
        let projectile = resolver::attack_to(&mut self.arena, shooter, point, &mut self.events);
        self.absorb_events();
        Ok(projectile)
    }

    /// Places an enemy. Does not draw from the session's enemy budget.
    pub fn spawn_enemy(&mut self, species: EnemySpecies, tier: Tier, position: DVec2) -> EntityId {
        let definition = species.definition();
        let id = self.arena.spawn(
            Body::new(position, definition.size, definition.sprite),
            EntityInner::Enemy(EnemyComponents::from_roster(species, tier)),
        );
        self.announce(id);
        id
    }

    /// Places an inert obstacle.
    pub fn spawn_obstacle(&mut self, position: DVec2, size: DVec2) -> EntityId {
        let id = self.arena.spawn(
            Body::new(position, size, SpriteKind::Rock),
            EntityInner::Obstacle(ObstacleComponents),
        );
        self.announce(id);
        id
    }

    /// Places a projectile already in flight along `launch_angle` degrees.
    pub fn spawn_projectile(
        &mut self,
        kind: ProjectileKind,
        faction: Faction,
        position: DVec2,
        launch_angle: f64,
    ) -> EntityId {
        let id = resolver::spawn_projectile(&mut self.arena, kind, faction, position, launch_angle);
        self.announce(id);
        id
    }

    /// Removes every entity without scoring and stops the session.
    pub fn teardown(&mut self) {
        let ids: Vec<EntityId> = self.arena.entity_ids_sorted().collect();
        let count = ids.len();
        for id in ids {
            resolver::destroy(&mut self.arena, id, DestroyCause::Teardown, &mut self.events);
        }
        self.absorb_events();
        self.dirty.clear();
        self.stopped = true;
        tracing::info!(removed = count, "session torn down");
    }

    /// Presentation state of every live entity, in id order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<EntitySnapshot> {
        self.arena.entities_sorted().map(EntitySnapshot::of).collect()
    }

    /// Takes the signals queued since the last call.
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    // ===== Accessors =====

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// True while ticks still run.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Playing) && !self.stopped
    }

    /// Score, level and enemy budget.
    #[must_use]
    pub const fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Read-only arena.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Plugin registry, for adding or replacing entity behaviour.
    #[must_use]
    pub fn plugins_mut(&mut self) -> &mut PluginRegistry {
        &mut self.plugins
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Completed ticks.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.arena.current_tick()
    }

    /// Simulation clock in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> f64 {
        self.arena.now_ms()
    }

    /// The player's id, while alive.
    #[must_use]
    pub const fn player_id(&self) -> Option<EntityId> {
        self.arena.player_id()
    }
}

// =============================================================================
// Tests
// =============================================================================
