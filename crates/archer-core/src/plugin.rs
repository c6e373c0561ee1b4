//! Per-tick update hooks.
//!
//! Every mobile entity kind has a bundle of plugins in the
//! [`PluginRegistry`]. Each tick the simulation runs the bundle for every
//! subscriber: a plugin reads the world through a [`WorldView`] and returns
//! [`Command`]s, which the resolvers apply before the next entity is updated.
//! Plugins never mutate state themselves.
//!
//! # Example
//!
//! ```
//! use archer_core::entity::EntityTag;
//! use archer_core::output::{Command, CommandKind};
//! use archer_core::plugin::{Plugin, PluginContext, PluginDeclaration, PluginId, PluginRegistry};
//! use archer_core::world_view::WorldView;
//! use std::sync::Arc;
//!
//! struct Idle {
//!     declaration: PluginDeclaration,
//! }
//!
//! impl Plugin for Idle {
//!     fn declaration(&self) -> &PluginDeclaration {
//!         &self.declaration
//!     }
//!     fn run(&self, _ctx: &PluginContext, _view: &WorldView) -> Vec<Command> {
//!         Vec::new()
//!     }
//! }
//!
//! let mut registry = PluginRegistry::new();
//! registry.register(
//!     EntityTag::Enemy,
//!     Arc::new(Idle {
//!         declaration: PluginDeclaration {
//!             id: PluginId::new("idle"),
//!             required_tags: vec![EntityTag::Enemy],
//!             emits: vec![],
//!         },
//!     }),
//! );
//!
//! assert_eq!(registry.plugins_for(EntityTag::Enemy).len(), 1);
//! assert!(registry.plugins_for(EntityTag::Obstacle).is_empty());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::entity::{EntityId, EntityTag};
use crate::output::{Command, CommandKind};
use crate::world_view::WorldView;

pub use crate::output::PluginId;

// =============================================================================
// Plugin Declaration
// =============================================================================

/// What a plugin operates on and what it may emit.
#[derive(Debug, Clone)]
pub struct PluginDeclaration {
    /// Registered name.
    pub id: PluginId,
    /// Entity kinds the plugin runs on.
    pub required_tags: Vec<EntityTag>,
    /// Command kinds the plugin may emit.
    pub emits: Vec<CommandKind>,
}

impl PluginDeclaration {
    /// True if the plugin runs on `tag`.
    #[must_use]
    pub fn supports_tag(&self, tag: EntityTag) -> bool {
        self.required_tags.contains(&tag)
    }

    /// True if the plugin may emit `kind`.
    #[must_use]
    pub fn emits_command(&self, kind: CommandKind) -> bool {
        self.emits.contains(&kind)
    }
}

// =============================================================================
// Plugin Context
// =============================================================================

/// Per-call context handed to a plugin.
///
/// ```
/// use archer_core::entity::EntityId;
/// use archer_core::plugin::PluginContext;
///
/// let ctx = PluginContext {
///     entity_id: EntityId::new(3),
///     tick: 10,
///     now_ms: 300.0,
///     delta: 1.0,
/// };
/// assert_eq!(ctx.entity_id, EntityId::new(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluginContext {
    /// Entity being updated.
    pub entity_id: EntityId,
    /// Tick number.
    pub tick: u64,
    /// Simulation clock at the start of this tick.
    pub now_ms: f64,
    /// Normalised tick duration: elapsed time over the configured period.
    pub delta: f64,
}

// =============================================================================
// Plugin Trait
// =============================================================================

/// An entity's per-tick behaviour.
///
/// Implementations must be deterministic: the same view and context always
/// produce the same commands.
pub trait Plugin: Send + Sync {
    /// The plugin's declaration.
    fn declaration(&self) -> &PluginDeclaration;

    /// Computes the commands for one entity this tick.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Entity id, tick number, clock and delta
    /// * `view` - Read-only view of the arena
    fn run(&self, ctx: &PluginContext, view: &WorldView) -> Vec<Command>;
}

// =============================================================================
// Plugin Registry
// =============================================================================

/// Plugins bundled by entity kind.
#[derive(Default)]
pub struct PluginRegistry {
    bundles: HashMap<EntityTag, Vec<Arc<dyn Plugin>>>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
        }
    }

    /// Adds `plugin` to the bundle for `tag`. Bundles run in registration
    /// order.
    pub fn register(&mut self, tag: EntityTag, plugin: Arc<dyn Plugin>) {
        self.bundles.entry(tag).or_default().push(plugin);
    }

    /// The bundle for `tag`, empty if none was registered.
    #[must_use]
    pub fn plugins_for(&self, tag: EntityTag) -> &[Arc<dyn Plugin>] {
        self.bundles.get(&tag).map_or(&[], Vec::as_slice)
    }

    /// Total registrations across all bundles.
    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.bundles.values().map(Vec::len).sum()
    }

    /// True if no plugin is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.values().all(Vec::is_empty)
    }

    /// Removes every plugin.
    pub fn clear(&mut self) {
        self.bundles.clear();
    }

    /// The standard bundles: one behaviour plugin per mobile kind.
    ///
    /// ```
    /// use archer_core::entity::EntityTag;
    /// use archer_core::plugin::PluginRegistry;
    ///
    /// let registry = PluginRegistry::default_bundles();
    /// assert_eq!(registry.plugins_for(EntityTag::Player).len(), 1);
    /// assert_eq!(registry.plugins_for(EntityTag::Enemy).len(), 1);
    /// assert_eq!(registry.plugins_for(EntityTag::Projectile).len(), 1);
    /// assert!(registry.plugins_for(EntityTag::Obstacle).is_empty());
    /// ```
    #[must_use]
    pub fn default_bundles() -> Self {
        use crate::plugins::{EnemyPlugin, PlayerPlugin, ProjectilePlugin};

        let mut registry = Self::new();
        registry.register(EntityTag::Player, Arc::new(PlayerPlugin::new()));
        registry.register(EntityTag::Enemy, Arc::new(EnemyPlugin::new()));
        registry.register(EntityTag::Projectile, Arc::new(ProjectilePlugin::new()));
        registry
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("bundle_count", &self.bundles.len())
            .field("registration_count", &self.registration_count())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent {
        declaration: PluginDeclaration,
    }

    impl Silent {
        fn new(name: &str, tag: EntityTag) -> Self {
            Self {
                declaration: PluginDeclaration {
                    id: PluginId::new(name),
                    required_tags: vec![tag],
                    emits: vec![CommandKind::Motion],
                },
            }
        }
    }

    impl Plugin for Silent {
        fn declaration(&self) -> &PluginDeclaration {
            &self.declaration
        }

        fn run(&self, _ctx: &PluginContext, _view: &WorldView) -> Vec<Command> {
            Vec::new()
        }
    }

    mod declaration_tests {
        use super::*;

        #[test]
        fn supports_declared_tags_only() {
            let plugin = Silent::new("silent", EntityTag::Enemy);
            assert!(plugin.declaration().supports_tag(EntityTag::Enemy));
            assert!(!plugin.declaration().supports_tag(EntityTag::Player));
            assert!(plugin.declaration().emits_command(CommandKind::Motion));
            assert!(!plugin.declaration().emits_command(CommandKind::Combat));
        }
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn new_registry_is_empty() {
            let registry = PluginRegistry::new();
            assert!(registry.is_empty());
            assert_eq!(registry.registration_count(), 0);
        }

        #[test]
        fn bundles_keep_registration_order() {
            let mut registry = PluginRegistry::new();
            registry.register(EntityTag::Enemy, Arc::new(Silent::new("first", EntityTag::Enemy)));
            registry.register(EntityTag::Enemy, Arc::new(Silent::new("second", EntityTag::Enemy)));

            let names: Vec<_> = registry
                .plugins_for(EntityTag::Enemy)
                .iter()
                .map(|p| p.declaration().id.as_str().to_string())
                .collect();
            assert_eq!(names, ["first", "second"]);
        }

        #[test]
        fn clear_empties_registry() {
            let mut registry = PluginRegistry::default_bundles();
            assert_eq!(registry.registration_count(), 3);
            registry.clear();
            assert!(registry.is_empty());
        }

        #[test]
        fn debug_reports_counts() {
            let registry = PluginRegistry::default_bundles();
            let debug = format!("{registry:?}");
            assert!(debug.contains("registration_count: 3"));
        }
    }
}
