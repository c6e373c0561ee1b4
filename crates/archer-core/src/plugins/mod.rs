//! Built-in per-tick behaviours, one per mobile entity kind.
//!
//! - [`ProjectilePlugin`]: straight-line flight, bounds exit and hit detection
//! - [`EnemyPlugin`]: approach the player, or attack once in range
//! - [`PlayerPlugin`]: walk, aim and fire from recorded input
//!
//! Use [`PluginRegistry::default_bundles()`](crate::plugin::PluginRegistry::default_bundles)
//! to get a registry with each plugin registered for its kind.

mod enemy;
mod player;
mod projectile;

pub use enemy::EnemyPlugin;
pub use player::PlayerPlugin;
pub use projectile::ProjectilePlugin;
