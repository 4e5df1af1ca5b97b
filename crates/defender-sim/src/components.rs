//! Components that only the simulation crate can express.
//!
//! The projectile holds a generational `hecs::Entity` handle to its
//! target, so it lives here rather than in the core crate.

/// A homing projectile in flight. Damage is captured at fire time, so a
/// later tower upgrade never changes a shot already in the air.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    /// The enemy this projectile homes toward. Liveness is re-checked
    /// every tick; a stale handle expires the projectile.
    pub target: hecs::Entity,
    pub damage: i32,
}
