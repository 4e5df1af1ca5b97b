//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus whatever session
//! state they touch. They run in a fixed order from the engine and never
//! despawn mid-iteration — removals go through a despawn buffer.

pub mod enemy_ai;
pub mod player;
pub mod projectiles;
pub mod regen;
pub mod snapshot;
pub mod spawning;
pub mod tower_combat;
