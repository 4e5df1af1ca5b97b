//! Projectile system: homing flight, impact, and target-gone expiry.

use hecs::{Entity, World};

use defender_core::components::Health;
use defender_core::constants::{ENEMY_KILL_SCORE, PROJECTILE_SPEED};
use defender_core::events::GameEvent;
use defender_core::types::Position;

use crate::components::Projectile;
use crate::session::SessionState;

/// Advance every projectile toward its target's current position.
/// A projectile whose target entity is gone expires without effect, at
/// any distance — the generational handle makes the liveness check exact.
pub fn run(
    world: &mut World,
    session: &mut SessionState,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) {
    let projectiles: Vec<(Entity, Entity, i32)> = {
        let mut query = world.query::<&Projectile>();
        query
            .iter()
            .map(|(entity, proj)| (entity, proj.target, proj.damage))
            .collect()
    };

    for (entity, target, damage) in projectiles {
        let target_pos = match world.get::<&Position>(target) {
            Ok(pos) => *pos,
            Err(_) => {
                despawn_buffer.push(entity);
                continue;
            }
        };

        let arrived = {
            let mut pos = match world.get::<&mut Position>(entity) {
                Ok(p) => p,
                Err(_) => continue,
            };
            let (stepped, arrived) = pos.step_toward(target_pos, PROJECTILE_SPEED);
            *pos = stepped;
            arrived
        };
        if !arrived {
            continue;
        }

        // Impact. Guard on prior liveness so two projectiles landing on
        // the same tick cannot double-count the kill.
        let lethal = match world.get::<&mut Health>(target) {
            Ok(mut health) => {
                let was_alive = health.hit_points > 0;
                health.hit_points -= damage;
                was_alive && health.hit_points <= 0
            }
            Err(_) => false,
        };
        if lethal {
            session.score += ENEMY_KILL_SCORE;
            session.destroyed += 1;
            despawn_buffer.push(target);
            events.push(GameEvent::EnemyDestroyed);
        }
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
