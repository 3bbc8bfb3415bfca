//! Expiry system: lazily prunes the TTL'd sensor picture and despawns
//! exhausted decoy buoys. Uses a pre-allocated buffer to avoid per-tick
//! allocation.

use hecs::{Entity, World};

use darkwater_core::components::DecoyBuoy;
use darkwater_core::contacts::SensorPicture;

pub fn run(
    world: &mut World,
    picture: &mut SensorPicture,
    now_secs: f64,
    despawn_buffer: &mut Vec<Entity>,
) {
    picture.prune_expired(now_secs);

    despawn_buffer.clear();
    for (entity, buoy) in world.query_mut::<&DecoyBuoy>() {
        if now_secs >= buoy.expires_at {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
