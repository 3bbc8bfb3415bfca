//! Active ping channel.
//!
//! At most one ping is consumed per tick, and only if requested by input AND
//! the cooldown has elapsed. An ignored request resets nothing. An accepted
//! ping creates a reveal bubble at the firing ship, spikes the firer's own
//! noise, returns exact echoes, and stamps each painted target's `EchoLog`
//! so its AI can react.

use hecs::World;

use darkwater_core::components::{
    Acoustics, EchoLog, Heading, PlayerShip, ScanState, ShipIdent,
};
use darkwater_core::constants::{
    CRUMB_TTL_SECS, PING_BUBBLE_TTL_SECS, PING_NOISE_SPIKE, PING_REVEAL_RADIUS,
};
use darkwater_core::contacts::{Breadcrumb, RevealBubble, SensorPicture};
use darkwater_core::events::SimEvent;
use darkwater_core::types::Position;
use darkwater_core::world::ObstacleRect;
use darkwater_sensors::detect::{active_scan, Observer};

use super::contacts::gather_targets;

pub fn run(
    world: &mut World,
    obstacles: &[ObstacleRect],
    picture: &mut SensorPicture,
    fire_requested: bool,
    now_secs: f64,
    events: &mut Vec<SimEvent>,
) {
    if !fire_requested {
        return;
    }

    // Gate on the cooldown; an early request is dropped without touching the
    // timer.
    let (position, heading, scan) = {
        let mut query = world.query::<(&PlayerShip, &Position, &Heading, &mut ScanState)>();
        match query.iter().next() {
            Some((_, (_player, pos, heading, scan))) => {
                if !scan.ping_ready(now_secs) {
                    return;
                }
                scan.last_ping_at = Some(now_secs);
                (*pos, heading.0, scan.clone())
            }
            None => return,
        }
    };

    // The ping reveals the observer: own-noise spike plus a bubble on the
    // firing position.
    for (_entity, (_player, acoustics)) in world.query_mut::<(&PlayerShip, &mut Acoustics)>() {
        acoustics.weapons = PING_NOISE_SPIKE;
    }
    events.push(SimEvent::PingFired { position });
    picture.bubbles.push(RevealBubble {
        position,
        radius: PING_REVEAL_RADIUS,
        created_at: now_secs,
        ttl_secs: PING_BUBBLE_TTL_SECS,
    });

    let targets = gather_targets(world);
    let observer = Observer {
        position,
        heading,
        scan: &scan,
    };
    let echoes = active_scan(&observer, &targets, obstacles, now_secs);
    let decoy_ids = super::contacts::decoy_ids(world);

    for echo in &echoes {
        events.push(SimEvent::PingReturn {
            ship_id: echo.ship_id,
            position: echo.position,
            range: echo.range,
        });
        picture.push_crumb(Breadcrumb {
            position: echo.position,
            created_at: now_secs,
            ttl_secs: CRUMB_TTL_SECS,
            decoy: decoy_ids.contains(&echo.ship_id),
        });
    }

    // Painted ships learn they were seen, and from where.
    for (_entity, (ident, pos, echo_log)) in
        world.query_mut::<(&ShipIdent, &Position, &mut EchoLog)>()
    {
        if echoes.iter().any(|echo| echo.ship_id == ident.id) {
            echo_log.last_pinged_at = Some(now_secs);
            echo_log.threat_bearing = Some(pos.bearing_to(&position));
        }
    }

    picture.active.extend(echoes);
}
