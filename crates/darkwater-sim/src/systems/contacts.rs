//! Ambient and passive sensor channels for the player observer.
//!
//! Rebuilds the transient contact lists wholesale each tick, refreshes
//! passive reveal bubbles, drops breadcrumb trail points, and emits
//! contact-gained/faded events by diffing against the previous picture.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use darkwater_core::components::{
    Acoustics, DecoyBuoy, Heading, HullSignature, PlayerShip, ScanState, ShipIdent,
};
use darkwater_core::constants::{CRUMB_MIN_SPACING, CRUMB_TTL_SECS, PASSIVE_BUBBLE_TTL_SECS};
use darkwater_core::contacts::{Breadcrumb, RevealBubble, SensorPicture};
use darkwater_core::enums::SensorChannel;
use darkwater_core::events::SimEvent;
use darkwater_core::types::Position;
use darkwater_core::world::ObstacleRect;
use darkwater_sensors::detect::{ambient_scan, passive_scan, Observer, SensorTarget};

pub fn run(
    world: &mut World,
    obstacles: &[ObstacleRect],
    picture: &mut SensorPicture,
    rng: &mut ChaCha8Rng,
    now_secs: f64,
    events: &mut Vec<SimEvent>,
) {
    let (position, heading, scan) = {
        let mut query = world.query::<(&PlayerShip, &Position, &Heading, &ScanState)>();
        match query.iter().next() {
            Some((_, (_player, pos, heading, scan))) => (*pos, heading.0, scan.clone()),
            None => return,
        }
    };

    let targets = gather_targets(world);
    let observer = Observer {
        position,
        heading,
        scan: &scan,
    };

    let ambient = ambient_scan(&observer, &targets, obstacles, rng);
    let passive = passive_scan(&observer, &targets, obstacles, rng);

    // Diff against the previous tick's picture for gained/faded events.
    let previous_ids = picture.contact_ids();
    let mut current_ids: Vec<u32> = ambient
        .iter()
        .map(|c| c.ship_id)
        .chain(passive.iter().map(|c| c.ship_id))
        .collect();
    current_ids.sort_unstable();
    current_ids.dedup();

    for id in &current_ids {
        if !previous_ids.contains(id) {
            let (channel, reported) = passive
                .iter()
                .find(|c| c.ship_id == *id)
                .map(|c| (SensorChannel::Passive, c.position))
                .or_else(|| {
                    ambient
                        .iter()
                        .find(|c| c.ship_id == *id)
                        .map(|c| (SensorChannel::Ambient, c.position))
                })
                .unwrap_or((SensorChannel::Ambient, position));
            events.push(SimEvent::ContactGained {
                channel,
                ship_id: *id,
                bearing: position.bearing_to(&reported),
            });
        }
    }
    for id in previous_ids {
        if !current_ids.contains(&id) {
            events.push(SimEvent::ContactFaded { ship_id: id });
        }
    }

    // Passive fixes leave residue: a small reveal bubble and a trail crumb.
    // Crumbs on decoy returns carry the ground-truth flag for post-match
    // display; detection itself cannot tell them apart.
    let decoy_blips = decoy_ids(world);
    for contact in &passive {
        if !picture.bubble_near(&contact.position, scan.passive_reveal_radius * 0.5) {
            picture.bubbles.push(RevealBubble {
                position: contact.position,
                radius: scan.passive_reveal_radius,
                created_at: now_secs,
                ttl_secs: PASSIVE_BUBBLE_TTL_SECS,
            });
        }
        if !picture.crumb_near(&contact.position, CRUMB_MIN_SPACING) {
            picture.push_crumb(Breadcrumb {
                position: contact.position,
                created_at: now_secs,
                ttl_secs: CRUMB_TTL_SECS,
                decoy: decoy_blips.contains(&contact.ship_id),
            });
        }
    }

    picture.ambient = ambient;
    picture.passive = passive;
}

/// Contact ids that belong to decoy buoys.
pub(crate) fn decoy_ids(world: &World) -> Vec<u32> {
    world
        .query::<&DecoyBuoy>()
        .iter()
        .map(|(_, buoy)| buoy.id)
        .collect()
}

/// Everything the player's channels can hear: all other ships plus any live
/// decoy buoys, as plain sensor targets.
pub(crate) fn gather_targets(world: &World) -> Vec<SensorTarget> {
    let mut targets = Vec::new();

    let mut ships = world
        .query::<(&ShipIdent, &Position, &Acoustics, &HullSignature)>()
        .without::<&PlayerShip>();
    for (_entity, (ident, pos, acoustics, signature)) in ships.iter() {
        targets.push(SensorTarget {
            ship_id: ident.id,
            position: *pos,
            smoothed_noise: acoustics.smoothed_index,
            size_factor: signature.size_factor,
        });
    }

    let mut buoys = world.query::<(&DecoyBuoy, &Position, &Acoustics, &HullSignature)>();
    for (_entity, (buoy, pos, acoustics, signature)) in buoys.iter() {
        targets.push(SensorTarget {
            ship_id: buoy.id,
            position: *pos,
            smoothed_noise: acoustics.smoothed_index,
            size_factor: signature.size_factor,
        });
    }

    targets
}
