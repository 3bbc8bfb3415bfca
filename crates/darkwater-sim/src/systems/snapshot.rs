//! Snapshot system: queries the ECS world and builds a complete
//! `SimSnapshot`. Read-only — it never modifies the world.

use hecs::World;

use darkwater_core::components::*;
use darkwater_core::contacts::SensorPicture;
use darkwater_core::events::SimEvent;
use darkwater_core::state::{MatchState, PlayerView, ScanView, ShipView, SimSnapshot};
use darkwater_core::types::{Position, SimTime, Velocity};

pub fn build(
    world: &World,
    time: &SimTime,
    match_state: &MatchState,
    picture: &SensorPicture,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    let now = time.elapsed_secs;
    SimSnapshot {
        time: *time,
        match_state: match_state.clone(),
        time_remaining_secs: match_state.time_remaining(now),
        player: build_player(world, now),
        ships: build_ships(world),
        decoys: build_decoys(world),
        picture: picture.clone(),
        events,
    }
}

fn build_ships(world: &World) -> Vec<ShipView> {
    let mut ships: Vec<ShipView> = world
        .query::<(
            &ShipIdent,
            &Position,
            &Velocity,
            &Heading,
            &Acoustics,
            &PositionHistory,
        )>()
        .iter()
        .map(|(_, (ident, pos, vel, heading, acoustics, history))| ShipView {
            id: ident.id,
            name: ident.name.clone(),
            class: ident.class,
            position: *pos,
            heading: heading.0,
            speed: vel.speed(),
            noise_index: acoustics.smoothed_index,
            history: history.positions.clone(),
        })
        .collect();

    ships.sort_by_key(|ship| ship.id);
    ships
}

fn build_player(world: &World, now_secs: f64) -> Option<PlayerView> {
    world
        .query::<(&PlayerShip, &ShipIdent, &ScanState)>()
        .iter()
        .next()
        .map(|(_, (_player, ident, scan))| PlayerView {
            ship_id: ident.id,
            scan: ScanView {
                arc: scan.arc,
                arc_min: scan.arc_min,
                arc_max: scan.arc_max,
                ping_cooldown_secs: scan.ping_cooldown_secs,
                ping_ready_in_secs: scan
                    .last_ping_at
                    .map_or(0.0, |t| (t + scan.ping_cooldown_secs - now_secs).max(0.0)),
                dark_run: scan.dark_run,
                dark_run_remaining_secs: if scan.dark_run {
                    (scan.dark_run_until - now_secs).max(0.0)
                } else {
                    0.0
                },
                mode: scan.mode,
            },
        })
}

fn build_decoys(world: &World) -> Vec<Position> {
    let mut decoys: Vec<(u32, Position)> = world
        .query::<(&DecoyBuoy, &Position)>()
        .iter()
        .map(|(_, (buoy, pos))| (buoy.id, *pos))
        .collect();
    decoys.sort_by_key(|(id, _)| *id);
    decoys.into_iter().map(|(_, pos)| pos).collect()
}
