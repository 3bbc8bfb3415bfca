//! Match setup: the built-in training layout and ship spawning.
//!
//! Real layouts arrive from the world-generation collaborator as
//! `WorldLayout` data; the training ground here exists for the demo loop and
//! the test suite.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use darkwater_core::catalog::{class_stats, scan_state_for};
use darkwater_core::components::*;
use darkwater_core::constants::{AI_NOISE_RATE, PLAYER_NOISE_RATE};
use darkwater_core::enums::{AiIntent, ShipClass, ZoneKind};
use darkwater_core::types::{Position, Rect, Velocity};
use darkwater_core::world::{EnvironmentZone, ObstacleRect, WorldLayout};

/// A harbor-mouth layout: breakwaters down the middle, cover along the north
/// edge, escape zone off the eastern end.
pub fn training_layout() -> WorldLayout {
    WorldLayout {
        width: 2400.0,
        height: 1600.0,
        zones: vec![
            EnvironmentZone {
                rect: Rect::new(900.0, 1150.0, 1500.0, 1550.0),
                kind: ZoneKind::Shadow,
                noise_suppression: 0.5,
            },
            EnvironmentZone {
                rect: Rect::new(1500.0, 200.0, 2100.0, 650.0),
                kind: ZoneKind::Thermal,
                noise_suppression: 0.35,
            },
            EnvironmentZone {
                rect: Rect::new(300.0, 300.0, 900.0, 800.0),
                kind: ZoneKind::Clutter,
                noise_suppression: 0.25,
            },
        ],
        obstacles: vec![
            ObstacleRect {
                rect: Rect::new(1050.0, 0.0, 1150.0, 620.0),
            },
            ObstacleRect {
                rect: Rect::new(1050.0, 900.0, 1150.0, 1600.0),
            },
            ObstacleRect {
                rect: Rect::new(1700.0, 700.0, 1900.0, 860.0),
            },
            ObstacleRect {
                rect: Rect::new(400.0, 1100.0, 700.0, 1250.0),
            },
        ],
        escape_zone: Rect::new(2120.0, 550.0, 2400.0, 1050.0),
        player_spawn: Position::new(260.0, 800.0),
        quarry_spawn: Position::new(1950.0, 800.0),
        traffic_spawns: vec![Position::new(700.0, 400.0), Position::new(1400.0, 1300.0)],
        time_limit_secs: 240.0,
    }
}

/// Clear the world and spawn every ship for a fresh match.
pub fn setup_match(
    world: &mut World,
    layout: &WorldLayout,
    player_class: ShipClass,
    now_secs: f64,
    rng: &mut ChaCha8Rng,
    next_ship_id: &mut u32,
) {
    world.clear();
    *next_ship_id = 0;

    spawn_player(world, player_class, layout.player_spawn, next_ship_id);
    spawn_quarry(world, layout, now_secs, rng, next_ship_id);
    for (index, spawn) in layout.traffic_spawns.iter().enumerate() {
        spawn_traffic(world, *spawn, index, now_secs, rng, next_ship_id);
    }
}

fn take_id(next_ship_id: &mut u32) -> u32 {
    let id = *next_ship_id;
    *next_ship_id += 1;
    id
}

fn base_acoustics(class: ShipClass, smoothing_rate: f64) -> Acoustics {
    let stats = class_stats(class);
    Acoustics {
        base: stats.noise_base,
        thrust: 0.0,
        weapons: stats.noise_weapons,
        module: stats.noise_module,
        suppression: 0.0,
        raw_index: 0.0,
        smoothed_index: 0.0,
        smoothing_rate,
    }
}

fn spawn_player(world: &mut World, class: ShipClass, spawn: Position, next_ship_id: &mut u32) {
    let stats = class_stats(class);
    let id = take_id(next_ship_id);
    world.spawn((
        PlayerShip,
        ShipIdent {
            id,
            name: format!("DSV {}", stats.display_name),
            class,
        },
        spawn,
        Velocity::default(),
        // Face the harbor mouth.
        Heading(std::f64::consts::FRAC_PI_2),
        base_acoustics(class, PLAYER_NOISE_RATE),
        HullSignature {
            size_factor: stats.detectability,
        },
        MotionLimits {
            max_speed: stats.max_speed,
            accel: stats.accel,
        },
        scan_state_for(class),
        DriveCommand::default(),
        PositionHistory::default(),
    ));
}

fn spawn_quarry(
    world: &mut World,
    layout: &WorldLayout,
    now_secs: f64,
    rng: &mut ChaCha8Rng,
    next_ship_id: &mut u32,
) {
    let class = ShipClass::Courier;
    let stats = class_stats(class);
    let id = take_id(next_ship_id);
    world.spawn((
        QuarryShip,
        ShipIdent {
            id,
            name: "MV Petrel".to_string(),
            class,
        },
        layout.quarry_spawn,
        Velocity::default(),
        Heading(0.0),
        base_acoustics(class, AI_NOISE_RATE),
        HullSignature {
            size_factor: stats.detectability,
        },
        MotionLimits {
            max_speed: stats.max_speed,
            accel: stats.accel,
        },
        AiState {
            intent: AiIntent::Patrol,
            intent_since: now_secs,
            // Loiter around the escape zone: the quarry wins by being there
            // when the clock runs out.
            home: layout.escape_zone.center(),
            wander_phase: rng.gen_range(0.0..std::f64::consts::TAU),
            // Suppress the spawn-time unstick burst.
            last_unstick_at: Some(now_secs),
            unstick_until: None,
            unstick_heading: 0.0,
        },
        EchoLog::default(),
        DriveCommand::default(),
        PositionHistory::default(),
    ));
}

const TRAFFIC_NAMES: [&str; 4] = ["MV Caldera", "MV Meridian", "MV Stornoway", "MV Aldebaran"];

fn spawn_traffic(
    world: &mut World,
    spawn: Position,
    index: usize,
    now_secs: f64,
    rng: &mut ChaCha8Rng,
    next_ship_id: &mut u32,
) {
    let class = ShipClass::Freighter;
    let stats = class_stats(class);
    let id = take_id(next_ship_id);
    world.spawn((
        TrafficShip,
        ShipIdent {
            id,
            name: TRAFFIC_NAMES[index % TRAFFIC_NAMES.len()].to_string(),
            class,
        },
        spawn,
        Velocity::default(),
        Heading(0.0),
        base_acoustics(class, AI_NOISE_RATE),
        HullSignature {
            size_factor: stats.detectability,
        },
        MotionLimits {
            max_speed: stats.max_speed,
            accel: stats.accel,
        },
        AiState {
            intent: AiIntent::Patrol,
            intent_since: now_secs,
            home: spawn,
            wander_phase: rng.gen_range(0.0..std::f64::consts::TAU),
            last_unstick_at: Some(now_secs),
            unstick_until: None,
            unstick_heading: 0.0,
        },
        EchoLog::default(),
        DriveCommand::default(),
        PositionHistory::default(),
    ));
}
