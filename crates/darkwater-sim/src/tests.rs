//! Tests for the engine: determinism, the end-to-end match scenarios, the
//! ping cooldown, dark run, decoys, and the post-tick invariants.

use darkwater_core::catalog::class_stats;
use darkwater_core::commands::{ControlInput, MatchCommand};
use darkwater_core::constants::*;
use darkwater_core::enums::{MatchPhase, ShipClass, ZoneKind};
use darkwater_core::events::SimEvent;
use darkwater_core::state::SimSnapshot;
use darkwater_core::types::{Position, Rect};
use darkwater_core::world::{EnvironmentZone, ObstacleRect, WorldLayout};

use crate::engine::{SimConfig, SimulationEngine};

const DT: f64 = 1.0 / 30.0;

fn idle() -> ControlInput {
    ControlInput::default()
}

fn started_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.queue_command(MatchCommand::StartMatch {
        ship_class: ShipClass::Corvette,
    });
    engine
}

/// A featureless arena with a parameterizable escape zone and spawns.
fn open_layout(
    player: Position,
    quarry: Position,
    escape_zone: Rect,
    time_limit_secs: f64,
) -> WorldLayout {
    WorldLayout {
        width: 2400.0,
        height: 1600.0,
        zones: Vec::new(),
        obstacles: Vec::new(),
        escape_zone,
        player_spawn: player,
        quarry_spawn: quarry,
        traffic_spawns: Vec::new(),
        time_limit_secs,
    }
}

fn run_idle_ticks(engine: &mut SimulationEngine, ticks: usize) -> SimSnapshot {
    let mut snapshot = engine.tick(DT, &idle());
    for _ in 1..ticks.max(1) {
        snapshot = engine.tick(DT, &idle());
    }
    snapshot
}

fn has_event(snapshot: &SimSnapshot, predicate: impl Fn(&SimEvent) -> bool) -> bool {
    snapshot.events.iter().any(predicate)
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = started_engine(12345);
    let mut engine_b = started_engine(12345);

    for _ in 0..300 {
        let snap_a = engine_a.tick(DT, &idle());
        let snap_b = engine_b.tick(DT, &idle());

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds_diverge() {
    let mut engine_a = started_engine(111);
    let mut engine_b = started_engine(222);

    // Wander phases come from the seeded RNG, so AI trajectories split.
    let mut diverged = false;
    for _ in 0..600 {
        let snap_a = engine_a.tick(DT, &idle());
        let snap_b = engine_b.tick(DT, &idle());
        if serde_json::to_string(&snap_a).unwrap() != serde_json::to_string(&snap_b).unwrap() {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds should produce divergent output");
}

// ---- Lifecycle ----

#[test]
fn test_menu_tick_is_inert() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snapshot = engine.tick(DT, &idle());
    assert_eq!(snapshot.match_state.status, MatchPhase::MainMenu);
    assert!(snapshot.ships.is_empty());
    assert!(snapshot.player.is_none());
    assert_eq!(snapshot.time.tick, 0, "time is frozen in the menu");
}

#[test]
fn test_start_match_spawns_fleet() {
    let mut engine = started_engine(7);
    let snapshot = engine.tick(DT, &idle());
    assert_eq!(snapshot.match_state.status, MatchPhase::Playing);
    // Player + quarry + two freighters in the training layout.
    assert_eq!(snapshot.ships.len(), 4);
    let player = snapshot.player.expect("player view present");
    let player_ship = snapshot
        .ships
        .iter()
        .find(|s| s.id == player.ship_id)
        .unwrap();
    assert_eq!(player_ship.class, ShipClass::Corvette);
    assert!(snapshot
        .ships
        .iter()
        .any(|s| s.class == ShipClass::Courier));
}

#[test]
fn test_pause_freezes_time() {
    let mut engine = started_engine(7);
    run_idle_ticks(&mut engine, 10);

    engine.queue_command(MatchCommand::Pause);
    let paused = engine.tick(DT, &idle());
    assert_eq!(paused.match_state.status, MatchPhase::Paused);
    let paused_tick = paused.time.tick;

    let still = engine.tick(DT, &idle());
    assert_eq!(still.time.tick, paused_tick);

    engine.queue_command(MatchCommand::Resume);
    let resumed = engine.tick(DT, &idle());
    assert_eq!(resumed.match_state.status, MatchPhase::Playing);
    assert!(resumed.time.tick > paused_tick);
}

#[test]
fn test_abort_returns_to_menu() {
    let mut engine = started_engine(7);
    run_idle_ticks(&mut engine, 5);
    engine.queue_command(MatchCommand::AbortToMenu);
    let snapshot = engine.tick(DT, &idle());
    assert_eq!(snapshot.match_state.status, MatchPhase::MainMenu);
    assert!(snapshot.ships.is_empty());
}

#[test]
fn test_bad_dt_skips_step() {
    let mut engine = started_engine(7);
    let before = engine.tick(DT, &idle()).time;

    let skipped = engine.tick(f64::NAN, &idle());
    assert_eq!(skipped.time.tick, before.tick);
    let skipped = engine.tick(-1.0, &idle());
    assert_eq!(skipped.time.tick, before.tick);

    // Oversized deltas are capped, not rejected.
    let capped = engine.tick(10.0, &idle());
    assert!((capped.time.elapsed_secs - before.elapsed_secs - MAX_STEP_SECS).abs() < 1e-9);
}

// ---- Invariants ----

#[test]
fn test_speed_and_noise_invariants_hold_under_load() {
    let mut engine = started_engine(99);
    let mut input = ControlInput {
        turn: 0.4,
        throttle: 1.0,
        ..Default::default()
    };

    for tick in 0..900 {
        input.fire_ping = tick % 150 == 0;
        input.toggle_dark_run = tick == 300 || tick == 600;
        let snapshot = engine.tick(DT, &input);

        for ship in &snapshot.ships {
            let max_speed = class_stats(ship.class).max_speed;
            assert!(
                ship.speed <= max_speed + 1e-6,
                "{} exceeded max speed: {} > {}",
                ship.name,
                ship.speed,
                max_speed
            );
            assert!(
                (0.0..=NOISE_INDEX_MAX + 1e-9).contains(&ship.noise_index),
                "{} noise index out of range: {}",
                ship.name,
                ship.noise_index
            );
        }
    }
}

#[test]
fn test_arc_clamped_to_limits() {
    let mut engine = started_engine(7);
    let narrow = ControlInput {
        arc_adjust: -1.0,
        ..Default::default()
    };
    let mut snapshot = engine.tick(DT, &narrow);
    for _ in 0..600 {
        snapshot = engine.tick(DT, &narrow);
    }
    let scan = snapshot.player.unwrap().scan;
    assert!((scan.arc - scan.arc_min).abs() < 1e-9, "arc pinned at min");

    let widen = ControlInput {
        arc_adjust: 1.0,
        ..Default::default()
    };
    let mut snapshot = engine.tick(DT, &widen);
    for _ in 0..600 {
        snapshot = engine.tick(DT, &widen);
    }
    let scan = snapshot.player.unwrap().scan;
    assert!((scan.arc - scan.arc_max).abs() < 1e-9, "arc pinned at max");
}

#[test]
fn test_player_never_enters_obstacle() {
    // A full-height wall dead ahead of the player.
    let mut layout = open_layout(
        Position::new(800.0, 800.0),
        Position::new(2200.0, 800.0),
        Rect::new(2300.0, 700.0, 2400.0, 900.0),
        600.0,
    );
    layout.obstacles.push(ObstacleRect {
        rect: Rect::new(1000.0, 0.0, 1200.0, 1600.0),
    });
    let mut engine = SimulationEngine::new(SimConfig { seed: 5, layout });
    engine.queue_command(MatchCommand::StartMatch {
        ship_class: ShipClass::Marauder,
    });

    let ahead = ControlInput {
        throttle: 1.0,
        ..Default::default()
    };
    for _ in 0..600 {
        let snapshot = engine.tick(DT, &ahead);
        if let Some(player) = &snapshot.player {
            let ship = snapshot
                .ships
                .iter()
                .find(|s| s.id == player.ship_id)
                .unwrap();
            assert!(
                ship.position.x <= 1000.0 + 1e-6,
                "player penetrated the wall at {:?}",
                ship.position
            );
        }
    }
}

// ---- Sensor picture ----

#[test]
fn test_quarry_appears_on_passive_picture() {
    // Quarry loitering dead ahead inside passive range; contacts must show
    // up once its noise index spins up.
    let layout = open_layout(
        Position::new(200.0, 800.0),
        Position::new(700.0, 800.0),
        Rect::new(550.0, 650.0, 850.0, 950.0),
        600.0,
    );
    let mut engine = SimulationEngine::new(SimConfig { seed: 21, layout });
    engine.queue_command(MatchCommand::StartMatch {
        ship_class: ShipClass::Corvette,
    });

    let mut contact_seen = false;
    let mut crumb_seen = false;
    for _ in 0..400 {
        let snapshot = engine.tick(DT, &idle());
        if !snapshot.picture.passive.is_empty() || !snapshot.picture.ambient.is_empty() {
            contact_seen = true;
        }
        if !snapshot.picture.crumbs.is_empty() {
            crumb_seen = true;
        }
        if contact_seen && crumb_seen {
            break;
        }
    }
    assert!(contact_seen, "quarry never appeared on the picture");
    assert!(crumb_seen, "no breadcrumbs were dropped");
}

#[test]
fn test_wall_occludes_all_channels_end_to_end() {
    // Loud quarry on the far side of a full-height wall: nothing may show,
    // even on an active ping.
    let mut layout = open_layout(
        Position::new(800.0, 800.0),
        Position::new(1450.0, 800.0),
        Rect::new(1300.0, 650.0, 1600.0, 950.0),
        600.0,
    );
    layout.obstacles.push(ObstacleRect {
        rect: Rect::new(1000.0, 0.0, 1200.0, 1600.0),
    });
    let mut engine = SimulationEngine::new(SimConfig { seed: 8, layout });
    engine.queue_command(MatchCommand::StartMatch {
        ship_class: ShipClass::Corvette,
    });

    let mut input = idle();
    for tick in 0..400 {
        input.fire_ping = tick % 200 == 10;
        let snapshot = engine.tick(DT, &input);
        assert!(
            snapshot.picture.ambient.is_empty() && snapshot.picture.passive.is_empty(),
            "occluded quarry leaked onto the passive/ambient picture"
        );
        assert!(
            !has_event(&snapshot, |e| matches!(e, SimEvent::PingReturn { .. })),
            "occluded quarry returned a ping echo"
        );
    }
}

// ---- Ping cooldown ----

#[test]
fn test_ping_cooldown_gates_second_ping() {
    let mut engine = started_engine(7);
    run_idle_ticks(&mut engine, 5);

    let ping = ControlInput {
        fire_ping: true,
        ..Default::default()
    };

    let first = engine.tick(DT, &ping);
    assert!(
        has_event(&first, |e| matches!(e, SimEvent::PingFired { .. })),
        "first ping accepted"
    );
    let ready_after_first = first.player.as_ref().unwrap().scan.ping_ready_in_secs;
    assert!(ready_after_first > 0.0);

    // Half the cooldown later: a queued ping is ignored — no event, no
    // cooldown reset.
    let half_cooldown_ticks = (PING_COOLDOWN_SECS / 2.0 / DT) as usize;
    run_idle_ticks(&mut engine, half_cooldown_ticks);
    let second = engine.tick(DT, &ping);
    assert!(
        !has_event(&second, |e| matches!(e, SimEvent::PingFired { .. })),
        "early ping must be ignored"
    );
    let remaining = second.player.as_ref().unwrap().scan.ping_ready_in_secs;
    assert!(
        remaining < PING_COOLDOWN_SECS / 2.0 + 0.5,
        "ignored ping must not reset the cooldown (remaining {remaining})"
    );

    // Past the full cooldown the next request is accepted.
    run_idle_ticks(&mut engine, half_cooldown_ticks + 5);
    let third = engine.tick(DT, &ping);
    assert!(
        has_event(&third, |e| matches!(e, SimEvent::PingFired { .. })),
        "ping after cooldown accepted"
    );
}

// ---- Intercept win ----

#[test]
fn test_ping_inside_intercept_radius_wins() {
    let layout = open_layout(
        Position::new(200.0, 800.0),
        Position::new(240.0, 800.0),
        Rect::new(2000.0, 600.0, 2400.0, 1000.0),
        600.0,
    );
    let mut engine = SimulationEngine::new(SimConfig { seed: 3, layout });
    engine.queue_command(MatchCommand::StartMatch {
        ship_class: ShipClass::Corvette,
    });

    let ping = ControlInput {
        fire_ping: true,
        ..Default::default()
    };
    let snapshot = engine.tick(DT, &ping);
    assert_eq!(snapshot.match_state.status, MatchPhase::Won);
    assert!(has_event(&snapshot, |e| matches!(
        e,
        SimEvent::QuarryIntercepted { .. }
    )));
}

#[test]
fn test_stale_ping_does_not_win() {
    // Ping fired, then the echo window lapses before the ships are close:
    // no win even if they later drift inside the radius.
    let layout = open_layout(
        Position::new(200.0, 800.0),
        Position::new(400.0, 800.0),
        Rect::new(2000.0, 600.0, 2400.0, 1000.0),
        600.0,
    );
    let mut engine = SimulationEngine::new(SimConfig { seed: 3, layout });
    engine.queue_command(MatchCommand::StartMatch {
        ship_class: ShipClass::Corvette,
    });

    let ping = ControlInput {
        fire_ping: true,
        ..Default::default()
    };
    let snapshot = engine.tick(DT, &ping);
    assert_eq!(
        snapshot.match_state.status,
        MatchPhase::Playing,
        "200 units apart is outside the intercept radius"
    );
    // Let the echo window lapse while idle.
    let snapshot = run_idle_ticks(&mut engine, (ACTIVE_ECHO_WINDOW_SECS / DT) as usize + 5);
    assert_eq!(snapshot.match_state.status, MatchPhase::Playing);
}

// ---- Escape loss and auto reset ----

#[test]
fn test_quarry_inside_escape_zone_at_deadline_loses() {
    let escape = Rect::new(900.0, 500.0, 1500.0, 1100.0);
    let layout = open_layout(
        Position::new(100.0, 100.0),
        escape.center(),
        escape,
        2.0,
    );
    let mut engine = SimulationEngine::new(SimConfig { seed: 13, layout });
    engine.queue_command(MatchCommand::StartMatch {
        ship_class: ShipClass::Corvette,
    });

    let mut lost_at = None;
    for tick in 0..120 {
        let snapshot = engine.tick(DT, &idle());
        if snapshot.match_state.status == MatchPhase::Lost {
            assert!(has_event(&snapshot, |e| matches!(
                e,
                SimEvent::QuarryEscaped { .. }
            )));
            lost_at = Some((tick, snapshot.time.elapsed_secs));
            break;
        }
    }
    let (_, at_secs) = lost_at.expect("match should be lost at the deadline");
    assert!(at_secs >= 2.0, "loss cannot precede the time limit");

    // The grace period runs, then a fresh Playing match is installed.
    let mut reset_seen = false;
    for _ in 0..((MATCH_RESET_GRACE_SECS / DT) as usize + 10) {
        let snapshot = engine.tick(DT, &idle());
        if has_event(&snapshot, |e| matches!(e, SimEvent::MatchReset)) {
            assert_eq!(snapshot.match_state.status, MatchPhase::Playing);
            assert!(
                (snapshot.time_remaining_secs - 2.0).abs() < 0.5,
                "fresh escape clock"
            );
            reset_seen = true;
            break;
        }
    }
    assert!(reset_seen, "match never auto-reset after the grace period");
}

// ---- Dark run ----

#[test]
fn test_dark_run_engages_and_expires() {
    let mut engine = started_engine(7);
    run_idle_ticks(&mut engine, 3);

    let toggle = ControlInput {
        toggle_dark_run: true,
        ..Default::default()
    };
    let engaged = engine.tick(DT, &toggle);
    assert!(has_event(&engaged, |e| matches!(e, SimEvent::DarkRunEngaged)));
    let scan = engaged.player.as_ref().unwrap().scan.clone();
    assert!(scan.dark_run);
    assert!(scan.dark_run_remaining_secs > 0.0);

    let mut expired_seen = false;
    for _ in 0..((DARK_RUN_DURATION_SECS / DT) as usize + 10) {
        let snapshot = engine.tick(DT, &idle());
        if has_event(&snapshot, |e| matches!(e, SimEvent::DarkRunExpired)) {
            assert!(!snapshot.player.as_ref().unwrap().scan.dark_run);
            expired_seen = true;
            break;
        }
    }
    assert!(expired_seen, "dark run never expired");
}

#[test]
fn test_dark_run_caps_speed() {
    let mut quiet = started_engine(31);
    let mut loud = started_engine(31);
    let full_ahead = ControlInput {
        throttle: 1.0,
        ..Default::default()
    };
    let engage = ControlInput {
        throttle: 1.0,
        toggle_dark_run: true,
        ..Default::default()
    };

    quiet.tick(DT, &engage);
    loud.tick(DT, &full_ahead);
    let mut quiet_snapshot = None;
    let mut loud_snapshot = None;
    for _ in 0..150 {
        quiet_snapshot = Some(quiet.tick(DT, &full_ahead));
        loud_snapshot = Some(loud.tick(DT, &full_ahead));
    }

    let speed_of = |snapshot: &SimSnapshot| {
        let id = snapshot.player.as_ref().unwrap().ship_id;
        snapshot.ships.iter().find(|s| s.id == id).unwrap().speed
    };
    let quiet_speed = speed_of(quiet_snapshot.as_ref().unwrap());
    let loud_speed = speed_of(loud_snapshot.as_ref().unwrap());
    assert!(
        quiet_speed < loud_speed * 0.7,
        "dark run must trade speed for silence ({quiet_speed} vs {loud_speed})"
    );
}

// ---- Decoys ----

#[test]
fn test_ping_in_cover_provokes_decoy() {
    // Quarry sits in an acoustic shadow: a ping makes it evade (covered, so
    // no hide escalation) and the evade transition drops a decoy.
    let mut layout = open_layout(
        Position::new(200.0, 200.0),
        Position::new(600.0, 200.0),
        Rect::new(500.0, 100.0, 700.0, 300.0),
        600.0,
    );
    layout.zones.push(EnvironmentZone {
        rect: Rect::new(450.0, 50.0, 750.0, 350.0),
        kind: ZoneKind::Shadow,
        noise_suppression: 0.5,
    });
    let mut engine = SimulationEngine::new(SimConfig { seed: 17, layout });
    engine.queue_command(MatchCommand::StartMatch {
        ship_class: ShipClass::Corvette,
    });

    let ping = ControlInput {
        fire_ping: true,
        ..Default::default()
    };
    let pinged = engine.tick(DT, &ping);
    assert!(
        has_event(&pinged, |e| matches!(e, SimEvent::PingReturn { .. })),
        "quarry should echo at 800 m"
    );

    let mut decoy_seen = false;
    for _ in 0..30 {
        let snapshot = engine.tick(DT, &idle());
        if has_event(&snapshot, |e| matches!(e, SimEvent::DecoyDropped { .. })) {
            decoy_seen = true;
            assert_eq!(snapshot.decoys.len(), 1);
            break;
        }
    }
    assert!(decoy_seen, "evade transition should drop a decoy");

    // The buoy expires and despawns.
    let snapshot = run_idle_ticks(&mut engine, (DECOY_LIFETIME_SECS / DT) as usize + 10);
    assert!(snapshot.decoys.is_empty(), "decoy buoy should expire");
}
