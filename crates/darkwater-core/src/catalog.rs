//! Ship class catalog.
//!
//! Consolidates the per-class stat blocks selected once at spawn time.

use crate::components::ScanState;
use crate::constants::*;
use crate::enums::{SensorMode, ShipClass};

/// Static performance and signature block for a hull class.
pub struct ClassStats {
    pub display_name: &'static str,
    /// Detectability — the sensor-model size factor source.
    pub detectability: f64,
    /// Maximum speed (world units per second).
    pub max_speed: f64,
    /// Maximum commanded acceleration (world units per second squared).
    pub accel: f64,
    /// Multiplier on all three channel reference distances.
    pub scan_range_mult: f64,
    /// Noise component levels.
    pub noise_base: f64,
    pub noise_thrust: f64,
    pub noise_weapons: f64,
    pub noise_module: f64,
    /// Sensor-fit specialization.
    pub sensor_mode: SensorMode,
}

/// Get the stat block for a hull class.
pub fn class_stats(class: ShipClass) -> ClassStats {
    match class {
        ShipClass::Corvette => ClassStats {
            display_name: "Corvette",
            detectability: 1.0,
            max_speed: 65.0,
            accel: 40.0,
            scan_range_mult: 1.0,
            noise_base: 0.18,
            noise_thrust: 0.55,
            noise_weapons: 0.05,
            noise_module: 0.10,
            sensor_mode: SensorMode::Balanced,
        },
        ShipClass::Prowler => ClassStats {
            display_name: "Prowler",
            detectability: 0.8,
            max_speed: 55.0,
            accel: 30.0,
            scan_range_mult: 1.25,
            noise_base: 0.10,
            noise_thrust: 0.40,
            noise_weapons: 0.02,
            noise_module: 0.06,
            sensor_mode: SensorMode::RangeFocused,
        },
        ShipClass::Marauder => ClassStats {
            display_name: "Marauder",
            detectability: 1.2,
            max_speed: 80.0,
            accel: 55.0,
            scan_range_mult: 0.85,
            noise_base: 0.25,
            noise_thrust: 0.70,
            noise_weapons: 0.10,
            noise_module: 0.15,
            sensor_mode: SensorMode::ArcFocused,
        },
        ShipClass::Courier => ClassStats {
            display_name: "Courier",
            detectability: 0.9,
            max_speed: 58.0,
            accel: 35.0,
            scan_range_mult: 1.0,
            noise_base: 0.12,
            noise_thrust: 0.50,
            noise_weapons: 0.0,
            noise_module: 0.08,
            sensor_mode: SensorMode::Balanced,
        },
        ShipClass::Freighter => ClassStats {
            display_name: "Freighter",
            detectability: 1.2,
            max_speed: 25.0,
            accel: 10.0,
            scan_range_mult: 0.6,
            noise_base: 0.30,
            noise_thrust: 0.45,
            noise_weapons: 0.0,
            noise_module: 0.12,
            sensor_mode: SensorMode::Balanced,
        },
    }
}

/// Hulls offered on the match-start screen.
pub fn selectable_classes() -> [ShipClass; 3] {
    [ShipClass::Corvette, ShipClass::Prowler, ShipClass::Marauder]
}

/// Build the initial sensor configuration for a class.
pub fn scan_state_for(class: ShipClass) -> ScanState {
    let stats = class_stats(class);
    let mut scan = ScanState {
        ambient_base_m: AMBIENT_BASE_RANGE_M * stats.scan_range_mult,
        passive_base_m: PASSIVE_BASE_RANGE_M * stats.scan_range_mult,
        active_base_m: ACTIVE_BASE_RANGE_M * stats.scan_range_mult,
        arc: PASSIVE_ARC_DEFAULT,
        arc_min: PASSIVE_ARC_MIN,
        arc_max: PASSIVE_ARC_MAX,
        passive_reveal_radius: PASSIVE_REVEAL_RADIUS,
        ping_cooldown_secs: PING_COOLDOWN_SECS,
        last_ping_at: None,
        dark_run: false,
        dark_run_until: 0.0,
        mode: stats.sensor_mode,
    };
    match scan.mode {
        SensorMode::Balanced => {}
        SensorMode::RangeFocused => {
            scan.passive_base_m *= 1.2;
            scan.passive_reveal_radius *= 0.8;
        }
        SensorMode::ArcFocused => {
            scan.arc = scan.arc_max * 0.75;
            scan.ambient_base_m *= 1.1;
        }
    }
    scan.clamp_arc();
    scan
}
