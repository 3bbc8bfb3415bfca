//! Helm and sensor-control application for the player ship.
//!
//! Consumes the per-tick `ControlInput` exactly once: rudder, throttle,
//! passive-arc adjustment, and the dark-run toggle. The ping request is
//! handled later in the tick by the ping system.

use hecs::World;

use darkwater_core::commands::ControlInput;
use darkwater_core::components::{Acoustics, DriveCommand, Heading, MotionLimits, PlayerShip, ScanState};
use darkwater_core::constants::*;
use darkwater_core::events::SimEvent;

pub fn run(
    world: &mut World,
    input: &ControlInput,
    now_secs: f64,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    for (_entity, (_player, heading, scan, acoustics, limits, drive)) in world.query_mut::<(
        &PlayerShip,
        &mut Heading,
        &mut ScanState,
        &mut Acoustics,
        &MotionLimits,
        &mut DriveCommand,
    )>() {
        let turn = input.turn.clamp(-1.0, 1.0);
        heading.0 = (heading.0 + turn * TURN_RATE * dt).rem_euclid(std::f64::consts::TAU);

        let adjust = input.arc_adjust.clamp(-1.0, 1.0);
        scan.arc += adjust * ARC_ADJUST_RATE * dt;
        scan.clamp_arc();

        if input.toggle_dark_run {
            if scan.dark_run {
                scan.dark_run = false;
                acoustics.suppression = 0.0;
            } else {
                scan.dark_run = true;
                scan.dark_run_until = now_secs + DARK_RUN_DURATION_SECS;
                acoustics.suppression = DARK_RUN_SUPPRESSION;
                events.push(SimEvent::DarkRunEngaged);
            }
        }
        if scan.dark_run && now_secs >= scan.dark_run_until {
            scan.dark_run = false;
            acoustics.suppression = 0.0;
            events.push(SimEvent::DarkRunExpired);
        }

        // Throttle becomes commanded acceleration along the bow; dark run
        // trades speed for silence.
        let throttle = input.throttle.clamp(-1.0, 1.0);
        let drive_factor = if scan.dark_run {
            DARK_RUN_DRIVE_FACTOR
        } else {
            1.0
        };
        let throttle_gain = if throttle >= 0.0 {
            throttle
        } else {
            throttle * REVERSE_THRUST_FACTOR
        };
        let thrust = throttle_gain * limits.accel * drive_factor;

        drive.ax = thrust * heading.0.sin();
        drive.ay = thrust * heading.0.cos();
        drive.speed_cap_factor = drive_factor;
    }
}
