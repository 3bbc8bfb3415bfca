//! Movement system: physics integration, collision resolution, world-bound
//! clamping, and heading/trail upkeep.

use hecs::World;

use darkwater_core::components::{AiState, DriveCommand, Heading, MotionLimits, PositionHistory};
use darkwater_core::constants::{DRAG_RATE, HISTORY_SAMPLE_INTERVAL_SECS, MAX_HISTORY_DOTS};
use darkwater_core::types::{Position, Velocity};
use darkwater_core::world::WorldLayout;
use darkwater_physics::collide::{clamp_to_bounds, resolve_obstacles};
use darkwater_physics::integrate::{step, MotionCaps};

pub fn run(world: &mut World, layout: &WorldLayout, now_secs: f64, dt: f64) {
    let bounds = layout.bounds();

    for (_entity, (pos, vel, drive, limits)) in
        world.query_mut::<(&mut Position, &mut Velocity, &DriveCommand, &MotionLimits)>()
    {
        let caps = MotionCaps {
            max_speed: limits.max_speed * drive.speed_cap_factor.clamp(0.05, 1.0),
            drag_rate: DRAG_RATE,
        };
        let prev = *pos;
        let (next, corrected_vel) = step(prev, *vel, drive.ax, drive.ay, &caps, dt);
        let (next, corrected_vel) =
            resolve_obstacles(&prev, next, corrected_vel, &layout.obstacles);
        let (next, corrected_vel) = clamp_to_bounds(next, corrected_vel, &bounds);
        *pos = next;
        *vel = corrected_vel;
    }

    // AI ships point where they are going.
    for (_entity, (vel, heading, _ai)) in
        world.query_mut::<(&Velocity, &mut Heading, &AiState)>()
    {
        if vel.speed() > 1.0 {
            heading.0 = vel.heading();
        }
    }

    for (_entity, (pos, history)) in world.query_mut::<(&Position, &mut PositionHistory)>() {
        if now_secs - history.last_sample_at >= HISTORY_SAMPLE_INTERVAL_SECS {
            history.last_sample_at = now_secs;
            history.positions.insert(0, *pos);
            history.positions.truncate(MAX_HISTORY_DOTS);
        }
    }
}
