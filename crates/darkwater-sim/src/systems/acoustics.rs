//! Acoustic signature recompute — runs on post-move positions.
//!
//! Thrust noise follows actual speed, weapons transients decay back to the
//! class baseline, then the raw and smoothed indices are rebuilt through the
//! noise engine.

use hecs::World;

use darkwater_core::catalog::class_stats;
use darkwater_core::components::{Acoustics, DecoyBuoy, MotionLimits, ShipIdent};
use darkwater_core::constants::WEAPON_NOISE_DECAY_RATE;
use darkwater_core::types::{Position, Velocity};
use darkwater_core::world::EnvironmentZone;
use darkwater_sensors::noise::{alpha_for, emitted_noise, smooth};

pub fn run(world: &mut World, zones: &[EnvironmentZone], dt: f64) {
    let weapon_decay = (-WEAPON_NOISE_DECAY_RATE * dt).exp();

    for (_entity, (ident, pos, vel, acoustics, limits)) in world.query_mut::<(
        &ShipIdent,
        &Position,
        &Velocity,
        &mut Acoustics,
        &MotionLimits,
    )>() {
        let stats = class_stats(ident.class);
        let speed_frac = if limits.max_speed > 0.0 {
            (vel.speed() / limits.max_speed).clamp(0.0, 1.0)
        } else {
            0.0
        };
        acoustics.thrust = stats.noise_thrust * speed_frac;
        acoustics.weapons =
            stats.noise_weapons + (acoustics.weapons - stats.noise_weapons) * weapon_decay;

        acoustics.raw_index = emitted_noise(acoustics, pos, zones);
        let alpha = alpha_for(acoustics.smoothing_rate, dt);
        acoustics.smoothed_index = smooth(acoustics.smoothed_index, acoustics.raw_index, alpha);
    }

    // Decoys carry no class; their fixed source level still feels zone
    // suppression.
    for (_entity, (pos, acoustics, _buoy)) in
        world.query_mut::<(&Position, &mut Acoustics, &DecoyBuoy)>()
    {
        acoustics.raw_index = emitted_noise(acoustics, pos, zones);
        let alpha = alpha_for(acoustics.smoothing_rate, dt);
        acoustics.smoothed_index = smooth(acoustics.smoothed_index, acoustics.raw_index, alpha);
    }
}
