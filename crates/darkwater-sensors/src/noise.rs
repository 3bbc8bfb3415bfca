//! Emitted-noise engine.
//!
//! A ship's raw noise index sums its four component levels, attenuated by
//! environment suppression at its position and by its own masking factor,
//! clamped to [0, NOISE_INDEX_MAX]. One-pole smoothing produces the index
//! the detection channels actually consume.

use darkwater_core::components::Acoustics;
use darkwater_core::constants::{ENV_SUPPRESSION_MAX, NOISE_INDEX_MAX, SMOOTH_ALPHA_MIN};
use darkwater_core::types::Position;
use darkwater_core::world::EnvironmentZone;

/// Total noise suppression at a point: the sum of every containing zone's
/// coefficient, clamped so cover never fully mutes a ship.
pub fn environment_suppression(point: &Position, zones: &[EnvironmentZone]) -> f64 {
    let mut total = 0.0;
    for zone in zones {
        if zone.rect.contains(point) {
            total += zone.noise_suppression;
        }
    }
    total.clamp(0.0, ENV_SUPPRESSION_MAX)
}

/// Instantaneous emitted-noise index for a ship at `position`.
pub fn emitted_noise(acoustics: &Acoustics, position: &Position, zones: &[EnvironmentZone]) -> f64 {
    let source = acoustics.base + acoustics.thrust + acoustics.weapons + acoustics.module;
    let env = environment_suppression(position, zones);
    let masking = acoustics.suppression.clamp(0.0, 1.0);
    (source * (1.0 - env) * (1.0 - masking)).clamp(0.0, NOISE_INDEX_MAX)
}

/// One-pole exponential filter with the alpha clamped to [0.01, 1].
pub fn smooth(previous: f64, current: f64, alpha: f64) -> f64 {
    previous + (current - previous) * alpha.clamp(SMOOTH_ALPHA_MIN, 1.0)
}

/// Frame-rate-independent alpha for a one-pole response rate (1/s).
pub fn alpha_for(rate: f64, dt: f64) -> f64 {
    1.0 - (-rate * dt).exp()
}
