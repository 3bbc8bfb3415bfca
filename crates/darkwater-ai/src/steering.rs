//! Steering layers applied to every AI ship independent of intent:
//! obstacle repulsion and the unstick override.

use glam::DVec2;

use darkwater_core::components::AiState;
use darkwater_core::constants::*;
use darkwater_core::types::{Position, Velocity};
use darkwater_core::world::ObstacleRect;

/// Inverse-distance repulsion from nearby obstacles, sampled at the ship's
/// position and at a forward look-ahead probe so corridors are anticipated.
/// Returns an acceleration contribution.
pub fn obstacle_repulsion(
    position: &Position,
    velocity: &Velocity,
    obstacles: &[ObstacleRect],
) -> DVec2 {
    let probe = Position::new(
        position.x + velocity.x * PROBE_LOOKAHEAD_SECS,
        position.y + velocity.y * PROBE_LOOKAHEAD_SECS,
    );
    repulsion_at(position, obstacles) + repulsion_at(&probe, obstacles) * 0.5
}

fn repulsion_at(point: &Position, obstacles: &[ObstacleRect]) -> DVec2 {
    let mut force = DVec2::ZERO;
    let p = DVec2::new(point.x, point.y);

    for obstacle in obstacles {
        let rect = &obstacle.rect;
        let closest = DVec2::new(
            point.x.clamp(rect.min_x, rect.max_x),
            point.y.clamp(rect.min_y, rect.max_y),
        );
        let offset = p - closest;
        let dist = offset.length();
        if dist >= OBSTACLE_REPULSION_MARGIN {
            continue;
        }

        let away = if dist > 1e-6 {
            offset / dist
        } else {
            // Inside the rectangle: push away from its center.
            let center = rect.center();
            let out = p - DVec2::new(center.x, center.y);
            if out.length() > 1e-6 {
                out.normalize()
            } else {
                DVec2::X
            }
        };
        force += away * (OBSTACLE_REPULSION_GAIN / dist.max(1.0));
    }

    force
}

/// Unstick override: when a ship stalls against geometry, force a
/// perpendicular burst for a fixed window, throttled by a per-ship cooldown
/// carried on its `AiState`. Returns the override velocity while active.
pub fn unstick_override(
    state: &mut AiState,
    velocity: &Velocity,
    heading: f64,
    max_speed: f64,
    now_secs: f64,
) -> Option<Velocity> {
    if let Some(until) = state.unstick_until {
        if now_secs < until {
            return Some(Velocity::from_heading(state.unstick_heading, max_speed));
        }
        state.unstick_until = None;
    }

    let recently_fired = state
        .last_unstick_at
        .map_or(false, |t| now_secs - t < UNSTICK_COOLDOWN_SECS);
    if velocity.speed() < UNSTICK_SPEED_THRESHOLD && !recently_fired {
        state.last_unstick_at = Some(now_secs);
        state.unstick_until = Some(now_secs + UNSTICK_BURST_SECS);
        state.unstick_heading = heading + std::f64::consts::FRAC_PI_2;
        return Some(Velocity::from_heading(state.unstick_heading, max_speed));
    }

    None
}
