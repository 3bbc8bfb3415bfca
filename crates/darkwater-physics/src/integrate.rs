//! Kinematic integration.
//!
//! Per tick: commanded acceleration, exponential drag, speed clamp, position
//! update. dt is sanitized at this boundary — a non-finite or non-positive
//! delta skips integration for the step.

use darkwater_core::types::{Position, Velocity};

/// Performance caps applied during integration.
#[derive(Debug, Clone, Copy)]
pub struct MotionCaps {
    /// Speed clamp (world units per second).
    pub max_speed: f64,
    /// Exponential drag rate (1/s).
    pub drag_rate: f64,
}

/// Integrate one step. Non-finite inputs are zeroed component-wise rather
/// than propagated.
pub fn step(
    position: Position,
    velocity: Velocity,
    ax: f64,
    ay: f64,
    caps: &MotionCaps,
    dt: f64,
) -> (Position, Velocity) {
    if !dt.is_finite() || dt <= 0.0 {
        return (position, velocity);
    }
    debug_assert!(
        position.x.is_finite() && position.y.is_finite(),
        "non-finite position entered the physics boundary"
    );

    let mut position = Position::new(finite_or_zero(position.x), finite_or_zero(position.y));
    let mut velocity = Velocity::new(finite_or_zero(velocity.x), finite_or_zero(velocity.y));

    velocity.x += finite_or_zero(ax) * dt;
    velocity.y += finite_or_zero(ay) * dt;

    // Exponential drag, never reversing the velocity within one step.
    let drag = (caps.drag_rate * dt).min(1.0);
    velocity.x -= velocity.x * drag;
    velocity.y -= velocity.y * drag;

    let speed = velocity.speed();
    if speed > caps.max_speed && speed > 0.0 {
        let scale = caps.max_speed / speed;
        velocity.x *= scale;
        velocity.y *= scale;
    }

    position.x += velocity.x * dt;
    position.y += velocity.y * dt;

    (position, velocity)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
