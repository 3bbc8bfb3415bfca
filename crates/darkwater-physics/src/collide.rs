//! Rectangle collision resolution and world-bound clamping.
//!
//! Obstacles are solid axis-aligned rectangles. A position inside one is
//! pushed out along the axis of minimum penetration and the velocity
//! component on that axis is zeroed — sliding contact, not a bounce. Ties
//! resolve along the x axis. World-bound clamping is an independent second
//! pass applying the same zero-the-axis rule against the four world edges.

use darkwater_core::types::{Position, Rect, Velocity};
use darkwater_core::world::ObstacleRect;

/// Resolve obstacle penetration for a candidate position. `prev` breaks the
/// side choice on a dead-centered penetration. Deterministic and idempotent:
/// re-resolving an already corrected position is a no-op.
pub fn resolve_obstacles(
    prev: &Position,
    next: Position,
    velocity: Velocity,
    obstacles: &[ObstacleRect],
) -> (Position, Velocity) {
    let mut position = next;
    let mut velocity = velocity;

    for obstacle in obstacles {
        let rect = &obstacle.rect;
        if !inside_open(&position, rect) {
            continue;
        }

        let pen_left = position.x - rect.min_x;
        let pen_right = rect.max_x - position.x;
        let pen_down = position.y - rect.min_y;
        let pen_up = rect.max_y - position.y;
        let pen_x = pen_left.min(pen_right);
        let pen_y = pen_down.min(pen_up);

        if pen_x <= pen_y {
            position.x = if pen_left < pen_right {
                rect.min_x
            } else if pen_right < pen_left {
                rect.max_x
            } else if prev.x <= rect.center().x {
                rect.min_x
            } else {
                rect.max_x
            };
            velocity.x = 0.0;
        } else {
            position.y = if pen_down < pen_up {
                rect.min_y
            } else if pen_up < pen_down {
                rect.max_y
            } else if prev.y <= rect.center().y {
                rect.min_y
            } else {
                rect.max_y
            };
            velocity.y = 0.0;
        }
    }

    (position, velocity)
}

/// Clamp a position to the world rectangle, zeroing the velocity component
/// on any clamped axis.
pub fn clamp_to_bounds(
    position: Position,
    velocity: Velocity,
    bounds: &Rect,
) -> (Position, Velocity) {
    let mut position = position;
    let mut velocity = velocity;

    if position.x < bounds.min_x {
        position.x = bounds.min_x;
        velocity.x = 0.0;
    } else if position.x > bounds.max_x {
        position.x = bounds.max_x;
        velocity.x = 0.0;
    }
    if position.y < bounds.min_y {
        position.y = bounds.min_y;
        velocity.y = 0.0;
    } else if position.y > bounds.max_y {
        position.y = bounds.max_y;
        velocity.y = 0.0;
    }

    (position, velocity)
}

/// Strictly-inside test: a point on the boundary is already resolved.
fn inside_open(point: &Position, rect: &Rect) -> bool {
    point.x > rect.min_x && point.x < rect.max_x && point.y > rect.min_y && point.y < rect.max_y
}
