//! Line-of-sight occlusion against solid rectangles.
//!
//! Slab-clips the observer→target segment against each obstacle; any
//! non-empty overlap with a rectangle blocks the channel entirely.

use darkwater_core::types::{Position, Rect};
use darkwater_core::world::ObstacleRect;

/// True when no obstacle intersects the segment between `from` and `to`.
pub fn segment_clear(from: &Position, to: &Position, obstacles: &[ObstacleRect]) -> bool {
    obstacles
        .iter()
        .all(|obstacle| !segment_intersects_rect(from, to, &obstacle.rect))
}

fn segment_intersects_rect(from: &Position, to: &Position, rect: &Rect) -> bool {
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    clip_axis(from.x, dx, rect.min_x, rect.max_x, &mut t0, &mut t1)
        && clip_axis(from.y, dy, rect.min_y, rect.max_y, &mut t0, &mut t1)
}

/// Liang-Barsky axis clip. Shrinks [t0, t1] to the slab overlap; returns
/// false once the interval empties.
fn clip_axis(p: f64, d: f64, min: f64, max: f64, t0: &mut f64, t1: &mut f64) -> bool {
    if d.abs() < 1e-12 {
        return p >= min && p <= max;
    }
    let inv = 1.0 / d;
    let mut t_near = (min - p) * inv;
    let mut t_far = (max - p) * inv;
    if t_near > t_far {
        std::mem::swap(&mut t_near, &mut t_far);
    }
    *t0 = t0.max(t_near);
    *t1 = t1.min(t_far);
    t0 <= t1
}
