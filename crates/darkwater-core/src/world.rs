//! World geometry input.
//!
//! Produced by an external layout generator and consumed read-only by the
//! sensor model, noise engine, physics, and AI. `Deserialize` so a generator
//! can hand the layout in as JSON.

use serde::{Deserialize, Serialize};

use crate::enums::ZoneKind;
use crate::types::{Position, Rect};

/// A rectangular environment region with a noise-suppression coefficient.
/// Zones may overlap; suppression stacks additively, clamped at the noise
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentZone {
    pub rect: Rect,
    pub kind: ZoneKind,
    pub noise_suppression: f64,
}

/// A solid rectangle: blocks movement and sensor line of sight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleRect {
    pub rect: Rect,
}

/// Static match geometry and parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldLayout {
    pub width: f64,
    pub height: f64,
    pub zones: Vec<EnvironmentZone>,
    pub obstacles: Vec<ObstacleRect>,
    pub escape_zone: Rect,
    pub player_spawn: Position,
    pub quarry_spawn: Position,
    pub traffic_spawns: Vec<Position>,
    pub time_limit_secs: f64,
}

impl WorldLayout {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}
