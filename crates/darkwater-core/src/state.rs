//! Match state and the snapshot sent to the renderer each tick.

use serde::{Deserialize, Serialize};

use crate::contacts::SensorPicture;
use crate::enums::{MatchPhase, SensorMode, ShipClass};
use crate::events::SimEvent;
use crate::types::{Position, Rect, SimTime};

/// Authoritative match record. Created at match start, mutated only by the
/// tick orchestrator, terminal once the status leaves Playing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchState {
    pub bounds: Rect,
    pub escape_zone: Rect,
    pub time_limit_secs: f64,
    pub started_at_secs: f64,
    pub status: MatchPhase,
}

impl MatchState {
    /// Seconds left on the escape clock, clamped at zero.
    pub fn time_remaining(&self, now_secs: f64) -> f64 {
        (self.started_at_secs + self.time_limit_secs - now_secs).clamp(0.0, self.time_limit_secs)
    }
}

/// Complete visible state broadcast to the renderer after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub match_state: MatchState,
    pub time_remaining_secs: f64,
    pub player: Option<PlayerView>,
    pub ships: Vec<ShipView>,
    /// True decoy-buoy positions, for the renderer only.
    pub decoys: Vec<Position>,
    pub picture: SensorPicture,
    pub events: Vec<SimEvent>,
}

/// One ship as the renderer draws it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub id: u32,
    pub name: String,
    pub class: ShipClass,
    pub position: Position,
    pub heading: f64,
    pub speed: f64,
    pub noise_index: f64,
    pub history: Vec<Position>,
}

/// The player ship plus its sensor HUD state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub ship_id: u32,
    pub scan: ScanView,
}

/// Sensor HUD state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanView {
    pub arc: f64,
    pub arc_min: f64,
    pub arc_max: f64,
    pub ping_cooldown_secs: f64,
    /// Zero when the ping is ready.
    pub ping_ready_in_secs: f64,
    pub dark_run: bool,
    pub dark_run_remaining_secs: f64,
    pub mode: SensorMode,
}
