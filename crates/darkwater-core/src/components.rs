//! ECS components for hecs entities.
//!
//! Components are plain data structs; game logic lives in systems.
//! Per-entity timers (ping memory, decoy throttle, unstick cooldown) are
//! fields on the owning entity, never external side tables.

use serde::{Deserialize, Serialize};

use crate::enums::{AiIntent, SensorMode, ShipClass};
use crate::types::Position;

/// Identity shared by every ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipIdent {
    pub id: u32,
    pub name: String,
    pub class: ShipClass,
}

/// Facing in radians (0 = North, clockwise). Player heading is helm-driven;
/// AI headings follow velocity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Heading(pub f64);

/// Acoustic emitter state — the ship's noise signature source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Acoustics {
    /// Hull/machinery baseline.
    pub base: f64,
    /// Propulsion noise; follows actual speed each tick.
    pub thrust: f64,
    /// Weapons transients; spiked by pings, decays to the class baseline.
    pub weapons: f64,
    /// Auxiliary module noise.
    pub module: f64,
    /// Active masking factor [0, 1] (dark run, AI quieting).
    pub suppression: f64,
    /// Instantaneous emitted index, clamped to [0, 1.5].
    pub raw_index: f64,
    /// Exponentially smoothed index — what the sensor channels consume.
    pub smoothed_index: f64,
    /// One-pole response rate (1/s); the player responds faster than AI.
    pub smoothing_rate: f64,
}

/// Class-derived detectability, the sensor-model size factor source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HullSignature {
    pub size_factor: f64,
}

/// Class-derived performance caps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionLimits {
    /// Maximum speed (world units per second).
    pub max_speed: f64,
    /// Maximum commanded acceleration (world units per second squared).
    pub accel: f64,
}

/// Commanded acceleration for this tick. Written by the control and AI
/// systems, consumed by movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DriveCommand {
    pub ax: f64,
    pub ay: f64,
    /// Scales the speed cap (dark run slows the ship).
    pub speed_cap_factor: f64,
}

impl Default for DriveCommand {
    fn default() -> Self {
        Self {
            ax: 0.0,
            ay: 0.0,
            speed_cap_factor: 1.0,
        }
    }
}

/// Per-ship sensor configuration (the detecting ship's side).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanState {
    /// Channel reference distances (meters).
    pub ambient_base_m: f64,
    pub passive_base_m: f64,
    pub active_base_m: f64,
    /// Passive arc width (radians), always clamped to [arc_min, arc_max].
    pub arc: f64,
    pub arc_min: f64,
    pub arc_max: f64,
    /// Radius of the bubble refreshed at passive contact positions.
    pub passive_reveal_radius: f64,
    /// Active ping gating.
    pub ping_cooldown_secs: f64,
    pub last_ping_at: Option<f64>,
    /// Dark-run suppression toggle and its expiry.
    pub dark_run: bool,
    pub dark_run_until: f64,
    /// Specialization tag set by the class catalog.
    pub mode: SensorMode,
}

impl ScanState {
    /// Whether the cooldown has elapsed.
    pub fn ping_ready(&self, now_secs: f64) -> bool {
        self.last_ping_at
            .map_or(true, |t| now_secs - t >= self.ping_cooldown_secs)
    }

    pub fn clamp_arc(&mut self) {
        self.arc = self.arc.clamp(self.arc_min, self.arc_max);
    }
}

/// What a ship knows about being detected: the last active ping that painted
/// it, the bearing it learned from that ping, and its own decoy throttle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EchoLog {
    pub last_pinged_at: Option<f64>,
    /// Bearing from this ship toward the pinger, learned when painted.
    pub threat_bearing: Option<f64>,
    pub last_decoy_at: Option<f64>,
}

/// Behavior-machine state for AI-controlled ships.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AiState {
    pub intent: AiIntent,
    pub intent_since: f64,
    /// Patrol anchor; the ship loiters around this point.
    pub home: Position,
    /// Per-ship phase offset for the patrol wobble.
    pub wander_phase: f64,
    /// Unstick override bookkeeping.
    pub last_unstick_at: Option<f64>,
    pub unstick_until: Option<f64>,
    pub unstick_heading: f64,
}

/// History of positions for trail rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionHistory {
    /// Recent positions (newest first), up to MAX_HISTORY_DOTS.
    pub positions: Vec<Position>,
    pub last_sample_at: f64,
}

/// Marks the player-controlled hunter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Marks the fleeing quarry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuarryShip;

/// Marks ambient traffic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrafficShip;

/// A short-lived decoy noise source dropped by an evading ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecoyBuoy {
    /// Contact id reported by the sensor channels.
    pub id: u32,
    pub expires_at: f64,
}
