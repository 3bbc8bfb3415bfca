//! Commands and per-tick control input.
//!
//! `MatchCommand`s are queued and processed at the next tick boundary.
//! `ControlInput` is a plain struct consumed exactly once per tick — the
//! cross-cutting signals (ping request, dark-run toggle) ride on it instead
//! of any ambient global state.

use serde::{Deserialize, Serialize};

use crate::enums::ShipClass;

/// Match lifecycle commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchCommand {
    /// Start a new match with the chosen hull (from menu or after an ending).
    StartMatch { ship_class: ShipClass },
    /// Pause the simulation.
    Pause,
    /// Resume from pause.
    Resume,
    /// Abandon the match and return to the menu.
    AbortToMenu,
}

/// Helm and sensor intents for one tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ControlInput {
    /// Rudder: -1 (port) .. 1 (starboard).
    pub turn: f64,
    /// Throttle: -1 (reverse) .. 1 (ahead full).
    pub throttle: f64,
    /// Passive arc: -1 (narrow) .. 1 (widen).
    pub arc_adjust: f64,
    /// Request an active ping this tick.
    pub fire_ping: bool,
    /// Toggle dark-run noise suppression.
    pub toggle_dark_run: bool,
}

impl Default for ControlInput {
    fn default() -> Self {
        Self {
            turn: 0.0,
            throttle: 0.0,
            arc_adjust: 0.0,
            fire_ping: false,
            toggle_dark_run: false,
        }
    }
}
