//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Match phase (top-level state). `Won`/`Lost` are terminal until the
/// auto-reset grace period elapses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    MainMenu,
    Playing,
    Paused,
    /// Quarry intercepted.
    Won,
    /// Quarry escaped.
    Lost,
}

impl MatchPhase {
    /// True for the terminal outcomes.
    pub fn is_ended(&self) -> bool {
        matches!(self, MatchPhase::Won | MatchPhase::Lost)
    }
}

/// Hull class. Each class maps to a static stat block in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    /// Balanced pursuit hull — the default player pick.
    #[default]
    Corvette,
    /// Quiet hull with a long passive baseline, slow.
    Prowler,
    /// Fast and loud, wide sensor net.
    Marauder,
    /// The quarry: a light runner hull.
    Courier,
    /// Ambient traffic: big, slow, noisy.
    Freighter,
}

/// Intent state for AI-controlled ships.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiIntent {
    #[default]
    Patrol,
    /// Recently pinged — brake/burst away from the pursuer's bearing.
    Evade,
    /// Recently pinged while exposed — run for the nearest cover zone.
    Hide,
}

/// Environment zone category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    #[default]
    Open,
    /// Acoustic shadow: strong suppression.
    Shadow,
    /// Thermal layer: moderate suppression.
    Thermal,
    /// Surface clutter: light suppression.
    Clutter,
}

/// Which detection channel produced a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorChannel {
    Ambient,
    Passive,
    Active,
}

/// Sensor-fit specialization tag, set per class at spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorMode {
    #[default]
    Balanced,
    /// Longer passive baseline, tighter reveal radius.
    RangeFocused,
    /// Wider starting arc, slightly hotter ambient channel.
    ArcFocused,
}
