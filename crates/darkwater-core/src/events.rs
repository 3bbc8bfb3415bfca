//! Events emitted by the simulation for HUD and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::SensorChannel;
use crate::types::Position;

/// Feedback events carried on each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A ship appeared on the ambient or passive picture.
    ContactGained {
        channel: SensorChannel,
        ship_id: u32,
        bearing: f64,
    },
    /// A previously held contact dropped off the picture.
    ContactFaded { ship_id: u32 },
    /// An active ping was accepted and fired.
    PingFired { position: Position },
    /// A ping returned an exact echo.
    PingReturn {
        ship_id: u32,
        position: Position,
        range: f64,
    },
    /// An AI ship dropped a decoy buoy.
    DecoyDropped { position: Position },
    /// Dark run engaged / ran out.
    DarkRunEngaged,
    DarkRunExpired,
    /// Terminal outcomes.
    QuarryIntercepted { ship_id: u32 },
    QuarryEscaped { ship_id: u32 },
    /// The post-match grace period elapsed and a fresh match began.
    MatchReset,
}
