//! The sensor picture: per-tick detection outputs and their timed residue.
//!
//! Ambient and passive contact lists are rebuilt wholesale each tick; active
//! echoes, reveal bubbles, and breadcrumbs persist with TTLs and are pruned
//! lazily by age comparison — never by a scheduled callback. The tick
//! orchestrator is the only mutator.

use serde::{Deserialize, Serialize};

use crate::constants::{ACTIVE_ECHO_WINDOW_SECS, MAX_BREADCRUMBS};
use crate::types::Position;

/// Omnidirectional short-range contact: id plus an imprecise fix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientContact {
    pub ship_id: u32,
    pub position: Position,
}

/// Arc-limited contact with position uncertainty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassiveContact {
    pub ship_id: u32,
    /// Approximate fix, jittered by `error_radius`.
    pub position: Position,
    /// True bearing from the observer at detection time.
    pub bearing: f64,
    /// Error-ellipse radius in world units.
    pub error_radius: f64,
    /// Signal over threshold, floored at 1.
    pub snr: f64,
}

/// Exact echo from an active ping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveContact {
    pub ship_id: u32,
    pub position: Position,
    /// Range at detection time (world units).
    pub range: f64,
    pub at_secs: f64,
}

/// Timed area marker for a detection event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealBubble {
    pub position: Position,
    pub radius: f64,
    pub created_at: f64,
    pub ttl_secs: f64,
}

/// Decaying trail point at an approximate detected position. `decoy` marks
/// deception blips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub position: Position,
    pub created_at: f64,
    pub ttl_secs: f64,
    pub decoy: bool,
}

/// Everything the player's sensors currently show.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorPicture {
    pub ambient: Vec<AmbientContact>,
    pub passive: Vec<PassiveContact>,
    pub active: Vec<ActiveContact>,
    pub bubbles: Vec<RevealBubble>,
    pub crumbs: Vec<Breadcrumb>,
}

impl SensorPicture {
    /// Drop every TTL'd entry whose age exceeds its window.
    pub fn prune_expired(&mut self, now_secs: f64) {
        self.active
            .retain(|echo| now_secs - echo.at_secs < ACTIVE_ECHO_WINDOW_SECS);
        self.bubbles
            .retain(|bubble| now_secs - bubble.created_at < bubble.ttl_secs);
        self.crumbs
            .retain(|crumb| now_secs - crumb.created_at < crumb.ttl_secs);
    }

    /// Append a crumb, evicting the oldest once the cap is reached.
    /// Crumbs are appended in time order, so the oldest sits at the front.
    pub fn push_crumb(&mut self, crumb: Breadcrumb) {
        if self.crumbs.len() >= MAX_BREADCRUMBS {
            self.crumbs.remove(0);
        }
        self.crumbs.push(crumb);
    }

    /// Whether any crumb lies within `radius` of `position`.
    pub fn crumb_near(&self, position: &Position, radius: f64) -> bool {
        self.crumbs
            .iter()
            .any(|crumb| crumb.position.range_to(position) <= radius)
    }

    /// Whether any bubble center lies within `radius` of `position`.
    pub fn bubble_near(&self, position: &Position, radius: f64) -> bool {
        self.bubbles
            .iter()
            .any(|bubble| bubble.position.range_to(position) <= radius)
    }

    /// Sorted, deduplicated ids currently held on the ambient or passive
    /// channels.
    pub fn contact_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .ambient
            .iter()
            .map(|c| c.ship_id)
            .chain(self.passive.iter().map(|c| c.ship_id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
