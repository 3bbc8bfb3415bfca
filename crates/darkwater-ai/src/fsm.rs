//! Intent state machine for AI-controlled ships.
//!
//! Pure functions that compute the next intent and a desired velocity from
//! the ship's situation. No ECS dependency — the ai system in darkwater-sim
//! gathers the context, applies the decision, and layers steering on top.

use darkwater_core::constants::*;
use darkwater_core::enums::AiIntent;
use darkwater_core::types::{Position, Velocity};
use darkwater_core::world::EnvironmentZone;

/// Input to the intent machine for a single ship.
pub struct AiContext<'a> {
    pub intent: AiIntent,
    pub position: Position,
    pub velocity: Velocity,
    /// Patrol anchor.
    pub home: Position,
    /// Per-ship phase offset for the patrol wobble.
    pub wander_phase: f64,
    pub max_speed: f64,
    pub now_secs: f64,
    pub intent_since_secs: f64,
    pub last_pinged_at: Option<f64>,
    /// Bearing toward the pursuer, learned from the last ping.
    pub threat_bearing: Option<f64>,
    pub last_decoy_at: Option<f64>,
    /// Environment suppression at the ship's current position.
    pub env_suppression: f64,
    pub zones: &'a [EnvironmentZone],
}

/// Output of the intent machine.
pub struct AiDecision {
    pub new_intent: AiIntent,
    pub intent_changed: bool,
    pub desired_velocity: Velocity,
    /// Self-masking factor to apply to the ship's acoustics.
    pub masking: f64,
    /// Request a decoy drop (throttled; orchestrator spawns the buoy).
    pub drop_decoy: bool,
}

/// Evaluate the machine for one ship.
///
/// Transition table: default patrol; pinged recently ⇒ evade; pinged
/// recently while exposed (local suppression below the threshold) ⇒ hide.
/// Hide is an escalation of evade, not an independent branch.
pub fn evaluate(ctx: &AiContext) -> AiDecision {
    let pinged_recently = ctx
        .last_pinged_at
        .map_or(false, |t| ctx.now_secs - t <= PING_MEMORY_SECS);
    let exposed = ctx.env_suppression < EXPOSURE_THRESHOLD;

    let new_intent = if pinged_recently && exposed {
        AiIntent::Hide
    } else if pinged_recently {
        AiIntent::Evade
    } else {
        AiIntent::Patrol
    };

    let intent_changed = new_intent != ctx.intent;
    let since = if intent_changed {
        ctx.now_secs
    } else {
        ctx.intent_since_secs
    };

    let (desired_velocity, masking) = match new_intent {
        AiIntent::Patrol => patrol_policy(ctx),
        AiIntent::Evade => evade_policy(ctx, since),
        AiIntent::Hide => hide_policy(ctx),
    };

    let decoy_ready = ctx
        .last_decoy_at
        .map_or(true, |t| ctx.now_secs - t >= DECOY_MIN_INTERVAL_SECS);
    let drop_decoy =
        intent_changed && new_intent == AiIntent::Evade && pinged_recently && decoy_ready;

    AiDecision {
        new_intent,
        intent_changed,
        desired_velocity,
        masking,
        drop_decoy,
    }
}

/// Patrol: steady lateral drift with a small sinusoidal wobble, tethered to
/// the home anchor.
fn patrol_policy(ctx: &AiContext) -> (Velocity, f64) {
    let speed = ctx.max_speed * PATROL_SPEED_FACTOR;

    let heading = if ctx.position.range_to(&ctx.home) > PATROL_TETHER_RADIUS {
        ctx.position.bearing_to(&ctx.home)
    } else {
        let wobble = (ctx.now_secs * std::f64::consts::TAU / PATROL_WOBBLE_PERIOD_SECS
            + ctx.wander_phase)
            .sin()
            * PATROL_WOBBLE_AMPLITUDE;
        ctx.wander_phase + ctx.now_secs * PATROL_DRIFT_RATE + wobble
    };

    (Velocity::from_heading(heading, speed), PATROL_MASKING)
}

/// Evade: a fixed-period phase clock alternates between braking (quiet,
/// setting up the turn) and a sideways burst away from the pursuer's last
/// known bearing.
fn evade_policy(ctx: &AiContext, since_secs: f64) -> (Velocity, f64) {
    let phase = ((ctx.now_secs - since_secs) / EVADE_PHASE_PERIOD_SECS).floor() as i64;

    if phase % 2 == 0 {
        let braked = Velocity::new(
            ctx.velocity.x * EVADE_BRAKE_FACTOR,
            ctx.velocity.y * EVADE_BRAKE_FACTOR,
        );
        return (braked, EVADE_BRAKE_MASKING);
    }

    let away = ctx
        .threat_bearing
        .map_or(ctx.velocity.heading() + std::f64::consts::PI, |b| {
            b + std::f64::consts::PI
        });
    // Alternate the burst side across burst legs.
    let side = if (phase / 2) % 2 == 0 { 1.0 } else { -1.0 };
    let heading = away + side * std::f64::consts::FRAC_PI_3;
    (Velocity::from_heading(heading, ctx.max_speed), EVADE_MASKING)
}

/// Hide: steer for the centroid of the nearest usable cover zone, then
/// settle into a quiet drift once inside it.
fn hide_policy(ctx: &AiContext) -> (Velocity, f64) {
    let cover = nearest_cover(&ctx.position, ctx.zones);

    let desired = match cover {
        Some(zone) if zone.rect.contains(&ctx.position) => {
            let heading = ctx.position.bearing_to(&zone.rect.center());
            Velocity::from_heading(heading, ctx.max_speed * HIDE_SETTLE_FACTOR)
        }
        Some(zone) => {
            let heading = ctx.position.bearing_to(&zone.rect.center());
            Velocity::from_heading(heading, ctx.max_speed * HIDE_APPROACH_FACTOR)
        }
        // No cover anywhere: creep and stay quiet.
        None => Velocity::new(
            ctx.velocity.x * HIDE_SETTLE_FACTOR,
            ctx.velocity.y * HIDE_SETTLE_FACTOR,
        ),
    };

    (desired, HIDE_MASKING)
}

/// The closest zone worth hiding in, by centroid distance.
fn nearest_cover<'a>(
    position: &Position,
    zones: &'a [EnvironmentZone],
) -> Option<&'a EnvironmentZone> {
    zones
        .iter()
        .filter(|zone| zone.noise_suppression >= HIDE_MIN_ZONE_SUPPRESSION)
        .min_by(|a, b| {
            let da = position.range_to(&a.rect.center());
            let db = position.range_to(&b.rect.center());
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}
