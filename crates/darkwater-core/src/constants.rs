//! Simulation constants and tuning parameters.

use std::f64::consts::{FRAC_PI_2, PI};

// --- World scale ---

/// Conversion between world/display units and physical meters.
/// Applied exactly once, at the sensor-model boundary.
pub const METERS_PER_UNIT: f64 = 2.0;

/// Largest frame delta accepted per step (seconds). Larger deltas are capped,
/// non-finite or non-positive deltas skip the step entirely.
pub const MAX_STEP_SECS: f64 = 0.25;

// --- Noise engine ---

/// Upper bound of the raw and smoothed noise index.
pub const NOISE_INDEX_MAX: f64 = 1.5;

/// Floor applied to smoothed noise inside the signal formulas; nothing is
/// perfectly silent.
pub const NOISE_FLOOR: f64 = 0.01;

/// Cap on stacked environment suppression; cover never fully mutes a ship.
pub const ENV_SUPPRESSION_MAX: f64 = 0.9;

/// Lower clamp of the one-pole smoothing alpha.
pub const SMOOTH_ALPHA_MIN: f64 = 0.01;

/// One-pole response rate for the player's noise index (1/s).
pub const PLAYER_NOISE_RATE: f64 = 6.0;

/// One-pole response rate for AI ships (1/s) — patrol steadiness.
pub const AI_NOISE_RATE: f64 = 2.5;

/// Exponential decay rate of transient weapons noise back to the class
/// baseline (1/s).
pub const WEAPON_NOISE_DECAY_RATE: f64 = 1.2;

/// Weapons-noise level injected into the firing ship by an active ping.
pub const PING_NOISE_SPIKE: f64 = 0.8;

// --- Sensor model ---

/// Noise-to-signal calibration constant. Chosen so a target with smoothed
/// noise 0.05 and size factor 0.8 sits exactly at the ambient detection
/// threshold at the configured base distance.
pub const NOISE_CALIBRATION: f64 = 25.0;

/// Ambient channel reference distance (meters).
pub const AMBIENT_BASE_RANGE_M: f64 = 150.0;

/// Passive channel reference distance (meters).
pub const PASSIVE_BASE_RANGE_M: f64 = 420.0;

/// Active channel reference distance (meters).
pub const ACTIVE_BASE_RANGE_M: f64 = 2200.0;

/// Clamp bounds for the class-derived size factor.
pub const SIZE_FACTOR_MIN: f64 = 0.8;
pub const SIZE_FACTOR_MAX: f64 = 1.2;

/// Minimum range (meters) fed to any signal formula.
pub const MIN_SIGNAL_RANGE_M: f64 = 1.0;

/// Fixed jitter radius for ambient position fixes (world units).
pub const AMBIENT_FIX_JITTER: f64 = 14.0;

/// Passive arc limits and default (radians).
pub const PASSIVE_ARC_MAX: f64 = PI;
pub const PASSIVE_ARC_MIN: f64 = PI / 6.0;
pub const PASSIVE_ARC_DEFAULT: f64 = FRAC_PI_2;

/// Arc widen/narrow rate (radians per second of held input).
pub const ARC_ADJUST_RATE: f64 = 0.9;

/// Passive position-error model (meters).
pub const PASSIVE_MIDPOINT_ERROR_M: f64 = 130.0;
pub const PASSIVE_ERROR_MIN_M: f64 = 18.0;
pub const PASSIVE_ERROR_MAX_M: f64 = 240.0;

/// Default reveal-bubble radius for passive contacts (world units).
pub const PASSIVE_REVEAL_RADIUS: f64 = 36.0;

// --- Sensor picture lifecycle ---

/// TTL of the small bubble refreshed at each passive contact.
pub const PASSIVE_BUBBLE_TTL_SECS: f64 = 1.5;

/// TTL and radius of the bubble created by an accepted ping.
pub const PING_BUBBLE_TTL_SECS: f64 = 2.5;
pub const PING_REVEAL_RADIUS: f64 = 90.0;

/// Visibility window of exact active echoes; also the win-rule window.
pub const ACTIVE_ECHO_WINDOW_SECS: f64 = 1.5;

/// Breadcrumb trail tuning.
pub const CRUMB_TTL_SECS: f64 = 9.0;
pub const CRUMB_MIN_SPACING: f64 = 22.0;
pub const MAX_BREADCRUMBS: usize = 64;

// --- Active ping ---

/// Seconds between accepted pings.
pub const PING_COOLDOWN_SECS: f64 = 6.0;

/// Intercept radius for the win rule (world units).
pub const INTERCEPT_RADIUS: f64 = 60.0;

// --- Match flow ---

/// Grace period after a terminal outcome before the match auto-resets.
pub const MATCH_RESET_GRACE_SECS: f64 = 5.0;

// --- Physics ---

/// Exponential drag rate (1/s).
pub const DRAG_RATE: f64 = 0.8;

/// Reverse thrust is weaker than forward thrust.
pub const REVERSE_THRUST_FACTOR: f64 = 0.6;

// --- Helm ---

/// Player turn rate (radians per second of held input).
pub const TURN_RATE: f64 = 1.8;

/// Dark run: masking factor, duration, and the drive penalty while engaged.
pub const DARK_RUN_SUPPRESSION: f64 = 0.65;
pub const DARK_RUN_DURATION_SECS: f64 = 12.0;
pub const DARK_RUN_DRIVE_FACTOR: f64 = 0.45;

// --- AI behavior ---

/// How long a ping is "recent" for intent evaluation.
pub const PING_MEMORY_SECS: f64 = 4.0;

/// Below this local environment suppression a pinged ship counts as exposed
/// and escalates from evade to hide.
pub const EXPOSURE_THRESHOLD: f64 = 0.3;

/// Period of the evade brake/burst alternation.
pub const EVADE_PHASE_PERIOD_SECS: f64 = 1.4;

/// Decoy throttle and decoy-buoy properties.
pub const DECOY_MIN_INTERVAL_SECS: f64 = 9.0;
pub const DECOY_LIFETIME_SECS: f64 = 7.0;
pub const DECOY_NOISE_LEVEL: f64 = 0.5;
pub const DECOY_SIZE_FACTOR: f64 = 0.85;

/// Patrol policy shape.
pub const PATROL_SPEED_FACTOR: f64 = 0.45;
pub const PATROL_DRIFT_RATE: f64 = 0.05;
pub const PATROL_WOBBLE_PERIOD_SECS: f64 = 7.0;
pub const PATROL_WOBBLE_AMPLITUDE: f64 = 0.45;
pub const PATROL_TETHER_RADIUS: f64 = 320.0;

/// Evade/hide policy shape.
pub const EVADE_BRAKE_FACTOR: f64 = 0.15;
pub const HIDE_APPROACH_FACTOR: f64 = 0.8;
pub const HIDE_SETTLE_FACTOR: f64 = 0.18;
pub const HIDE_MIN_ZONE_SUPPRESSION: f64 = 0.2;

/// Masking (self-suppression) applied per intent.
pub const PATROL_MASKING: f64 = 0.10;
pub const EVADE_MASKING: f64 = 0.35;
pub const EVADE_BRAKE_MASKING: f64 = 0.60;
pub const HIDE_MASKING: f64 = 0.75;

/// Obstacle repulsion: margin, gain, and forward probe horizon.
pub const OBSTACLE_REPULSION_MARGIN: f64 = 80.0;
pub const OBSTACLE_REPULSION_GAIN: f64 = 2600.0;
pub const PROBE_LOOKAHEAD_SECS: f64 = 1.2;

/// Unstick override: trigger speed, refire cooldown, burst length.
pub const UNSTICK_SPEED_THRESHOLD: f64 = 6.0;
pub const UNSTICK_COOLDOWN_SECS: f64 = 3.0;
pub const UNSTICK_BURST_SECS: f64 = 0.8;

/// Gain turning (desired - current) velocity into commanded acceleration.
pub const AI_STEER_GAIN: f64 = 2.2;

// --- Display ---

/// Position-history trail sampling.
pub const HISTORY_SAMPLE_INTERVAL_SECS: f64 = 0.5;
pub const MAX_HISTORY_DOTS: usize = 12;
