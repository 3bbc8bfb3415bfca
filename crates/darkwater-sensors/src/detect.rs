//! Detection channels.
//!
//! Three independent channels computed per observer-target pair: ambient
//! (omnidirectional, inverse-square), passive (arc-limited, directivity gain,
//! position uncertainty), and active (two-way spreading loss, exact fix).
//! Thresholds are defined so a sizeFactor-1 target exactly at the configured
//! base distance sits on the detection boundary.
//!
//! Ranges are converted to meters exactly once, here, via METERS_PER_UNIT —
//! the signal formulas never see world units.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use darkwater_core::components::ScanState;
use darkwater_core::constants::*;
use darkwater_core::contacts::{ActiveContact, AmbientContact, PassiveContact};
use darkwater_core::types::Position;
use darkwater_core::world::ObstacleRect;

use crate::los::segment_clear;

/// A detecting ship's pose and sensor configuration.
pub struct Observer<'a> {
    pub position: Position,
    pub heading: f64,
    pub scan: &'a ScanState,
}

/// A detectable ship as the channels see it.
#[derive(Debug, Clone)]
pub struct SensorTarget {
    pub ship_id: u32,
    pub position: Position,
    pub smoothed_noise: f64,
    pub size_factor: f64,
}

/// Inverse-square noise signal at `range_m`.
pub fn ambient_signal(smoothed_noise: f64, size_factor: f64, range_m: f64) -> f64 {
    let range = range_m.max(MIN_SIGNAL_RANGE_M);
    NOISE_CALIBRATION * smoothed_noise.max(NOISE_FLOOR) * clamp_size(size_factor) / (range * range)
}

/// Ambient/passive detection threshold for a base distance.
pub fn detection_threshold(base_range_m: f64) -> f64 {
    let base = base_range_m.max(MIN_SIGNAL_RANGE_M);
    1.0 / (base * base)
}

/// Directivity gain: narrowing the arc trades coverage for range.
pub fn directivity_gain(arc: f64, arc_max: f64) -> f64 {
    (arc_max / arc.max(1e-6)).sqrt()
}

/// Two-way spreading-loss signal for the active channel.
pub fn active_signal(size_factor: f64, range_m: f64) -> f64 {
    let range = range_m.max(MIN_SIGNAL_RANGE_M);
    let range_sq = range * range;
    clamp_size(size_factor) / (range_sq * range_sq)
}

/// Active detection threshold for a base distance.
pub fn active_threshold(base_range_m: f64) -> f64 {
    let base = base_range_m.max(MIN_SIGNAL_RANGE_M);
    let base_sq = base * base;
    1.0 / (base_sq * base_sq)
}

fn clamp_size(size_factor: f64) -> f64 {
    size_factor.clamp(SIZE_FACTOR_MIN, SIZE_FACTOR_MAX)
}

/// Whether `bearing` falls inside the forward arc around `heading`.
fn in_arc(bearing: f64, heading: f64, arc: f64) -> bool {
    let half = arc / 2.0;
    let diff = (bearing - heading).rem_euclid(std::f64::consts::TAU);
    diff <= half || diff >= (std::f64::consts::TAU - half)
}

/// Uniform random offset within `radius` of `position`.
fn jitter(position: &Position, radius: f64, rng: &mut ChaCha8Rng) -> Position {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let r = rng.gen_range(0.0..radius.max(1e-9));
    Position::new(position.x + r * angle.sin(), position.y + r * angle.cos())
}

/// Ambient channel: omnidirectional, short range, imprecise fix.
pub fn ambient_scan(
    observer: &Observer,
    targets: &[SensorTarget],
    obstacles: &[ObstacleRect],
    rng: &mut ChaCha8Rng,
) -> Vec<AmbientContact> {
    let threshold = detection_threshold(observer.scan.ambient_base_m);
    let mut contacts = Vec::new();

    for target in targets {
        let range_m = observer.position.range_to(&target.position) * METERS_PER_UNIT;
        let signal = ambient_signal(target.smoothed_noise, target.size_factor, range_m);
        if signal < threshold {
            continue;
        }
        if !segment_clear(&observer.position, &target.position, obstacles) {
            continue;
        }
        contacts.push(AmbientContact {
            ship_id: target.ship_id,
            position: jitter(&target.position, AMBIENT_FIX_JITTER, rng),
        });
    }

    contacts
}

/// Passive channel: forward arc only, directivity gain, SNR-scaled position
/// error. Returns an approximate 2D fix plus the bearing/error/SNR metadata.
pub fn passive_scan(
    observer: &Observer,
    targets: &[SensorTarget],
    obstacles: &[ObstacleRect],
    rng: &mut ChaCha8Rng,
) -> Vec<PassiveContact> {
    let scan = observer.scan;
    let threshold = detection_threshold(scan.passive_base_m);
    let gain = directivity_gain(scan.arc, scan.arc_max);
    let mut contacts = Vec::new();

    for target in targets {
        let bearing = observer.position.bearing_to(&target.position);
        if !in_arc(bearing, observer.heading, scan.arc) {
            continue;
        }

        let range_m = observer.position.range_to(&target.position) * METERS_PER_UNIT;
        let signal = ambient_signal(target.smoothed_noise, target.size_factor, range_m) * gain;
        if signal < threshold {
            continue;
        }
        if !segment_clear(&observer.position, &target.position, obstacles) {
            continue;
        }

        let snr = (signal / threshold).max(1.0);
        let error_m = (PASSIVE_MIDPOINT_ERROR_M / snr.sqrt())
            .clamp(PASSIVE_ERROR_MIN_M, PASSIVE_ERROR_MAX_M)
            * rng.gen_range(0.9..1.1);
        let error_radius = error_m / METERS_PER_UNIT;

        contacts.push(PassiveContact {
            ship_id: target.ship_id,
            position: jitter(&target.position, error_radius, rng),
            bearing,
            error_radius,
            snr,
        });
    }

    contacts
}

/// Active channel: omnidirectional ping, exact fix, no randomness. Cooldown
/// gating and the firer's own consequences live in the ping system.
pub fn active_scan(
    observer: &Observer,
    targets: &[SensorTarget],
    obstacles: &[ObstacleRect],
    now_secs: f64,
) -> Vec<ActiveContact> {
    let threshold = active_threshold(observer.scan.active_base_m);
    let mut contacts = Vec::new();

    for target in targets {
        let range = observer.position.range_to(&target.position);
        let signal = active_signal(target.size_factor, range * METERS_PER_UNIT);
        if signal < threshold {
            continue;
        }
        if !segment_clear(&observer.position, &target.position, obstacles) {
            continue;
        }
        contacts.push(ActiveContact {
            ship_id: target.ship_id,
            position: target.position,
            range,
            at_secs: now_secs,
        });
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkwater_core::catalog::scan_state_for;
    use darkwater_core::enums::ShipClass;
    use darkwater_core::types::Rect;
    use rand::SeedableRng;

    fn test_scan() -> ScanState {
        let mut scan = scan_state_for(ShipClass::Corvette);
        scan.ambient_base_m = 150.0;
        scan.passive_base_m = 420.0;
        scan.active_base_m = 2200.0;
        scan
    }

    fn target_at(x: f64, y: f64, noise: f64, size: f64) -> SensorTarget {
        SensorTarget {
            ship_id: 1,
            position: Position::new(x, y),
            smoothed_noise: noise,
            size_factor: size,
        }
    }

    #[test]
    fn test_ambient_boundary_at_base_distance() {
        // Calibration is chosen so noise 0.05 at sizeFactor 0.8 sits exactly
        // on the threshold at the base distance.
        let base = 600.0;
        let threshold = detection_threshold(base);
        let signal = ambient_signal(0.05, 0.8, base);
        assert!(
            (signal - threshold).abs() < threshold * 1e-9,
            "signal {signal} vs threshold {threshold}"
        );
        assert!(ambient_signal(0.05, 0.8, base - 0.01) > threshold);
        assert!(ambient_signal(0.05, 0.8, base + 0.01) < threshold);
    }

    #[test]
    fn test_signals_monotonically_decrease_with_range() {
        let mut last_ambient = f64::INFINITY;
        let mut last_active = f64::INFINITY;
        for range in [10.0, 50.0, 200.0, 800.0, 3200.0] {
            let a = ambient_signal(0.4, 1.0, range);
            let b = active_signal(1.0, range);
            assert!(a < last_ambient);
            assert!(b < last_active);
            last_ambient = a;
            last_active = b;
        }
    }

    #[test]
    fn test_active_boundary_at_base_distance() {
        let base = 2200.0;
        let signal = active_signal(1.0, base);
        let threshold = active_threshold(base);
        assert!((signal - threshold).abs() < threshold * 1e-9);
    }

    #[test]
    fn test_range_floored_near_zero() {
        // A coincident target must not divide by zero.
        let signal = ambient_signal(0.5, 1.0, 0.0);
        assert!(signal.is_finite());
        assert_eq!(signal, ambient_signal(0.5, 1.0, MIN_SIGNAL_RANGE_M));
    }

    #[test]
    fn test_directivity_gain_increases_as_arc_narrows() {
        use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
        let wide = directivity_gain(FRAC_PI_2, PI);
        let narrow = directivity_gain(FRAC_PI_4, PI);
        assert!((wide - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((narrow - 2.0).abs() < 1e-12);
        assert!(narrow > wide);
    }

    #[test]
    fn test_ambient_scan_detects_loud_close_target() {
        let scan = test_scan();
        let observer = Observer {
            position: Position::new(0.0, 0.0),
            heading: 0.0,
            scan: &scan,
        };
        // 100 units = 200 m, well inside the detection radius for 0.4 noise.
        let targets = [target_at(0.0, 100.0, 0.4, 1.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let contacts = ambient_scan(&observer, &targets, &[], &mut rng);
        assert_eq!(contacts.len(), 1);
        // The fix is jittered but stays within the jitter radius.
        let offset = contacts[0].position.range_to(&targets[0].position);
        assert!(offset <= AMBIENT_FIX_JITTER + 1e-9);
    }

    #[test]
    fn test_ambient_scan_misses_distant_target() {
        let scan = test_scan();
        let observer = Observer {
            position: Position::new(0.0, 0.0),
            heading: 0.0,
            scan: &scan,
        };
        let targets = [target_at(0.0, 2000.0, 0.4, 1.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(ambient_scan(&observer, &targets, &[], &mut rng).is_empty());
    }

    #[test]
    fn test_occlusion_suppresses_every_channel() {
        let scan = test_scan();
        let observer = Observer {
            position: Position::new(0.0, 500.0),
            heading: std::f64::consts::FRAC_PI_2,
            scan: &scan,
        };
        // A wall fully separating observer and target.
        let wall = [ObstacleRect {
            rect: Rect::new(40.0, 0.0, 60.0, 1000.0),
        }];
        let targets = [target_at(100.0, 500.0, 1.0, 1.2)];
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        assert!(ambient_scan(&observer, &targets, &wall, &mut rng).is_empty());
        assert!(passive_scan(&observer, &targets, &wall, &mut rng).is_empty());
        assert!(active_scan(&observer, &targets, &wall, 0.0).is_empty());

        // Without the wall all three channels see it.
        assert_eq!(ambient_scan(&observer, &targets, &[], &mut rng).len(), 1);
        assert_eq!(passive_scan(&observer, &targets, &[], &mut rng).len(), 1);
        assert_eq!(active_scan(&observer, &targets, &[], 0.0).len(), 1);
    }

    #[test]
    fn test_passive_scan_ignores_targets_outside_arc() {
        let mut scan = test_scan();
        scan.arc = std::f64::consts::FRAC_PI_2;
        let observer = Observer {
            position: Position::new(0.0, 0.0),
            heading: 0.0, // facing north
            scan: &scan,
        };
        // Loud target due south — outside the forward arc regardless of
        // signal strength.
        let targets = [target_at(0.0, -50.0, 1.5, 1.2)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(passive_scan(&observer, &targets, &[], &mut rng).is_empty());
    }

    #[test]
    fn test_passive_narrower_arc_tightens_position_error() {
        use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
        // Same seed for both scans so the ±10% error roll and jitter draws
        // are identical; only the directivity gain differs.
        let targets = [target_at(0.0, 342.0, 0.3, 1.0)];

        let mut scan_wide = test_scan();
        scan_wide.arc = FRAC_PI_2;
        let observer_wide = Observer {
            position: Position::new(0.0, 0.0),
            heading: 0.0,
            scan: &scan_wide,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let wide = passive_scan(&observer_wide, &targets, &[], &mut rng);

        let mut scan_narrow = test_scan();
        scan_narrow.arc = FRAC_PI_4;
        let observer_narrow = Observer {
            position: Position::new(0.0, 0.0),
            heading: 0.0,
            scan: &scan_narrow,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let narrow = passive_scan(&observer_narrow, &targets, &[], &mut rng);

        assert_eq!(wide.len(), 1);
        assert_eq!(narrow.len(), 1);
        assert!(narrow[0].snr > wide[0].snr);
        assert!(
            narrow[0].error_radius < wide[0].error_radius,
            "narrow {} vs wide {}",
            narrow[0].error_radius,
            wide[0].error_radius
        );
    }

    #[test]
    fn test_passive_snr_floored_at_one() {
        // Target barely over the threshold: SNR just above 1, never below.
        let scan = test_scan();
        let observer = Observer {
            position: Position::new(0.0, 0.0),
            heading: 0.0,
            scan: &scan,
        };
        let targets = [target_at(0.0, 420.0, 0.12, 1.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let contacts = passive_scan(&observer, &targets, &[], &mut rng);
        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].snr >= 1.0);
    }

    #[test]
    fn test_active_scan_reports_exact_position() {
        let scan = test_scan();
        let observer = Observer {
            position: Position::new(0.0, 0.0),
            heading: 0.0,
            scan: &scan,
        };
        let targets = [target_at(300.0, 400.0, 0.01, 1.0)];
        let contacts = active_scan(&observer, &targets, &[], 12.5);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].position, targets[0].position);
        assert!((contacts[0].range - 500.0).abs() < 1e-9);
        assert_eq!(contacts[0].at_secs, 12.5);
    }

    #[test]
    fn test_active_scan_independent_of_noise() {
        // The active channel keys on size, not emitted noise: a silent
        // target still echoes.
        let scan = test_scan();
        let observer = Observer {
            position: Position::new(0.0, 0.0),
            heading: 0.0,
            scan: &scan,
        };
        let silent = [target_at(0.0, 500.0, 0.0, 1.0)];
        assert_eq!(active_scan(&observer, &silent, &[], 0.0).len(), 1);
    }

    #[test]
    fn test_size_factor_clamped() {
        // Wildly out-of-range detectability behaves like the clamp bound.
        let huge = ambient_signal(0.5, 10.0, 300.0);
        let top = ambient_signal(0.5, SIZE_FACTOR_MAX, 300.0);
        assert_eq!(huge, top);
    }
}
