//! AI behavior system — drives the intent machine for every AI ship.
//!
//! Collects decisions first, then applies them, to keep hecs borrows simple.
//! Decoy requests become short-lived buoy entities plus a feedback event.

use hecs::World;

use darkwater_ai::fsm::{evaluate, AiContext, AiDecision};
use darkwater_ai::steering::{obstacle_repulsion, unstick_override};
use darkwater_core::components::*;
use darkwater_core::constants::*;
use darkwater_core::events::SimEvent;
use darkwater_core::types::{Position, Velocity};
use darkwater_core::world::WorldLayout;
use darkwater_sensors::noise::environment_suppression;

pub fn run(
    world: &mut World,
    layout: &WorldLayout,
    now_secs: f64,
    next_ship_id: &mut u32,
    events: &mut Vec<SimEvent>,
) {
    let mut updates: Vec<(hecs::Entity, AiDecision, Position, Velocity, f64, MotionLimits)> =
        Vec::new();

    {
        let mut query = world.query::<(
            &AiState,
            &Position,
            &Velocity,
            &Heading,
            &EchoLog,
            &MotionLimits,
        )>();
        for (entity, (ai, pos, vel, heading, echo, limits)) in query.iter() {
            let ctx = AiContext {
                intent: ai.intent,
                position: *pos,
                velocity: *vel,
                home: ai.home,
                wander_phase: ai.wander_phase,
                max_speed: limits.max_speed,
                now_secs,
                intent_since_secs: ai.intent_since,
                last_pinged_at: echo.last_pinged_at,
                threat_bearing: echo.threat_bearing,
                last_decoy_at: echo.last_decoy_at,
                env_suppression: environment_suppression(pos, &layout.zones),
                zones: &layout.zones,
            };
            updates.push((entity, evaluate(&ctx), *pos, *vel, heading.0, *limits));
        }
    }

    let mut decoys: Vec<Position> = Vec::new();

    for (entity, decision, position, velocity, heading, limits) in updates {
        let mut desired = decision.desired_velocity;
        if let Ok(mut ai) = world.get::<&mut AiState>(entity) {
            if decision.intent_changed {
                ai.intent = decision.new_intent;
                ai.intent_since = now_secs;
            }
            if let Some(burst) =
                unstick_override(&mut ai, &velocity, heading, limits.max_speed, now_secs)
            {
                desired = burst;
            }
        }

        if let Ok(mut drive) = world.get::<&mut DriveCommand>(entity) {
            let mut ax = (desired.x - velocity.x) * AI_STEER_GAIN;
            let mut ay = (desired.y - velocity.y) * AI_STEER_GAIN;
            let mag = (ax * ax + ay * ay).sqrt();
            if mag > limits.accel {
                let scale = limits.accel / mag;
                ax *= scale;
                ay *= scale;
            }
            // Repulsion stacks on top of the clamped steering command so
            // geometry avoidance always wins.
            let repulse = obstacle_repulsion(&position, &velocity, &layout.obstacles);
            drive.ax = ax + repulse.x;
            drive.ay = ay + repulse.y;
            drive.speed_cap_factor = 1.0;
        }

        if let Ok(mut acoustics) = world.get::<&mut Acoustics>(entity) {
            acoustics.suppression = decision.masking;
        }

        if decision.drop_decoy {
            if let Ok(mut echo) = world.get::<&mut EchoLog>(entity) {
                echo.last_decoy_at = Some(now_secs);
            }
            decoys.push(position);
            events.push(SimEvent::DecoyDropped { position });
        }
    }

    for position in decoys {
        spawn_decoy(world, position, now_secs, next_ship_id);
    }
}

/// A decoy is a real noise source: the normal sensor channels detect it
/// indistinguishably from a ship until it expires.
fn spawn_decoy(world: &mut World, position: Position, now_secs: f64, next_ship_id: &mut u32) {
    let id = *next_ship_id;
    *next_ship_id += 1;
    world.spawn((
        DecoyBuoy {
            id,
            expires_at: now_secs + DECOY_LIFETIME_SECS,
        },
        position,
        Acoustics {
            base: DECOY_NOISE_LEVEL,
            thrust: 0.0,
            weapons: 0.0,
            module: 0.0,
            suppression: 0.0,
            raw_index: DECOY_NOISE_LEVEL,
            // Already loud the moment it hits the water.
            smoothed_index: DECOY_NOISE_LEVEL,
            smoothing_rate: AI_NOISE_RATE,
        },
        HullSignature {
            size_factor: DECOY_SIZE_FACTOR,
        },
    ));
}
