//! Simulation engine — the tick orchestrator.
//!
//! `SimulationEngine` owns the hecs ECS world, the seeded RNG, the match and
//! sensor-picture state, processes queued commands, runs the systems in
//! strict order, and produces `SimSnapshot`s. Completely headless (no
//! renderer dependency), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use darkwater_core::commands::{ControlInput, MatchCommand};
use darkwater_core::constants::{MATCH_RESET_GRACE_SECS, MAX_STEP_SECS};
use darkwater_core::contacts::SensorPicture;
use darkwater_core::enums::{MatchPhase, ShipClass};
use darkwater_core::events::SimEvent;
use darkwater_core::state::{MatchState, SimSnapshot};
use darkwater_core::types::SimTime;
use darkwater_core::world::WorldLayout;

use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Static world geometry for every match this engine runs.
    pub layout: WorldLayout,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            layout: world_setup::training_layout(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all cross-tick state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    layout: WorldLayout,
    match_state: MatchState,
    picture: SensorPicture,
    command_queue: VecDeque<MatchCommand>,
    events: Vec<SimEvent>,
    despawn_buffer: Vec<hecs::Entity>,
    player_class: ShipClass,
    next_ship_id: u32,
    ended_at: Option<f64>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let match_state = MatchState {
            bounds: config.layout.bounds(),
            escape_zone: config.layout.escape_zone,
            time_limit_secs: config.layout.time_limit_secs,
            started_at_secs: 0.0,
            status: MatchPhase::MainMenu,
        };
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            layout: config.layout,
            match_state,
            picture: SensorPicture::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            player_class: ShipClass::default(),
            next_ship_id: 0,
            ended_at: None,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: MatchCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = MatchCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame delta and return the snapshot.
    /// The delta is sanitized at this boundary: non-finite or non-positive
    /// values skip the step, oversized values are capped.
    pub fn tick(&mut self, dt_secs: f64, input: &ControlInput) -> SimSnapshot {
        self.process_commands();
        let dt = sanitize_dt(dt_secs);

        match self.match_state.status {
            MatchPhase::Playing if dt > 0.0 => self.run_step(dt, input),
            MatchPhase::Won | MatchPhase::Lost if dt > 0.0 => {
                self.time.advance(dt);
                let now = self.time.elapsed_secs;
                if let Some(ended_at) = self.ended_at {
                    if now - ended_at >= MATCH_RESET_GRACE_SECS {
                        self.start_match(self.player_class);
                        self.events.push(SimEvent::MatchReset);
                    }
                }
            }
            _ => {}
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(&self.world, &self.time, &self.match_state, &self.picture, events)
    }

    /// Get the current match status.
    pub fn status(&self) -> MatchPhase {
        self.match_state.status
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: MatchCommand) {
        match command {
            MatchCommand::StartMatch { ship_class } => {
                if matches!(
                    self.match_state.status,
                    MatchPhase::MainMenu | MatchPhase::Won | MatchPhase::Lost
                ) {
                    self.start_match(ship_class);
                }
            }
            MatchCommand::Pause => {
                if self.match_state.status == MatchPhase::Playing {
                    self.match_state.status = MatchPhase::Paused;
                }
            }
            MatchCommand::Resume => {
                if self.match_state.status == MatchPhase::Paused {
                    self.match_state.status = MatchPhase::Playing;
                }
            }
            MatchCommand::AbortToMenu => {
                self.world.clear();
                self.picture = SensorPicture::default();
                self.ended_at = None;
                self.match_state.status = MatchPhase::MainMenu;
            }
        }
    }

    /// Install a fresh match: respawn every ship, reset the picture and the
    /// escape clock.
    fn start_match(&mut self, ship_class: ShipClass) {
        self.player_class = ship_class;
        world_setup::setup_match(
            &mut self.world,
            &self.layout,
            ship_class,
            self.time.elapsed_secs,
            &mut self.rng,
            &mut self.next_ship_id,
        );
        self.picture = SensorPicture::default();
        self.ended_at = None;
        self.match_state = MatchState {
            bounds: self.layout.bounds(),
            escape_zone: self.layout.escape_zone,
            time_limit_secs: self.layout.time_limit_secs,
            started_at_secs: self.time.elapsed_secs,
            status: MatchPhase::Playing,
        };
    }

    /// One playing step, in the binding order.
    fn run_step(&mut self, dt: f64, input: &ControlInput) {
        self.time.advance(dt);
        let now = self.time.elapsed_secs;

        // 1. Player control input.
        systems::control::run(&mut self.world, input, now, dt, &mut self.events);
        // 2. AI intents, steering, decoy spawns.
        systems::ai::run(
            &mut self.world,
            &self.layout,
            now,
            &mut self.next_ship_id,
            &mut self.events,
        );
        // 3. Physics integration + collision + bounds.
        systems::movement::run(&mut self.world, &self.layout, now, dt);
        // 4. Noise indices from post-move positions.
        systems::acoustics::run(&mut self.world, &self.layout.zones, dt);
        // 5. Ambient + passive channels for the observer.
        systems::contacts::run(
            &mut self.world,
            &self.layout.obstacles,
            &mut self.picture,
            &mut self.rng,
            now,
            &mut self.events,
        );
        // 6. Active ping — at most one accepted per tick.
        systems::ping::run(
            &mut self.world,
            &self.layout.obstacles,
            &mut self.picture,
            input.fire_ping,
            now,
            &mut self.events,
        );
        // 7. TTL expiry of the picture and exhausted decoys.
        systems::expiry::run(&mut self.world, &mut self.picture, now, &mut self.despawn_buffer);
        // 8. Win/lose.
        systems::victory::run(&mut self.world, &mut self.match_state, now, &mut self.events);
        if self.match_state.status.is_ended() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }
}

fn sanitize_dt(dt_secs: f64) -> f64 {
    if !dt_secs.is_finite() || dt_secs <= 0.0 {
        0.0
    } else {
        dt_secs.min(MAX_STEP_SECS)
    }
}
