//! Simulation engine — the core of the game.
//!
//! `RoundEngine` owns the hecs ECS world, processes player commands,
//! runs all systems in a fixed order, and produces `RenderSnapshot`s.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use neonclash_core::commands::{FrameInput, PlayerCommand};
use neonclash_core::constants::{SHAKE_CUTOFF, SHAKE_DECAY};
use neonclash_core::enums::{ControlScheme, GamePhase, RoundOutcome};
use neonclash_core::events::AudioEvent;
use neonclash_core::state::RenderSnapshot;
use neonclash_core::types::SimTime;

use crate::systems;
use crate::world_setup;

/// Configuration for starting a new engine.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same inputs = same frames.
    pub seed: u64,
    /// Initial control scheme for the red player.
    pub control_scheme: ControlScheme,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            control_scheme: ControlScheme::Arrows,
        }
    }
}

/// The simulation engine. Owns the ECS world and all round state —
/// nothing lives in globals.
pub struct RoundEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    outcome: Option<RoundOutcome>,
    control_scheme: ControlScheme,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_events: Vec<AudioEvent>,
    /// Screen-shake magnitude, decayed every tick.
    shake: f32,
}

impl RoundEngine {
    /// Create a new engine with the given config. Spawns the ambient
    /// starfield and both ships.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        world_setup::spawn_starfield(&mut world, &mut rng);
        world_setup::spawn_ships(&mut world);

        Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            outcome: None,
            control_scheme: config.control_scheme,
            rng,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            shake: 0.0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot. Combat systems run only while the round is active;
    /// ambient and effect systems run every tick so the starfield and
    /// any lingering explosion keep animating on the end screen.
    pub fn tick(&mut self, input: &FrameInput) -> RenderSnapshot {
        self.process_commands();

        self.shake *= SHAKE_DECAY;
        if self.shake < SHAKE_CUTOFF {
            self.shake = 0.0;
        }

        if self.phase == GamePhase::Active {
            self.run_combat_systems(input);
        }
        self.run_ambient_systems();
        self.time.advance();

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.control_scheme,
            self.outcome,
            self.shake,
            audio_events,
        )
    }

    /// Get the current round phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the outcome of a finished round, if any.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Get the active control scheme.
    pub fn control_scheme(&self) -> ControlScheme {
        self.control_scheme
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

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Fire { player } => {
                if self.phase == GamePhase::Active {
                    systems::combat::fire(
                        &mut self.world,
                        &mut self.rng,
                        player,
                        &mut self.audio_events,
                    );
                }
            }
            PlayerCommand::Restart => {
                self.reset_round();
            }
            PlayerCommand::SetControlScheme { scheme } => {
                self.control_scheme = scheme;
                self.reset_round();
            }
        }
    }

    /// Discard the current round and start a fresh one. The ambient
    /// starfield persists; everything else is despawned and respawned.
    fn reset_round(&mut self) {
        world_setup::reset_round(&mut self.world, &mut self.despawn_buffer);
        self.phase = GamePhase::Active;
        self.outcome = None;
        self.shake = 0.0;
        self.time = SimTime::default();
        self.audio_events.clear();
        tracing::debug!("round reset");
    }

    /// Gameplay systems, active phase only.
    fn run_combat_systems(&mut self, input: &FrameInput) {
        // 1. Ship movement + hit-flash decay
        systems::movement::run(&mut self.world, input, self.control_scheme);
        // 2. Bullet advance, collision, damage, hit effects
        systems::combat::advance_bullets(
            &mut self.world,
            &mut self.rng,
            &mut self.despawn_buffer,
            &mut self.audio_events,
            &mut self.shake,
        );
        // 3. Thruster exhaust + bullet trail history
        systems::emitter::run(&mut self.world, &mut self.rng);
        // 4. Round-end detection (after damage has been applied)
        if let Some(outcome) =
            systems::combat::detect_round_end(&mut self.world, &mut self.rng)
        {
            self.outcome = Some(outcome);
            self.phase = GamePhase::RoundOver;
            tracing::info!(outcome = ?outcome, frame = self.time.frame, "round over");
        }
    }

    /// Decorative and effect systems, every tick.
    fn run_ambient_systems(&mut self) {
        // 5. Starfield drift + shooting-star spawner
        systems::starfield::run(&mut self.world, &mut self.rng);
        // 6. Particle/spark/ring advance
        systems::effects::run(&mut self.world);
        // 7. Cleanup (expired lifetimes, finished rings, departed meteors)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
