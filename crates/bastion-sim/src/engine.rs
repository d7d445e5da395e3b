//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the terrain grid, and all
//! run state; processes player commands; runs the systems in fixed order;
//! and produces `GameSnapshot`s. Completely headless, enabling
//! deterministic testing: the same seed yields the same snapshot stream.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bastion_core::commands::{InputState, PlayerCommand};
use bastion_core::components::EnemyTag;
use bastion_core::constants::{POWERUP_CHANCE_ON_BRICK, POWERUP_CHANCE_ON_KILL};
use bastion_core::enums::GamePhase;
use bastion_core::events::AudioCue;
use bastion_core::state::GameSnapshot;
use bastion_core::types::SimTime;
use bastion_levels::{builtin, LevelDef};
use bastion_terrain::TileGrid;

use crate::progress::{LevelProgress, ScoreState};
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Drop chance rolled when an enemy is destroyed.
    pub powerup_chance_on_kill: f64,
    /// Drop chance rolled when a brick cell crumbles.
    pub powerup_chance_on_brick: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            powerup_chance_on_kill: POWERUP_CHANCE_ON_KILL,
            powerup_chance_on_brick: POWERUP_CHANCE_ON_BRICK,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    grid: TileGrid,
    level: LevelDef,
    level_number: u32,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    input: InputState,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_cues: Vec<AudioCue>,
    score: ScoreState,
    progress: LevelProgress,
    freeze_ticks: u32,
    next_tank_id: u32,
    config: SimConfig,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    /// The engine starts in the menu with an empty world.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            grid: TileGrid::new(0, 0),
            level: builtin::generate(1),
            level_number: 0,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            input: InputState::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_cues: Vec::new(),
            score: ScoreState::default(),
            progress: LevelProgress::default(),
            freeze_ticks: 0,
            next_tank_id: 0,
            config,
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

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let audio_cues = std::mem::take(&mut self.audio_cues);
        systems::snapshot::build(
            &self.world,
            &self.grid,
            &self.time,
            self.phase,
            self.level_number,
            &self.score,
            &self.progress,
            audio_cues,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of live enemies on the field.
    pub fn live_enemies(&self) -> u32 {
        let mut query = self.world.query::<&EnemyTag>();
        query.iter().count() as u32
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
            PlayerCommand::SetInput { direction, fire } => {
                self.input = InputState { direction, fire };
            }
            PlayerCommand::StartLevel { number } => {
                if matches!(
                    self.phase,
                    GamePhase::Menu | GamePhase::LevelComplete | GamePhase::GameOver
                ) {
                    self.start_level(number);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::ReturnToMenu => {
                if matches!(self.phase, GamePhase::LevelComplete | GamePhase::GameOver) {
                    self.phase = GamePhase::Menu;
                }
            }
        }
    }

    /// Tear down the current level and start the given one.
    /// Score and lives carry over between consecutive levels of a run;
    /// starting from the menu or after a loss resets them.
    fn start_level(&mut self, number: u32) {
        let carry_over = self.phase == GamePhase::LevelComplete;

        self.level = bastion_levels::load_level(number);
        self.level_number = number;
        self.grid = self.level.build_grid();
        self.world.clear();
        self.next_tank_id = 0;
        if !carry_over {
            self.score = ScoreState::default();
        }
        self.progress = LevelProgress::new(self.level.enemy_quota);
        self.freeze_ticks = 0;
        self.input = InputState::default();
        self.time = SimTime::default();

        let start = self.level.player_start_px();
        world_setup::spawn_player(&mut self.world, &mut self.next_tank_id, start);

        self.phase = GamePhase::Active;
        self.audio_cues.push(AudioCue::GameStart);
    }

    /// Run all systems in order. The order is load-bearing: bullets must
    /// resolve terrain before tanks, and the spawner must observe the
    /// tick's final field before drawing from the quota.
    fn run_systems(&mut self) {
        let frozen = self.freeze_ticks > 0;
        let player_spawn = self.level.player_start_px();

        // 1. Player input
        systems::player_input::run(&mut self.world, &self.grid, self.input, &mut self.audio_cues);
        // 2. Enemy AI (movement + fire requests)
        systems::enemy_ai::run(
            &mut self.world,
            &self.grid,
            &mut self.rng,
            frozen,
            &mut self.audio_cues,
        );
        // 3. Bullet advance + collision resolution
        systems::combat::run(
            &mut self.world,
            &mut self.grid,
            &mut self.rng,
            &mut self.score,
            &mut self.progress,
            self.config.powerup_chance_on_kill,
            self.config.powerup_chance_on_brick,
            player_spawn,
            &mut self.audio_cues,
            &mut self.despawn_buffer,
        );
        // 4. Timers and lifetimes
        systems::lifetimes::run(&mut self.world, &mut self.freeze_ticks, &mut self.despawn_buffer);
        // 5. Power-up pickups
        systems::powerups::run(
            &mut self.world,
            &mut self.grid,
            &mut self.score,
            &mut self.progress,
            &mut self.freeze_ticks,
            &mut self.audio_cues,
        );
        // 6. Wave director
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.progress,
            &self.level,
            &mut self.next_tank_id,
        );
        // 7. Terminal conditions
        self.check_terminal();
    }

    /// Evaluate win/lose. Base destruction loses regardless of remaining
    /// lives; the level completes once the quota is destroyed and the
    /// field is clear.
    fn check_terminal(&mut self) {
        if self.grid.base_destroyed() || self.score.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.audio_cues.push(AudioCue::GameOver);
        } else if self.progress.is_complete(self.live_enemies()) {
            self.phase = GamePhase::LevelComplete;
            self.audio_cues.push(AudioCue::LevelComplete);
        }
    }
}

#[cfg(test)]
impl SimulationEngine {
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut ScoreState {
        &mut self.score
    }

    pub fn progress(&self) -> &LevelProgress {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut LevelProgress {
        &mut self.progress
    }

    pub fn freeze_ticks(&self) -> u32 {
        self.freeze_ticks
    }

    /// Stop the wave director from producing any further enemies.
    pub fn block_spawns(&mut self) {
        self.progress.spawned = self.progress.quota;
    }

    pub fn player_entity(&self) -> Option<hecs::Entity> {
        let mut query = self
            .world
            .query::<&bastion_core::components::PlayerTag>();
        query.iter().next().map(|(entity, _)| entity)
    }

    pub fn spawn_enemy_at(
        &mut self,
        kind: bastion_core::enums::TankKind,
        col: i32,
        row: i32,
    ) -> hecs::Entity {
        world_setup::spawn_enemy(
            &mut self.world,
            &mut self.next_tank_id,
            kind,
            bastion_core::types::Position::tile_origin(col, row),
        )
    }

    pub fn spawn_powerup_at(
        &mut self,
        kind: bastion_core::enums::PowerUpKind,
        pos: bastion_core::types::Position,
    ) {
        self.world.spawn((
            pos,
            bastion_core::components::PowerUp {
                kind,
                ticks_remaining: bastion_core::constants::POWERUP_LIFETIME_TICKS,
            },
        ));
    }
}
