//! Game state and core simulation types
//!
//! Everything a round needs lives in [`GameState`]; components receive it (or
//! the part they own) by reference and never reach into each other's state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyRamp;
use super::physics::{self, JumpDecision};
use super::round::RoundState;
use super::spawner::SpawnSchedule;
use crate::consts::INITIAL_GROUND_TIME;
use crate::tuning::Tuning;

/// Round status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start command; nothing advances
    Idle,
    /// Active gameplay
    Running,
    /// Blinking after a lost life; the field is frozen
    HitStun,
    /// Lives exhausted; only a restart leaves this phase
    GameOver,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Crystal,
    Fire,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::Crystal, ObstacleKind::Fire];
}

/// A jump that was requested while no jump was available
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpRequest {
    pub time: f64,
    pub strength: f32,
}

/// The runner. Only vertical motion is simulated; x is fixed by tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Height above the ground (px, >= 0)
    pub y: f32,
    /// Vertical velocity (px/s, positive is up)
    pub vy: f32,
    pub jumps_used: u32,
    pub last_ground_time: f64,
    pub buffered: Option<JumpRequest>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            y: 0.0,
            vy: 0.0,
            jumps_used: 0,
            last_ground_time: INITIAL_GROUND_TIME,
            buffered: None,
        }
    }
}

impl Player {
    pub fn on_ground(&self) -> bool {
        self.y == 0.0 && self.vy == 0.0
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Left edge of the visual bounds (px)
    pub x: f32,
    /// Bottom edge above the ground (px)
    pub elevation: f32,
    pub created_at: f64,
}

/// Background cloud (cosmetic)
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub id: u32,
    pub x: f32,
    /// Distance from the top of the field as a fraction of its height
    pub height_fraction: f32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub round: RoundState,
    pub player: Player,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub schedule: SpawnSchedule,
    pub difficulty: DifficultyRamp,
    /// Clock reading of the most recent tick
    pub time: f64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle game with the given seed.
    ///
    /// `tuning` is expected to have passed [`Tuning::validate`].
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let difficulty = DifficultyRamp::new(0.0, &tuning);
        Self {
            seed,
            round: RoundState::new(tuning.start_lives),
            player: Player::default(),
            obstacles: Vec::new(),
            clouds: Vec::new(),
            schedule: SpawnSchedule::default(),
            difficulty,
            time: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.round.phase
    }

    /// Allocate a new entity ID. IDs wrap after `u32::MAX`.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Start a fresh round. Only valid from `Idle`, or from `GameOver` once
    /// the final score has been published.
    ///
    /// Resets lives, score, the player (dropping any buffered jump), the field,
    /// the difficulty ramp and both spawn schedules.
    pub fn start_round(&mut self, now: f64) -> bool {
        match self.round.phase {
            GamePhase::Idle => {}
            GamePhase::GameOver if self.round.score_published => {}
            GamePhase::GameOver => {
                log::debug!(
                    "Restart ignored until round {} score is published",
                    self.round.round_id
                );
                return false;
            }
            GamePhase::Running | GamePhase::HitStun => return false,
        }
        self.round.begin(self.tuning.start_lives);
        self.player = Player::default();
        self.clear_field();
        self.difficulty = DifficultyRamp::new(now, &self.tuning);
        self.reschedule(now);
        self.time = now;
        log::info!(
            "Round {} started (seed {}, speed {})",
            self.round.round_id,
            self.seed,
            self.difficulty.speed()
        );
        true
    }

    /// Route a jump request to the integrator. Only honored while running.
    pub fn request_jump(&mut self, strength: f32, now: f64) -> Option<JumpDecision> {
        if self.round.phase != GamePhase::Running {
            log::debug!("Jump request ignored in {:?}", self.round.phase);
            return None;
        }
        Some(physics::request_jump(&mut self.player, strength, now, &self.tuning))
    }

    /// Remove every obstacle and cloud
    pub fn clear_field(&mut self) {
        self.obstacles.clear();
        self.clouds.clear();
    }

    /// Schedule fresh obstacle and cloud spawns from `now`
    pub fn reschedule(&mut self, now: f64) {
        self.schedule = SpawnSchedule::new(
            now,
            self.difficulty.speed(),
            &mut self.rng,
            &self.tuning,
        );
    }
}
