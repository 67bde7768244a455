//! Events emitted during a simulation step.
//! The presentation layer consumes these for animation/sound.

use serde::{Deserialize, Serialize};

use super::state::ObstacleKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round_id: u64 },
    JumpStarted { strength: f32, velocity: f32, buffered: bool },
    JumpBuffered { strength: f32 },
    BufferedJumpExpired,
    Landed,
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    ObstaclePassed { id: u32, score: u64 },
    ObstacleHit { id: u32, lives_left: u8 },
    BlinkToggled { visible: bool },
    Recovered,
    SpeedIncreased { speed: f32 },
    GameOver { score: u64 },
    /// Final score is ready for the score service
    ScoreReady { round_id: u64, score: u64 },
}
