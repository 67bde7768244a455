//! Per-frame simulation module
//!
//! All gameplay logic lives here:
//! - One monotonic clock, read once per tick; timers are scheduled timestamps
//! - Seeded RNG only
//! - Fixed step order: physics, movement, collision, spawning
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod error;
pub mod event;
pub mod input;
pub mod physics;
pub mod round;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::{Autopilot, PilotAction};
pub use clock::{Clock, FrameTimer, ManualClock, SystemClock};
pub use collision::{Aabb, is_colliding, obstacle_hitbox, player_hitbox};
pub use difficulty::DifficultyRamp;
pub use error::SimError;
pub use event::GameEvent;
pub use input::{InputArbiter, InputSource, strength_for_duration};
pub use physics::{JumpDecision, Landing};
pub use round::{HitOutcome, RoundState, RoundTransition};
pub use snapshot::{ObstacleView, PlayerAnim, Snapshot};
pub use spawner::SpawnSchedule;
pub use state::{Cloud, GamePhase, GameState, JumpRequest, Obstacle, ObstacleKind, Player};
pub use tick::{TickReport, tick};
