//! Cat Runner - a one-button arcade runner
//!
//! Core modules:
//! - `sim`: Per-frame simulation (jump physics, spawning, collisions, round state)
//! - `game`: Host-facing driver wiring the clock, input and simulation together
//! - `tuning`: Data-driven game balance
//! - `api`: Score submission and leaderboard retrieval
//! - `leaderboard`: Ranked leaderboard model

pub mod api;
pub mod game;
pub mod leaderboard;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use tuning::{DeviceKind, Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Longest frame delta the simulation will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Obstacle speed is expressed in pixels per frame at this rate
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Ground time before the first landing, far enough back that coyote time never applies
    pub const INITIAL_GROUND_TIME: f64 = -9999.0;

    /// Jump physics
    pub const GRAVITY: f32 = 2200.0; // px/s²
    pub const BASE_JUMP_HEIGHT: f32 = 125.0; // px at strength 1.0
    pub const MIN_STRENGTH: f32 = 0.95;
    pub const MAX_STRENGTH: f32 = 1.85;
    pub const LONG_PRESS_MS: f64 = 380.0;
    pub const MAX_JUMPS: u32 = 1;
    pub const COYOTE_TIME: f64 = 0.12;
    pub const JUMP_BUFFER_TIME: f64 = 0.12;

    /// Scroll speed (px per reference frame) and the ramp that raises it
    pub const BASE_SPEED: f32 = 4.2;
    pub const SPEED_STEP: f32 = 0.35;
    pub const SPEED_CAP: f32 = 11.0;
    pub const SPEED_INTERVAL: f64 = 11.0; // seconds
    pub const MIN_SCROLL_PX_PER_SEC: f32 = 40.0;

    /// Obstacle spacing
    pub const MIN_GAP_PX_DESKTOP: f32 = 220.0;
    pub const MIN_GAP_PX_TOUCH: f32 = 300.0;
    pub const GAP_GROWTH_THRESHOLD: f32 = 4.0;
    pub const GAP_GROWTH_PX: f32 = 22.0;
    pub const SPAWN_FLOOR: f64 = 0.20; // seconds
    pub const SPAWN_MEAN_FACTOR: f64 = 1.25;
    pub const SPAWN_PAD: f64 = 0.25;
    pub const SPAWN_JITTER: f64 = 0.12;

    /// Clouds (cosmetic)
    pub const CLOUD_MEAN: f64 = 3.8;
    pub const CLOUD_FLOOR: f64 = 1.0;
    pub const CLOUD_SPEED: f32 = 80.0; // px/s
    pub const CLOUD_OFFFIELD_MARGIN: f32 = 400.0;

    /// Field layout
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 540.0;
    pub const OFFFIELD_MARGIN: f32 = 200.0;
    pub const PLAYER_X: f32 = 80.0;

    /// Round
    pub const START_LIVES: u8 = 3;
    pub const BLINK_TOGGLES: u32 = 6;
    pub const BLINK_INTERVAL: f64 = 0.3;
    pub const GAME_OVER_DELAY: f64 = 0.6;
}
