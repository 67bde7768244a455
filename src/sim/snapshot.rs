//! Render-facing view of the simulation
//!
//! The presentation layer draws from a [`Snapshot`] and never touches
//! [`GameState`] directly.

use serde::{Deserialize, Serialize};

use super::difficulty::speed_px_per_sec;
use super::state::{GamePhase, GameState, ObstacleKind};

/// Which player animation to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAnim {
    Running,
    Airborne,
    Blinking { visible: bool },
    Defeated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudView {
    pub x: f32,
    pub height_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub round_id: u64,
    pub player_y: f32,
    pub player_anim: PlayerAnim,
    pub obstacles: Vec<ObstacleView>,
    pub clouds: Vec<CloudView>,
    pub lives: u8,
    pub score: u64,
    /// Scroll speed for background pacing (px/s)
    pub scroll_speed: f32,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player_anim = match state.round.phase {
            GamePhase::GameOver => PlayerAnim::Defeated,
            GamePhase::HitStun => PlayerAnim::Blinking {
                visible: state.round.player_visible(),
            },
            GamePhase::Idle | GamePhase::Running if state.player.y > 0.0 => PlayerAnim::Airborne,
            GamePhase::Idle | GamePhase::Running => PlayerAnim::Running,
        };

        Self {
            phase: state.round.phase,
            round_id: state.round.round_id,
            player_y: state.player.y,
            player_anim,
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    x: o.x,
                    y: o.elevation,
                    kind: o.kind,
                })
                .collect(),
            clouds: state
                .clouds
                .iter()
                .map(|c| CloudView {
                    x: c.x,
                    height_fraction: c.height_fraction,
                })
                .collect(),
            lives: state.round.lives,
            score: state.round.score,
            scroll_speed: speed_px_per_sec(state.difficulty.speed(), &state.tuning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_running() {
        let mut state = GameState::new(1, Tuning::default());
        state.start_round(0.0);
        state.player.y = 30.0;
        state.obstacles.push(Obstacle {
            id: 4,
            kind: ObstacleKind::Fire,
            x: 500.0,
            elevation: 0.0,
            created_at: 0.0,
        });

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.player_anim, PlayerAnim::Airborne);
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.obstacles[0].kind, ObstacleKind::Fire);
        assert_eq!(snap.lives, 3);
        assert!((snap.scroll_speed - 252.0).abs() < 1e-3);
    }

    #[test]
    fn test_capture_defeated_serializes() {
        let mut state = GameState::new(1, Tuning::default());
        state.start_round(0.0);
        state.round.phase = GamePhase::GameOver;
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.player_anim, PlayerAnim::Defeated);

        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
