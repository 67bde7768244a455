//! Demo autopilot
//!
//! Plays through the same press/release intents a person would send, so the
//! headless runner and soak tests can drive whole rounds.

use super::collision::obstacle_hitbox;
use super::difficulty::speed_px_per_sec;
use super::state::{GamePhase, GameState};

/// Input the autopilot wants to send this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PilotAction {
    Press,
    Release,
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Seconds between takeoff and the obstacle reaching the player's hitbox
    lead_time: f64,
    /// How long each press is held
    hold_time: f64,
    release_at: Option<f64>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lead_time: 0.12,
            hold_time: 0.08,
            release_at: None,
        }
    }
}

impl Autopilot {
    pub fn new(lead_time: f64, hold_time: f64) -> Self {
        Self {
            lead_time,
            hold_time,
            release_at: None,
        }
    }

    pub fn is_holding(&self) -> bool {
        self.release_at.is_some()
    }

    /// Decide on this frame's input.
    ///
    /// Presses when the nearest obstacle ahead will be `lead_time` away at the
    /// moment the press is released (the jump starts on release).
    pub fn decide(&mut self, state: &GameState, now: f64) -> Option<PilotAction> {
        if let Some(at) = self.release_at {
            if now >= at {
                self.release_at = None;
                return Some(PilotAction::Release);
            }
            return None;
        }

        if state.phase() != GamePhase::Running || !state.player.on_ground() {
            return None;
        }

        let tuning = &state.tuning;
        let player_right = tuning.player_x + tuning.player.width - tuning.player.hitbox.right;
        let nearest_gap = state
            .obstacles
            .iter()
            .map(|o| obstacle_hitbox(o, tuning).left() - player_right)
            .filter(|gap| *gap >= 0.0)
            .fold(f32::INFINITY, f32::min);

        let px_per_sec = speed_px_per_sec(state.difficulty.speed(), tuning);
        let trigger = px_per_sec * (self.lead_time + self.hold_time) as f32;
        if nearest_gap <= trigger {
            self.release_at = Some(now + self.hold_time);
            Some(PilotAction::Press)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, ObstacleKind};
    use crate::tuning::Tuning;

    fn state_with_obstacle(x: f32) -> GameState {
        let mut state = GameState::new(1, Tuning::default());
        state.start_round(0.0);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Crystal,
            x,
            elevation: 0.0,
            created_at: 0.0,
        });
        state
    }

    #[test]
    fn test_waits_for_distant_obstacle() {
        let state = state_with_obstacle(900.0);
        let mut pilot = Autopilot::default();
        assert_eq!(pilot.decide(&state, 0.0), None);
    }

    #[test]
    fn test_presses_then_releases() {
        let state = state_with_obstacle(180.0);
        let mut pilot = Autopilot::default();
        assert_eq!(pilot.decide(&state, 1.0), Some(PilotAction::Press));
        assert!(pilot.is_holding());
        assert_eq!(pilot.decide(&state, 1.05), None);
        assert_eq!(pilot.decide(&state, 1.08), Some(PilotAction::Release));
        assert!(!pilot.is_holding());
    }

    #[test]
    fn test_ignores_obstacles_behind() {
        let state = state_with_obstacle(-150.0);
        let mut pilot = Autopilot::default();
        assert_eq!(pilot.decide(&state, 0.0), None);
    }

    #[test]
    fn test_idle_outside_running() {
        let mut state = state_with_obstacle(180.0);
        state.round.phase = GamePhase::HitStun;
        let mut pilot = Autopilot::default();
        assert_eq!(pilot.decide(&state, 0.0), None);
    }
}
