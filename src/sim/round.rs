//! Round state machine and score accumulator
//!
//! ```text
//! Idle --start--> Running --hit, lives left--> HitStun --blinks done--> Running
//!                    |
//!                    +--hit, no lives left--> GameOver --restart--> Running
//! ```

use serde::{Deserialize, Serialize};

use super::state::GamePhase;
use crate::tuning::Tuning;

/// Blink sequence shown while in `HitStun`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlinkTimer {
    pub next_toggle_at: f64,
    pub toggles: u32,
    pub visible: bool,
}

/// Result of a collision reported to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// A life was lost and lives remain
    Stunned { lives_left: u8 },
    /// The last life was lost
    Defeated,
    /// The round was not running; nothing changed
    Ignored,
}

/// Timer-driven transitions produced by [`RoundState::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTransition {
    BlinkToggled { visible: bool },
    /// `HitStun` finished, the round is running again
    Recovered,
    /// The game-over delay elapsed; the final score may be published
    ScoreReady { score: u64 },
}

/// Lives, score and status of the current round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub lives: u8,
    pub score: u64,
    pub phase: GamePhase,
    /// Incremented on every round start; tags events and late results
    pub round_id: u64,
    pub blink: Option<BlinkTimer>,
    pub game_over_at: Option<f64>,
    pub score_published: bool,
}

impl RoundState {
    pub fn new(lives: u8) -> Self {
        Self {
            lives,
            score: 0,
            phase: GamePhase::Idle,
            round_id: 0,
            blink: None,
            game_over_at: None,
            score_published: false,
        }
    }

    /// Reset for a new round and start running
    pub fn begin(&mut self, lives: u8) {
        *self = Self {
            lives,
            phase: GamePhase::Running,
            round_id: self.round_id + 1,
            ..Self::new(lives)
        };
    }

    /// Apply one collision. Lives drop by exactly one per call while running.
    pub fn register_hit(&mut self, now: f64, tuning: &Tuning) -> HitOutcome {
        if self.phase != GamePhase::Running {
            return HitOutcome::Ignored;
        }
        self.lives = self.lives.saturating_sub(1);

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.game_over_at = Some(now);
            log::info!("Round {} over with score {}", self.round_id, self.score);
            HitOutcome::Defeated
        } else {
            self.phase = GamePhase::HitStun;
            self.blink = Some(BlinkTimer {
                next_toggle_at: now + tuning.blink_interval,
                toggles: 0,
                visible: true,
            });
            log::info!("Life lost, {} remaining", self.lives);
            HitOutcome::Stunned {
                lives_left: self.lives,
            }
        }
    }

    /// Count an obstacle that left the field without a collision
    pub fn award_pass(&mut self) -> u64 {
        self.score += 1;
        self.score
    }

    /// Run the blink and game-over timers up to `now`
    pub fn advance(&mut self, now: f64, tuning: &Tuning) -> Vec<RoundTransition> {
        let mut transitions = Vec::new();
        match self.phase {
            GamePhase::HitStun => {
                let Some(mut blink) = self.blink else {
                    // No timer means nothing left to wait for
                    self.phase = GamePhase::Running;
                    transitions.push(RoundTransition::Recovered);
                    return transitions;
                };
                while now >= blink.next_toggle_at && blink.toggles < tuning.blink_toggles {
                    blink.visible = !blink.visible;
                    blink.toggles += 1;
                    blink.next_toggle_at += tuning.blink_interval;
                    transitions.push(RoundTransition::BlinkToggled {
                        visible: blink.visible,
                    });
                }
                if blink.toggles >= tuning.blink_toggles {
                    self.blink = None;
                    self.phase = GamePhase::Running;
                    transitions.push(RoundTransition::Recovered);
                } else {
                    self.blink = Some(blink);
                }
            }
            GamePhase::GameOver => {
                if let Some(at) = self.game_over_at {
                    if !self.score_published && now - at >= tuning.game_over_delay {
                        self.score_published = true;
                        transitions.push(RoundTransition::ScoreReady { score: self.score });
                    }
                }
            }
            GamePhase::Idle | GamePhase::Running => {}
        }
        transitions
    }

    /// Whether the player is currently drawn (false during the dark half of a blink)
    pub fn player_visible(&self) -> bool {
        self.blink.map(|b| b.visible).unwrap_or(true)
    }
}
