//! Host-facing game driver
//!
//! Wires a [`Clock`], the input arbiter and the simulation together. A host
//! forwards its input callbacks here and calls [`Game::frame`] once per
//! rendered frame; every call runs to completion before the next one.

use crate::sim::{
    Clock, FrameTimer, GameEvent, GamePhase, GameState, InputArbiter, InputSource, JumpDecision,
    Snapshot, SystemClock, TickReport, tick,
};
use crate::tuning::{Tuning, TuningError};

pub struct Game<C: Clock = SystemClock> {
    clock: C,
    frames: FrameTimer,
    state: GameState,
    input: InputArbiter,
    /// Events raised by input callbacks, delivered with the next frame report
    pending: Vec<GameEvent>,
}

impl Game<SystemClock> {
    /// Game driven by the process's monotonic clock
    pub fn with_system_clock(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        Self::new(SystemClock::new(), seed, tuning)
    }
}

impl<C: Clock> Game<C> {
    /// Fails if `tuning` does not validate
    pub fn new(clock: C, seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            clock,
            frames: FrameTimer::new(),
            state: GameState::new(seed, tuning),
            input: InputArbiter::new(),
            pending: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Start (or restart) a round. Ignored while a round is in progress and
    /// after a game over until its score has been published.
    pub fn start_round(&mut self) -> bool {
        let now = self.clock.now();
        if !self.state.start_round(now) {
            return false;
        }
        self.input.reset();
        self.frames.reset(now);
        self.pending.clear();
        self.pending.push(GameEvent::RoundStarted {
            round_id: self.state.round.round_id,
        });
        true
    }

    /// A key, pointer or touch went down
    pub fn press_start(&mut self, source: InputSource) -> bool {
        if self.state.phase() == GamePhase::Idle {
            return false;
        }
        let now = self.clock.now();
        self.input.press_start(source, now)
    }

    /// A key, pointer or touch was released; the hold time sets jump strength
    pub fn press_end(&mut self, source: InputSource) -> Option<JumpDecision> {
        let now = self.clock.now();
        let strength = self.input.press_end(source, now, &self.state.tuning)?;
        let decision = self.state.request_jump(strength, now)?;
        match decision {
            JumpDecision::Started { velocity } => {
                log::debug!("Jump started (strength {strength:.2}, vy {velocity:.1})");
                self.pending.push(GameEvent::JumpStarted {
                    strength,
                    velocity,
                    buffered: false,
                });
            }
            JumpDecision::Buffered => {
                log::debug!("Jump buffered (strength {strength:.2})");
                self.pending.push(GameEvent::JumpBuffered { strength });
            }
        }
        Some(decision)
    }

    /// Advance the simulation to the current clock reading
    pub fn frame(&mut self) -> TickReport {
        let now = self.clock.now();
        let dt = self.frames.delta(now);
        let mut report = tick(&mut self.state, now, dt);
        if !self.pending.is_empty() {
            let mut events = std::mem::take(&mut self.pending);
            events.append(&mut report.events);
            report.events = events;
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ManualClock;

    fn manual_game() -> Game<ManualClock> {
        Game::new(ManualClock::new(0.0), 42, Tuning::default()).unwrap()
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            max_strength: 0.5,
            ..Tuning::default()
        };
        assert!(Game::new(ManualClock::new(0.0), 1, tuning).is_err());

        let tuning = Tuning {
            speed_interval: 0.0,
            ..Tuning::default()
        };
        assert!(Game::new(ManualClock::new(0.0), 1, tuning).is_err());
    }

    #[test]
    fn test_jump_survives_frame_at_same_clock_reading() {
        let mut game = manual_game();
        game.start_round();
        game.frame();

        game.press_start(InputSource::Keyboard);
        let decision = game.press_end(InputSource::Keyboard);
        assert!(matches!(decision, Some(JumpDecision::Started { .. })));

        // Same reading: dt is zero
        let report = game.frame();
        assert!(!report.events.contains(&GameEvent::Landed));
        assert!(game.state().player.vy > 0.0);
        assert_eq!(game.state().player.jumps_used, 1);

        game.clock().advance(1.0 / 60.0);
        game.frame();
        assert!(game.state().player.y > 0.0);
    }

    #[test]
    fn test_restart_during_game_over_delay_keeps_score() {
        let tuning = Tuning {
            start_lives: 1,
            ..Tuning::default()
        };
        let mut game = Game::new(ManualClock::new(0.0), 9, tuning).unwrap();
        game.start_round();

        // Never jump until the only life is lost
        let mut frames = 0;
        while game.phase() != GamePhase::GameOver {
            game.clock().advance(1.0 / 60.0);
            game.frame();
            frames += 1;
            assert!(frames < 60 * 60, "round never ended");
        }
        assert!(!game.start_round());

        let mut ready = Vec::new();
        for _ in 0..60 {
            game.clock().advance(1.0 / 60.0);
            let report = game.frame();
            ready.extend(report.events.into_iter().filter_map(|e| match e {
                GameEvent::ScoreReady { round_id, .. } => Some(round_id),
                _ => None,
            }));
        }
        assert_eq!(ready, vec![1]);
        assert!(game.start_round());
        assert_eq!(game.state().round.round_id, 2);
    }

    #[test]
    fn test_input_ignored_while_idle() {
        let mut game = manual_game();
        assert!(!game.press_start(InputSource::Keyboard));
        assert_eq!(game.press_end(InputSource::Keyboard), None);
        let report = game.frame();
        assert!(report.events.is_empty());
        assert_eq!(game.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_start_round_reports_round_started() {
        let mut game = manual_game();
        assert!(game.start_round());
        assert!(!game.start_round());
        game.clock().advance(1.0 / 60.0);
        let report = game.frame();
        assert_eq!(report.round_id, 1);
        assert_eq!(report.events[0], GameEvent::RoundStarted { round_id: 1 });
    }

    #[test]
    fn test_short_press_jumps_at_min_strength() {
        let mut game = manual_game();
        game.start_round();
        game.frame();

        assert!(game.press_start(InputSource::Pointer));
        game.clock().advance(0.05);
        let decision = game.press_end(InputSource::Pointer);
        assert!(matches!(decision, Some(JumpDecision::Started { .. })));

        game.clock().advance(1.0 / 60.0);
        let report = game.frame();
        assert!(report.events.iter().any(|e| matches!(
            e,
            GameEvent::JumpStarted {
                buffered: false,
                ..
            }
        )));
        assert!(game.state().player.y > 0.0);
    }

    #[test]
    fn test_second_press_mid_air_is_buffered() {
        let mut game = manual_game();
        game.start_round();
        game.frame();

        game.press_start(InputSource::Keyboard);
        game.press_end(InputSource::Keyboard);
        game.clock().advance(0.1);
        game.frame();

        game.press_start(InputSource::Touch);
        game.clock().advance(0.02);
        assert_eq!(
            game.press_end(InputSource::Touch),
            Some(JumpDecision::Buffered)
        );
        assert!(game.state().player.buffered.is_some());
    }

    #[test]
    fn test_frames_follow_the_clock() {
        let mut game = manual_game();
        game.start_round();
        game.frame();
        for _ in 0..120 {
            game.clock().advance(1.0 / 60.0);
            game.frame();
        }
        assert!((game.state().time - 2.0).abs() < 1e-9);
        assert_eq!(game.snapshot().round_id, 1);
    }
}
