//! Difficulty ramp
//!
//! Scroll speed rises by a fixed step every `speed_interval` seconds of wall
//! time until it reaches the cap. The ramp is a scheduled timestamp rather than
//! a free-running timer: a restart replaces it, so ramps never stack.

use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_FPS;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRamp {
    speed: f32,
    cap: f32,
    step: f32,
    interval: f64,
    next_step_at: f64,
}

impl DifficultyRamp {
    /// A ramp at base speed whose first step is one interval after `now`
    pub fn new(now: f64, tuning: &Tuning) -> Self {
        Self {
            speed: tuning.base_speed,
            cap: tuning.speed_cap,
            step: tuning.speed_step,
            interval: tuning.speed_interval,
            next_step_at: now + tuning.speed_interval,
        }
    }

    /// Current speed (px per reference frame)
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn next_step_at(&self) -> f64 {
        self.next_step_at
    }

    pub fn at_cap(&self) -> bool {
        self.speed >= self.cap
    }

    /// Apply every step due by `now`. Returns the new speed if it changed.
    ///
    /// A ramp built with a non-positive interval never steps.
    pub fn poll(&mut self, now: f64) -> Option<f32> {
        if self.interval.is_nan() || self.interval <= 0.0 {
            return None;
        }
        let before = self.speed;
        while now >= self.next_step_at {
            self.speed = (self.speed + self.step).min(self.cap);
            self.next_step_at += self.interval;
        }
        (self.speed != before).then_some(self.speed)
    }
}

/// Convert a speed in px per reference frame to px/s, with a floor
#[inline]
pub fn speed_px_per_sec(speed: f32, tuning: &Tuning) -> f32 {
    (speed * REFERENCE_FPS).max(tuning.min_scroll_px_per_sec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_never_steps() {
        let tuning = Tuning {
            speed_interval: 0.0,
            ..Tuning::default()
        };
        let mut ramp = DifficultyRamp::new(0.0, &tuning);
        assert_eq!(ramp.poll(100.0), None);
        assert_eq!(ramp.speed(), tuning.base_speed);
    }

    #[test]
    fn test_no_step_before_interval() {
        let tuning = Tuning::default();
        let mut ramp = DifficultyRamp::new(0.0, &tuning);
        assert_eq!(ramp.poll(10.9), None);
        assert_eq!(ramp.speed(), tuning.base_speed);
    }

    #[test]
    fn test_step_on_cadence() {
        let tuning = Tuning::default();
        let mut ramp = DifficultyRamp::new(0.0, &tuning);
        let speed = ramp.poll(11.0).unwrap();
        assert!((speed - (tuning.base_speed + tuning.speed_step)).abs() < 1e-5);
        assert_eq!(ramp.next_step_at(), 22.0);
        assert_eq!(ramp.poll(21.0), None);
    }

    #[test]
    fn test_overdue_steps_all_apply() {
        let tuning = Tuning::default();
        let mut ramp = DifficultyRamp::new(0.0, &tuning);
        let speed = ramp.poll(33.5).unwrap();
        assert!((speed - (tuning.base_speed + 3.0 * tuning.speed_step)).abs() < 1e-4);
    }

    #[test]
    fn test_clamped_to_cap() {
        let tuning = Tuning::default();
        let mut ramp = DifficultyRamp::new(0.0, &tuning);
        ramp.poll(10_000.0);
        assert_eq!(ramp.speed(), tuning.speed_cap);
        assert!(ramp.at_cap());
        assert_eq!(ramp.poll(20_000.0), None);
    }

    #[test]
    fn test_restart_replaces_schedule() {
        let tuning = Tuning::default();
        let mut ramp = DifficultyRamp::new(0.0, &tuning);
        ramp.poll(50.0);
        let ramp = DifficultyRamp::new(50.0, &tuning);
        assert_eq!(ramp.speed(), tuning.base_speed);
        assert_eq!(ramp.next_step_at(), 61.0);
    }

    #[test]
    fn test_px_per_sec() {
        let tuning = Tuning::default();
        assert_eq!(speed_px_per_sec(4.0, &tuning), 240.0);
        assert_eq!(speed_px_per_sec(0.1, &tuning), tuning.min_scroll_px_per_sec);
    }
}
