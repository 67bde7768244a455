//! Input arbiter
//!
//! Turns press/release pairs into jump strengths. Each source (keyboard,
//! pointer, touch) tracks its own press so a repeated press-start from one
//! source is ignored while other sources can still press independently.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Where a press came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSource {
    Keyboard,
    Pointer,
    Touch,
}

impl InputSource {
    pub const ALL: [InputSource; 3] =
        [InputSource::Keyboard, InputSource::Pointer, InputSource::Touch];

    fn index(self) -> usize {
        match self {
            InputSource::Keyboard => 0,
            InputSource::Pointer => 1,
            InputSource::Touch => 2,
        }
    }
}

/// Map a press duration (ms) to a jump strength.
///
/// Linear from `min_strength` at 0 ms to `max_strength` at `long_press_ms`,
/// flat afterwards.
pub fn strength_for_duration(duration_ms: f64, tuning: &Tuning) -> f32 {
    let t = (duration_ms.max(0.0).min(tuning.long_press_ms) / tuning.long_press_ms) as f32;
    // Lerp form so both ends land exactly on the configured strengths
    let strength = tuning.min_strength * (1.0 - t) + tuning.max_strength * t;
    if strength.is_finite() {
        strength.min(tuning.max_strength).max(tuning.min_strength)
    } else {
        tuning.min_strength
    }
}

/// Per-source press tracking
#[derive(Debug, Clone, Default)]
pub struct InputArbiter {
    /// Press start time (seconds) per source, `None` when released
    pressed_at: [Option<f64>; 3],
}

impl InputArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns false if this source is already pressed.
    pub fn press_start(&mut self, source: InputSource, now: f64) -> bool {
        let slot = &mut self.pressed_at[source.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(now);
        true
    }

    /// Release a press and return its jump strength.
    ///
    /// `None` when this source had no active press.
    pub fn press_end(&mut self, source: InputSource, now: f64, tuning: &Tuning) -> Option<f32> {
        let started = self.pressed_at[source.index()].take()?;
        let duration_ms = (now - started).max(0.0) * 1000.0;
        Some(strength_for_duration(duration_ms, tuning))
    }

    pub fn is_pressed(&self, source: InputSource) -> bool {
        self.pressed_at[source.index()].is_some()
    }

    /// Forget every active press (round restart)
    pub fn reset(&mut self) {
        self.pressed_at = [None; 3];
    }
}
