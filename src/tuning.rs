//! Gameplay tuning
//!
//! Every balance constant the simulation reads. Loaded from JSON so a host can
//! override any subset; missing fields fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::ObstacleKind;

/// Errors raised while loading or validating tuning
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Input device class. Touch devices get a slower ramp and wider obstacle gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeviceKind {
    #[default]
    Desktop,
    Touch,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Desktop => "desktop",
            DeviceKind::Touch => "touch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" | "pc" => Some(DeviceKind::Desktop),
            "touch" | "mobile" => Some(DeviceKind::Touch),
            _ => None,
        }
    }
}

/// Hitbox as an inset from each edge of an entity's visual bounds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HitboxInset {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Visual size of an entity plus its hitbox sub-region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityGeometry {
    pub width: f32,
    pub height: f32,
    pub hitbox: HitboxInset,
}

/// How obstacles are placed vertically
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ElevationPolicy {
    /// Every obstacle sits on the ground
    #[default]
    GroundOnly,
    /// Obstacles of `kind` are lifted by `U(0, max_elevation)` with probability `chance`
    Randomized {
        kind: ObstacleKind,
        chance: f64,
        max_elevation: f32,
    },
}

/// Game balance and layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub device: DeviceKind,

    // === Jump ===
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Apex height of a strength 1.0 jump (px)
    pub base_jump_height: f32,
    pub min_strength: f32,
    pub max_strength: f32,
    /// Press duration that yields `max_strength` (ms)
    pub long_press_ms: f64,
    pub max_jumps: u32,
    pub coyote_time: f64,
    pub jump_buffer_time: f64,

    // === Difficulty ===
    /// Scroll speed at round start (px per reference frame)
    pub base_speed: f32,
    pub speed_step: f32,
    pub speed_cap: f32,
    /// Seconds between ramp steps
    pub speed_interval: f64,
    pub min_scroll_px_per_sec: f32,

    // === Spawning ===
    pub min_gap_px_desktop: f32,
    pub min_gap_px_touch: f32,
    pub gap_growth_threshold: f32,
    pub gap_growth_px: f32,
    pub spawn_floor: f64,
    pub spawn_mean_factor: f64,
    pub spawn_pad: f64,
    pub spawn_jitter: f64,
    pub elevation: ElevationPolicy,
    pub cloud_mean: f64,
    pub cloud_floor: f64,
    pub cloud_speed: f32,
    pub cloud_offfield_margin: f32,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Obstacles further left than `-offfield_margin` have left the field
    pub offfield_margin: f32,
    pub player_x: f32,
    pub player: EntityGeometry,
    pub crystal: EntityGeometry,
    pub fire: EntityGeometry,

    // === Round ===
    pub start_lives: u8,
    pub blink_toggles: u32,
    pub blink_interval: f64,
    pub game_over_delay: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            device: DeviceKind::Desktop,

            gravity: GRAVITY,
            base_jump_height: BASE_JUMP_HEIGHT,
            min_strength: MIN_STRENGTH,
            max_strength: MAX_STRENGTH,
            long_press_ms: LONG_PRESS_MS,
            max_jumps: MAX_JUMPS,
            coyote_time: COYOTE_TIME,
            jump_buffer_time: JUMP_BUFFER_TIME,

            base_speed: BASE_SPEED,
            speed_step: SPEED_STEP,
            speed_cap: SPEED_CAP,
            speed_interval: SPEED_INTERVAL,
            min_scroll_px_per_sec: MIN_SCROLL_PX_PER_SEC,

            min_gap_px_desktop: MIN_GAP_PX_DESKTOP,
            min_gap_px_touch: MIN_GAP_PX_TOUCH,
            gap_growth_threshold: GAP_GROWTH_THRESHOLD,
            gap_growth_px: GAP_GROWTH_PX,
            spawn_floor: SPAWN_FLOOR,
            spawn_mean_factor: SPAWN_MEAN_FACTOR,
            spawn_pad: SPAWN_PAD,
            spawn_jitter: SPAWN_JITTER,
            elevation: ElevationPolicy::GroundOnly,
            cloud_mean: CLOUD_MEAN,
            cloud_floor: CLOUD_FLOOR,
            cloud_speed: CLOUD_SPEED,
            cloud_offfield_margin: CLOUD_OFFFIELD_MARGIN,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            offfield_margin: OFFFIELD_MARGIN,
            player_x: PLAYER_X,
            player: EntityGeometry {
                width: 90.0,
                height: 90.0,
                hitbox: HitboxInset {
                    left: 22.0,
                    right: 22.0,
                    top: 16.0,
                    bottom: 8.0,
                },
            },
            crystal: EntityGeometry {
                width: 56.0,
                height: 64.0,
                hitbox: HitboxInset {
                    left: 10.0,
                    right: 10.0,
                    top: 14.0,
                    bottom: 0.0,
                },
            },
            fire: EntityGeometry {
                width: 52.0,
                height: 72.0,
                hitbox: HitboxInset {
                    left: 12.0,
                    right: 12.0,
                    top: 20.0,
                    bottom: 0.0,
                },
            },

            start_lives: START_LIVES,
            blink_toggles: BLINK_TOGGLES,
            blink_interval: BLINK_INTERVAL,
            game_over_delay: GAME_OVER_DELAY,
        }
    }
}

impl Tuning {
    /// Defaults adjusted for a device class
    pub fn for_device(device: DeviceKind) -> Self {
        let mut tuning = Self::default();
        tuning.apply_device(device);
        tuning
    }

    /// Apply the device preset. Touch play starts slower and ramps more gently.
    pub fn apply_device(&mut self, device: DeviceKind) {
        self.device = device;
        if device == DeviceKind::Touch {
            self.base_speed = (self.base_speed * 0.75).max(2.6);
            self.speed_step = (self.speed_step * 0.55).max(0.12);
        }
    }

    /// Baseline minimum gap between obstacles for the configured device
    pub fn min_gap_base(&self) -> f32 {
        match self.device {
            DeviceKind::Desktop => self.min_gap_px_desktop,
            DeviceKind::Touch => self.min_gap_px_touch,
        }
    }

    /// Geometry for an obstacle kind
    pub fn geometry(&self, kind: ObstacleKind) -> &EntityGeometry {
        match kind {
            ObstacleKind::Crystal => &self.crystal,
            ObstacleKind::Fire => &self.fire,
        }
    }

    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }

        positive("gravity", self.gravity as f64)?;
        positive("base_jump_height", self.base_jump_height as f64)?;
        positive("min_strength", self.min_strength as f64)?;
        positive("long_press_ms", self.long_press_ms)?;
        positive("base_speed", self.base_speed as f64)?;
        positive("speed_interval", self.speed_interval)?;
        positive("spawn_floor", self.spawn_floor)?;
        positive("spawn_mean_factor", self.spawn_mean_factor)?;
        positive("cloud_mean", self.cloud_mean)?;
        positive("field_width", self.field_width as f64)?;
        positive("blink_interval", self.blink_interval)?;

        if self.max_strength < self.min_strength {
            return Err(TuningError::Invalid {
                field: "max_strength",
                reason: format!(
                    "{} is below min_strength {}",
                    self.max_strength, self.min_strength
                ),
            });
        }
        if self.speed_cap < self.base_speed {
            return Err(TuningError::Invalid {
                field: "speed_cap",
                reason: format!("{} is below base_speed {}", self.speed_cap, self.base_speed),
            });
        }
        if self.max_jumps == 0 {
            return Err(TuningError::Invalid {
                field: "max_jumps",
                reason: "at least one jump is required".to_string(),
            });
        }
        if self.start_lives == 0 {
            return Err(TuningError::Invalid {
                field: "start_lives",
                reason: "a round needs at least one life".to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.spawn_jitter) {
            return Err(TuningError::Invalid {
                field: "spawn_jitter",
                reason: format!("{} is outside [0, 1)", self.spawn_jitter),
            });
        }
        match self.elevation {
            ElevationPolicy::Randomized { chance, .. } if !(0.0..=1.0).contains(&chance) => {
                Err(TuningError::Invalid {
                    field: "elevation.chance",
                    reason: format!("{chance} is not a probability"),
                })
            }
            _ => Ok(()),
        }
    }
}
