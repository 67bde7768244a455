//! Vertical physics integrator
//!
//! The only code that changes the player's height and velocity. Jumps start
//! here too, either straight from a request or from a buffered request
//! consumed at landing.

use super::error::SimError;
use super::state::{JumpRequest, Player};
use crate::tuning::Tuning;

/// What happened to a jump request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpDecision {
    /// The jump started with this upward velocity
    Started { velocity: f32 },
    /// No jump was available; the request waits for the next landing
    Buffered,
}

/// Fate of the buffered request at a landing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BufferedOutcome {
    None,
    Consumed { strength: f32, velocity: f32 },
    Expired,
}

/// Ground contact detected during integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    pub time: f64,
    pub buffered: BufferedOutcome,
}

/// Takeoff velocity for a jump of the given strength
#[inline]
pub fn initial_velocity(strength: f32, tuning: &Tuning) -> f32 {
    (2.0 * tuning.gravity * tuning.base_jump_height * strength).sqrt()
}

/// Seconds from takeoff to apex
#[inline]
pub fn time_to_apex(velocity: f32, gravity: f32) -> f32 {
    velocity / gravity
}

/// A jump is available with jumps left, or within coyote time of the last landing
pub fn can_jump_now(player: &Player, now: f64, tuning: &Tuning) -> bool {
    player.jumps_used < tuning.max_jumps || now - player.last_ground_time <= tuning.coyote_time
}

/// Launch the player. Callers check availability first.
pub fn start_jump(player: &mut Player, strength: f32, tuning: &Tuning) -> f32 {
    let strength = if strength.is_finite() {
        strength
    } else {
        tuning.min_strength
    };
    let velocity = initial_velocity(strength, tuning);
    player.vy = velocity;
    player.jumps_used += 1;
    velocity
}

/// Start a jump now if one is available, otherwise buffer it.
///
/// A new buffered request replaces any older one.
pub fn request_jump(player: &mut Player, strength: f32, now: f64, tuning: &Tuning) -> JumpDecision {
    if can_jump_now(player, now, tuning) {
        JumpDecision::Started {
            velocity: start_jump(player, strength, tuning),
        }
    } else {
        player.buffered = Some(JumpRequest {
            time: now,
            strength,
        });
        JumpDecision::Buffered
    }
}

/// Advance height and velocity by `dt` seconds.
///
/// Returns the landing if ground contact happened this step. Non-finite state
/// is reset to standing on the ground and reported as a fault.
pub fn integrate(
    player: &mut Player,
    dt: f32,
    now: f64,
    tuning: &Tuning,
) -> Result<Option<Landing>, SimError> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimError::InvalidDelta(dt));
    }
    if !player.y.is_finite() || !player.vy.is_finite() {
        player.y = 0.0;
        player.vy = 0.0;
        return Err(SimError::NonFinite {
            what: "player height or velocity",
        });
    }

    // Standing still on the ground: nothing to integrate
    if player.vy == 0.0 && player.y == 0.0 {
        return Ok(None);
    }

    player.vy -= tuning.gravity * dt;
    player.y += player.vy * dt;

    // Still rising (a jump that started with no time elapsed) is not a landing
    if player.y > 0.0 || player.vy > 0.0 {
        return Ok(None);
    }

    player.y = 0.0;
    player.vy = 0.0;
    player.jumps_used = 0;
    player.last_ground_time = now;

    let buffered = match player.buffered.take() {
        Some(request) if now - request.time <= tuning.jump_buffer_time => {
            let velocity = start_jump(player, request.strength, tuning);
            BufferedOutcome::Consumed {
                strength: request.strength,
                velocity,
            }
        }
        Some(_) => BufferedOutcome::Expired,
        None => BufferedOutcome::None,
    };

    Ok(Some(Landing {
        time: now,
        buffered,
    }))
}
