//! Per-frame simulation tick
//!
//! Advances the game by one frame in a fixed order: physics, movement,
//! collision, then spawning and the difficulty ramp. Obstacles spawned in a
//! tick are first collision-checked on the next one.

use rand::Rng;

use super::collision::{is_colliding, obstacle_hitbox, player_hitbox};
use super::difficulty::speed_px_per_sec;
use super::error::SimError;
use super::event::GameEvent;
use super::physics::{self, BufferedOutcome};
use super::round::{HitOutcome, RoundTransition};
use super::spawner;
use super::state::{Cloud, GamePhase, GameState, Obstacle};

/// Everything one tick produced
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// Round the events belong to
    pub round_id: u64,
    pub events: Vec<GameEvent>,
    /// Faults repaired during the tick; the tick still ran to completion
    pub faults: Vec<SimError>,
}

impl TickReport {
    fn new(round_id: u64) -> Self {
        Self {
            round_id,
            ..Default::default()
        }
    }

    fn record<T>(&mut self, step: &'static str, result: Result<T, SimError>) {
        if let Err(fault) = result {
            log::warn!("{} step fault: {}", step, fault);
            self.faults.push(fault);
        }
    }
}

/// Advance the game to clock time `now`, `dt` seconds after the previous frame
pub fn tick(state: &mut GameState, now: f64, dt: f32) -> TickReport {
    let mut report = TickReport::new(state.round.round_id);
    state.time = now;

    match state.round.phase {
        GamePhase::Idle => return report,
        GamePhase::GameOver => {
            advance_round_timers(state, now, &mut report.events);
            return report;
        }
        GamePhase::HitStun => {
            // The field is frozen, but wall-clock difficulty keeps ramping
            advance_round_timers(state, now, &mut report.events);
            step_difficulty(state, now, &mut report.events);
            return report;
        }
        GamePhase::Running => {}
    }

    let result = step_physics(state, now, dt, &mut report.events);
    report.record("physics", result);

    let result = advance_obstacles(state, dt, &mut report.events);
    report.record("movement", result);
    advance_clouds(state, dt);

    resolve_collisions(state, now, &mut report.events);

    if state.round.phase == GamePhase::Running {
        let result = step_spawner(state, now, &mut report.events);
        report.record("spawner", result);
    }
    if state.round.phase != GamePhase::GameOver {
        step_difficulty(state, now, &mut report.events);
    }

    report
}

fn step_physics(
    state: &mut GameState,
    now: f64,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> Result<(), SimError> {
    let Some(landing) = physics::integrate(&mut state.player, dt, now, &state.tuning)? else {
        return Ok(());
    };
    events.push(GameEvent::Landed);
    match landing.buffered {
        BufferedOutcome::Consumed { strength, velocity } => {
            events.push(GameEvent::JumpStarted {
                strength,
                velocity,
                buffered: true,
            });
        }
        BufferedOutcome::Expired => events.push(GameEvent::BufferedJumpExpired),
        BufferedOutcome::None => {}
    }
    Ok(())
}

/// Scroll obstacles left. Any that leave the field score a point and are removed.
pub fn advance_obstacles(
    state: &mut GameState,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> Result<(), SimError> {
    let px_per_sec = speed_px_per_sec(state.difficulty.speed(), &state.tuning);
    let exit_x = -state.tuning.offfield_margin;
    let field_width = state.tuning.field_width;
    let round = &mut state.round;
    let mut fault = None;

    state.obstacles.retain_mut(|obstacle| {
        if !obstacle.x.is_finite() {
            obstacle.x = field_width;
            fault = Some(SimError::NonFinite {
                what: "obstacle position",
            });
        }
        obstacle.x -= px_per_sec * dt;
        if obstacle.x < exit_x {
            let score = round.award_pass();
            events.push(GameEvent::ObstaclePassed {
                id: obstacle.id,
                score,
            });
            false
        } else {
            true
        }
    });

    match fault {
        Some(fault) => Err(fault),
        None => Ok(()),
    }
}

fn advance_clouds(state: &mut GameState, dt: f32) {
    let speed = state.tuning.cloud_speed;
    let exit_x = -state.tuning.cloud_offfield_margin;
    let field_width = state.tuning.field_width;
    state.clouds.retain_mut(|cloud| {
        if !cloud.x.is_finite() {
            cloud.x = field_width;
        }
        cloud.x -= speed * dt;
        cloud.x >= exit_x
    });
}

/// Test every live obstacle against the player once.
///
/// A hit removes that obstacle and costs a life. Losing a life clears the
/// field, so the first hit ends the pass.
fn resolve_collisions(
    state: &mut GameState,
    now: f64,
    events: &mut Vec<GameEvent>,
) -> Option<HitOutcome> {
    let player_box = player_hitbox(&state.player, &state.tuning);

    let index = state
        .obstacles
        .iter()
        .position(|o| is_colliding(&player_box, &obstacle_hitbox(o, &state.tuning)))?;
    let obstacle = state.obstacles.remove(index);

    let outcome = state.round.register_hit(now, &state.tuning);
    match outcome {
        HitOutcome::Stunned { lives_left } => {
            events.push(GameEvent::ObstacleHit {
                id: obstacle.id,
                lives_left,
            });
            state.clear_field();
        }
        HitOutcome::Defeated => {
            events.push(GameEvent::ObstacleHit {
                id: obstacle.id,
                lives_left: 0,
            });
            events.push(GameEvent::GameOver {
                score: state.round.score,
            });
            state.player.buffered = None;
            state.clear_field();
        }
        HitOutcome::Ignored => {}
    }
    Some(outcome)
}

fn step_spawner(
    state: &mut GameState,
    now: f64,
    events: &mut Vec<GameEvent>,
) -> Result<(), SimError> {
    let mut result = Ok(());

    if state.schedule.obstacle_due(now) {
        let kind = spawner::choose_kind(&mut state.rng);
        let elevation = spawner::choose_elevation(&mut state.rng, kind, &state.tuning.elevation);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind,
            x: state.tuning.field_width,
            elevation,
            created_at: now,
        });
        events.push(GameEvent::ObstacleSpawned { id, kind });

        let speed = state.difficulty.speed();
        let drawn = spawner::next_obstacle_interval(&mut state.rng, speed, &state.tuning);
        let interval = spawner::validate_interval(drawn).unwrap_or_else(|fault| {
            result = Err(fault);
            spawner::min_interval(speed, &state.tuning)
        });
        state.schedule.next_obstacle_at = now + interval;
        log::debug!("Spawned {:?} #{}, next in {:.2}s", kind, id, interval);
    }

    if state.schedule.cloud_due(now) {
        let id = state.next_entity_id();
        let height_fraction = 0.02 + state.rng.random::<f32>() * 0.08;
        state.clouds.push(Cloud {
            id,
            x: state.tuning.field_width,
            height_fraction,
        });
        let interval = spawner::next_cloud_interval(&mut state.rng, &state.tuning);
        state.schedule.next_cloud_at = now + interval;
    }

    result
}

fn step_difficulty(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    if let Some(speed) = state.difficulty.poll(now) {
        log::debug!("Speed increased to {}", speed);
        events.push(GameEvent::SpeedIncreased { speed });
    }
}

fn advance_round_timers(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    for transition in state.round.advance(now, &state.tuning) {
        match transition {
            RoundTransition::BlinkToggled { visible } => {
                events.push(GameEvent::BlinkToggled { visible });
            }
            RoundTransition::Recovered => {
                state.clear_field();
                state.reschedule(now);
                events.push(GameEvent::Recovered);
            }
            RoundTransition::ScoreReady { score } => {
                events.push(GameEvent::ScoreReady {
                    round_id: state.round.round_id,
                    score,
                });
            }
        }
    }
}
