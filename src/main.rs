//! Cat Runner headless runner
//!
//! Plays rounds with the demo autopilot on a simulated clock, then optionally
//! submits the final score and prints the leaderboard.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cat_runner::api::{self, SaveStatus, ScoreClient};
use cat_runner::leaderboard::short_wallet;
use cat_runner::sim::{
    Autopilot, Clock, GameEvent, GamePhase, InputSource, ManualClock, PilotAction,
};
use cat_runner::{DeviceKind, Game, Tuning};

#[derive(Debug, Parser)]
#[command(name = "cat-runner", version, about = "Headless Cat Runner with an autopilot")]
struct Args {
    /// RNG seed for obstacle spawning
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// JSON tuning file
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Use the touch-device preset
    #[arg(long)]
    touch: bool,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Stop after this many simulated seconds even if the round is still running
    #[arg(long, default_value_t = 300.0)]
    max_seconds: f64,

    /// Score service base URL
    #[arg(long)]
    server: Option<String>,

    /// Wallet to submit the final score for
    #[arg(long)]
    wallet: Option<String>,

    /// Fetch and print the leaderboard after the round
    #[arg(long)]
    leaderboard: bool,
}

fn load_tuning(args: &Args) -> Result<Tuning, cat_runner::TuningError> {
    let device = if args.touch {
        DeviceKind::Touch
    } else {
        DeviceKind::Desktop
    };
    match &args.tuning {
        Some(path) => {
            let mut tuning = Tuning::load(path)?;
            if args.touch {
                tuning.apply_device(device);
            }
            tuning.validate()?;
            Ok(tuning)
        }
        None => Ok(Tuning::for_device(device)),
    }
}

/// Play one round to its score; returns the final score if the round ended
fn play_round(game: &mut Game<ManualClock>, fps: f64, max_seconds: f64) -> Option<u64> {
    let frame_time = 1.0 / fps;
    let mut pilot = Autopilot::default();
    let mut elapsed = 0.0;

    game.start_round();
    while elapsed < max_seconds {
        let now = game.clock().now();
        match pilot.decide(game.state(), now) {
            Some(PilotAction::Press) => {
                game.press_start(InputSource::Keyboard);
            }
            Some(PilotAction::Release) => {
                game.press_end(InputSource::Keyboard);
            }
            None => {}
        }

        let report = game.frame();
        for event in &report.events {
            match event {
                GameEvent::ObstacleHit { id, lives_left } => {
                    log::info!("Hit obstacle {} ({} lives left)", id, lives_left);
                }
                GameEvent::SpeedIncreased { speed } => {
                    log::debug!("Speed up to {:.2}", speed);
                }
                GameEvent::ScoreReady { score, .. } => return Some(*score),
                _ => {}
            }
        }

        game.clock().advance(frame_time);
        elapsed += frame_time;
    }

    log::info!("Stopped after {:.0}s with the round still running", max_seconds);
    None
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if !(args.fps.is_finite() && args.fps > 0.0) {
        eprintln!("--fps must be a positive number");
        return ExitCode::FAILURE;
    }

    let tuning = match load_tuning(&args) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Invalid tuning: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Cat Runner (headless) starting, seed {}", args.seed);

    let mut game = match Game::new(ManualClock::new(0.0), args.seed, tuning) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Invalid tuning: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let final_score = play_round(&mut game, args.fps, args.max_seconds);
    let state = game.state();
    let score = final_score.unwrap_or(state.round.score);
    println!(
        "Round {}: score {} ({}), speed {:.2}",
        state.round.round_id,
        score,
        if state.phase() == GamePhase::GameOver {
            "game over"
        } else {
            "still running"
        },
        state.difficulty.speed()
    );

    let Some(server) = args.server.as_deref() else {
        return ExitCode::SUCCESS;
    };
    let client = match ScoreClient::new(server) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Score service unavailable: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if final_score.is_some() {
        let status = api::block_on(api::save_result(&client, args.wallet.as_deref(), score))
            .unwrap_or(SaveStatus::Failed);
        println!("{}", status.message());
    }

    if args.leaderboard {
        match api::block_on(client.fetch_leaderboard()) {
            Ok(Ok(board)) => {
                if let Some(wallet) = args.wallet.as_deref() {
                    match board.rank_of(wallet) {
                        Some(rank) => println!("{} is ranked #{}", short_wallet(wallet), rank),
                        None => println!(
                            "{} would rank #{}",
                            short_wallet(wallet),
                            board.potential_rank(score)
                        ),
                    }
                }
                for line in board.render_lines() {
                    println!("{}", line);
                }
            }
            Ok(Err(e)) | Err(e) => {
                eprintln!("Failed to load leaderboard: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
