mod autopilot;

use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use engine::config::load_yaml_config;
use engine::{log, logger, EngineSettings, GameMode, GameRng, RoundPhase, SimulationKernel};

#[derive(Parser)]
#[command(name = "snake_arcade_runner")]
struct Args {
    /// Run a two-player round (both snakes autopiloted).
    #[arg(long)]
    two_player: bool,

    /// Seed for reproducible rounds; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Engine settings file; defaults apply when it does not exist.
    #[arg(long, default_value = "engine_settings.yaml")]
    config: PathBuf,

    /// How often the driver polls the kernel.
    #[arg(long, default_value_t = 8)]
    poll_interval_ms: u64,

    /// Safety stop for unattended runs.
    #[arg(long, default_value_t = 100_000)]
    max_polls: u64,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let settings: EngineSettings = load_yaml_config(&args.config)?;
    let seed = args.seed.unwrap_or_else(|| GameRng::from_random().seed());
    let mode = if args.two_player {
        GameMode::TwoPlayer
    } else {
        GameMode::SinglePlayer
    };

    let mut kernel = SimulationKernel::new(settings, seed)?;
    kernel.reset_round(mode);
    log!("Runner started: {:?}, seed {}", mode, seed);

    // Steering randomness is kept apart from the kernel's seed so the
    // round itself stays reproducible.
    let mut steering_rng = GameRng::new(seed.rotate_left(17));

    let mut poll_timer = tokio::time::interval(Duration::from_millis(args.poll_interval_ms));
    let mut last_poll = Instant::now();

    for _ in 0..args.max_polls {
        poll_timer.tick().await;
        let now = Instant::now();
        let elapsed = now - last_poll;
        last_poll = now;

        let state = kernel.snapshot();
        for snake in &state.snakes {
            if let Some(direction) = autopilot::choose_direction(&state, snake.slot, &mut steering_rng)
            {
                kernel.submit_intent(snake.slot, direction)?;
            }
        }

        let report = kernel.tick(elapsed)?;
        for event in &report.events {
            log!("{:?}", event);
        }

        if let RoundPhase::RoundOver(outcome) = kernel.phase() {
            for snake in &report.state.snakes {
                log!("[{}] final score: {}", snake.slot, snake.score);
            }
            if let Some(chaser) = &report.state.chaser {
                log!("Chaser score: {}", chaser.score);
            }
            log!("Outcome: {:?}", outcome);
            return Ok(());
        }
    }

    log!("Poll budget exhausted, stopping mid-round");
    Ok(())
}
