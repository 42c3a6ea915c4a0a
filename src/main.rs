use std::env;
use std::fs;
use std::path::Path;

use dotenv::dotenv;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use plumbot::replay::{self, ReplayEmulator};
use plumbot::{Agent, BotConfig, DefaultObserver, Game};

fn get_env_var_i32(key: &str) -> Option<i32> {
    env::var(key).ok().and_then(|val| val.parse::<i32>().ok())
}

fn get_env_var_u32(key: &str) -> Option<u32> {
    env::var(key).ok().and_then(|val| val.parse::<u32>().ok())
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plumbot=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn config_from_env() -> BotConfig {
    let mut config = BotConfig::default();
    if let Some(freq) = get_env_var_u32("PLUMBOT_ACT_FREQUENCY") {
        config.act_frequency = freq;
    }
    if let Some(max) = get_env_var_u32("PLUMBOT_MAX_CYCLES") {
        config.max_cycles = max;
    }
    if let Some(goal) = get_env_var_i32("PLUMBOT_GOAL_COLUMN") {
        config.nav.goal_col = goal;
    }
    if let Some(headroom) = get_env_var_i32("PLUMBOT_HEADROOM") {
        config.nav.headroom = headroom;
    }
    config.results_folder = env::var("PLUMBOT_RESULTS_FOLDER").ok();
    config
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let config = config_from_env();

    let frames = match env::var("PLUMBOT_REPLAY").ok() {
        Some(path) => {
            tracing::info!("replaying {}", path);
            replay::load_frames(&path)?
        }
        None => {
            tracing::info!("no replay given, running the built-in demo level");
            replay::demo_frames()
        }
    };

    let emulator = ReplayEmulator::new(frames, config.flags)?;
    let agent = Agent::new(config.clone());
    let mut game = Game::new(emulator, agent, DefaultObserver);
    let stats = game.run();

    if let Some(folder) = &config.results_folder {
        let folder = Path::new(folder);
        if !folder.exists() {
            fs::create_dir_all(folder)?;
        }
        let path = folder.join("results.json");
        let file = fs::File::create(&path)?;
        serde_json::to_writer(file, &stats)?;
        tracing::info!("results written to {}", path.display());
    }

    Ok(())
}
