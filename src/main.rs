//! Snake Levels entry point
//!
//! Loads settings, opens the terminal frontend and plays one run.

use env_logger::Env;

use snake_levels::audio::AudioManager;
use snake_levels::platform::TerminalPlatform;
use snake_levels::{Progression, RunExit, Settings};

fn run(settings: Settings) -> std::io::Result<RunExit> {
    let audio = AudioManager::from_settings(&settings);
    // The platform owns the terminal guard; dropping it restores the screen
    let mut platform = TerminalPlatform::new(settings.effective_tick_rate(), audio)?;
    Progression::new(settings).run(&mut platform)
}

fn main() {
    // Logs share the terminal with the game, so keep the default quiet
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    log::info!("Snake Levels starting...");

    let settings = Settings::load();
    match run(settings) {
        Ok(exit) => log::info!("Goodbye ({:?})", exit),
        Err(e) => {
            log::error!("Terminal error: {}", e);
            std::process::exit(1);
        }
    }
}
