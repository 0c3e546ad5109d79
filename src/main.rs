use std::path::Path;

use tracing::{error, info, warn};

use wizard_vs_ogres::ai::autopilot::Autopilot;
use wizard_vs_ogres::config::SimConfig;
use wizard_vs_ogres::game::profile;
use wizard_vs_ogres::game::state::Game;
use wizard_vs_ogres::protocol::{encode_snapshot, Screen};

fn main() {
    tracing_subscriber::fmt::init();

    let config = match SimConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Bad configuration: {}", e);
            std::process::exit(2);
        }
    };
    info!(
        "Headless run: {} frames, {:?} spawning, profile at {}",
        config.headless_frames,
        config.spawn_policy,
        config.profile_path.display()
    );

    let profile_path = config.profile_path.clone();
    let frames = config.headless_frames;
    let mut game = Game::new(config, profile::load(&profile_path));
    let mut pilot = Autopilot::new();

    let mut runs = 0u32;
    let mut best_wave = 0u32;
    let mut last_screen = game.screen();
    for _ in 0..frames {
        let input = pilot.decide(&game.snapshot());
        let screen = game.tick(&input);
        if screen == Screen::Playing && last_screen == Screen::Menu {
            runs += 1;
        }
        best_wave = best_wave.max(game.run().wave);
        if screen == Screen::GameOver && last_screen != Screen::GameOver {
            save_profile(&profile_path, &game);
        }
        last_screen = screen;
    }

    match encode_snapshot(&game.snapshot()) {
        Ok(bytes) => info!("Final snapshot: {} bytes", bytes.len()),
        Err(e) => error!("Failed to encode snapshot: {}", e),
    }

    save_profile(&profile_path, &game);

    info!(
        "Done after {} ticks: {} runs, best wave {}, {} coins banked",
        game.tick_count(),
        runs,
        best_wave,
        game.profile().coins
    );
}

fn save_profile(path: &Path, game: &Game) {
    if let Err(e) = profile::save(path, game.profile()) {
        warn!("Could not save profile to {}: {}", path.display(), e);
    }
}
