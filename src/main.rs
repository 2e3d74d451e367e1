//! Ember Breakout entry point
//!
//! Runs the game headless: a scripted driver feeds key events and a fixed
//! frame time, and the recorded draw calls are summarised in the log.
//!
//! Usage: `ember-breakout [settings.json] [frames]`

use ember_breakout::renderer::HeadlessBackend;
use ember_breakout::sim::{Game, Key};
use ember_breakout::{GameResult, Settings};

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 600;

/// Key pressed during a given frame of the demo script
fn scripted_key(frame: u32) -> Option<Key> {
    match frame {
        30 => Some(Key::Launch),
        f if f > 30 => Some([Key::Right, Key::Up, Key::Left, Key::Down][(f / 60 % 4) as usize]),
        _ => None,
    }
}

fn run(settings: Settings, frames: u32) -> GameResult<()> {
    let mut game: Game<HeadlessBackend> = Game::new(settings, HeadlessBackend::new())?;
    game.init()?;

    let mut particles_drawn = 0usize;
    let mut sprites_drawn = 0usize;
    for frame in 0..frames {
        game.keys.clear();
        if let Some(key) = scripted_key(frame) {
            game.keys.press(key);
        }

        game.frame(FRAME_DT)?;

        let backend = game.backend_mut();
        particles_drawn += backend.particles_drawn();
        sprites_drawn += backend.sprites.len();
        backend.clear_draws();

        if frame % 120 == 0 {
            if let Some(ball) = game.ball() {
                log::debug!(
                    "frame {frame}: ball at ({:.1}, {:.1}) stuck={}",
                    ball.position.x,
                    ball.position.y,
                    ball.stuck
                );
            }
        }
    }

    let live = game.trails().map(|t| t.live_count()).unwrap_or(0);
    log::info!(
        "Ran {frames} frames: {sprites_drawn} sprites, {particles_drawn} particles drawn, {live} live at exit"
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ember Breakout (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    if let Err(e) = run(settings, frames) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web
}
