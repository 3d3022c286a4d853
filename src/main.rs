//! Car Clash headless runner
//!
//! Plays a demo match between two autopilots at 60 Hz and prints the final
//! snapshot as JSON. Pass a tuning JSON path as the first argument to
//! override the defaults; set `RUST_LOG=info` to follow the match.

use car_clash::demo::DemoPilot;
use car_clash::sim::{MatchEvent, MatchState, step};
use car_clash::{Tuning, snapshot};

const VIEWPORT: (f32, f32) = (1280.0, 720.0);
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Safety cap: ten simulated minutes
const MAX_FRAMES: u32 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Car Clash (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::from_json_file(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut state = match MatchState::with_tuning(VIEWPORT.0, VIEWPORT.1, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("Demo seed: {}", seed);
    let mut pilots = [DemoPilot::new(0, seed), DemoPilot::new(1, seed.wrapping_add(1))];

    state.start();
    let mut now = 0.0;
    for _ in 0..MAX_FRAMES {
        let mut input = pilots[0].actions(&state);
        input.extend(&pilots[1].actions(&state));
        now += FRAME_MS;
        step(&mut state, &input, now);

        for event in &state.events {
            match event {
                MatchEvent::HeadHit { .. } | MatchEvent::MatchWon { .. } | MatchEvent::SuddenDeath => {
                    log::info!("[{:>8.0} ms] {:?}", now, event)
                }
                _ => log::trace!("[{:>8.0} ms] {:?}", now, event),
            }
        }
        if !state.is_running() {
            break;
        }
    }

    match serde_json::to_string_pretty(&snapshot(&state)) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives the core directly; nothing to do here
}
