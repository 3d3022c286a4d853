//! Read-only projection of a match for the renderer and HUD
//!
//! Building a snapshot never touches the match, so calling it twice in a row
//! yields the same value.

use glam::Vec2;
use serde::Serialize;

use crate::format_clock;
use crate::sim::{MatchPhase, MatchState, Platform};

/// Horizontal spacing of terrain sample points (px)
const TERRAIN_SAMPLE_STEP: f32 = 8.0;

/// One car as the renderer needs it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarView {
    pub label: String,
    pub pos: Vec2,
    pub angle: f32,
    pub half_size: f32,
    pub color: u32,
    /// Vulnerable head circle
    pub head: Vec2,
    pub head_radius: f32,
}

/// HUD fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudState {
    pub phase: MatchPhase,
    /// Round clock as `mm:ss`
    pub time_text: String,
    pub stars: [u8; 2],
    pub win_stars: u8,
    pub scores: [u32; 2],
    /// Transient scoring message
    pub message: Option<String>,
    pub winner: Option<String>,
    /// Victory overlay text
    pub winner_banner: Option<String>,
    /// Offer the reset button
    pub can_reset: bool,
    pub slow_motion: bool,
    pub sudden_death: bool,
}

/// Everything the presentation layer draws for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub width: f32,
    pub height: f32,
    pub cars: Vec<CarView>,
    pub platforms: Vec<Platform>,
    /// Ground polyline, left to right
    pub terrain: Vec<Vec2>,
    pub hud: HudState,
}

/// Project the match into a render/HUD snapshot
pub fn snapshot(state: &MatchState) -> RenderState {
    let tuning = &state.tuning;
    let cars = state
        .cars
        .iter()
        .map(|car| CarView {
            label: car.label.clone(),
            pos: car.pos,
            angle: car.angle,
            half_size: car.half_size(),
            color: car.profile.color,
            head: car.head_center(tuning),
            head_radius: car.head_radius(tuning),
        })
        .collect();

    let winner = state.winner_label().map(str::to_owned);
    let hud = HudState {
        phase: state.phase,
        time_text: format_clock(state.time_left),
        stars: [state.cars[0].stars, state.cars[1].stars],
        win_stars: tuning.win_stars,
        scores: [state.cars[0].score, state.cars[1].score],
        message: state.last_score.as_ref().map(|m| m.text.clone()),
        winner_banner: winner.as_ref().map(|label| format!("{label} WINS!")),
        winner,
        can_reset: state.phase == MatchPhase::Ended,
        slow_motion: matches!(state.phase, MatchPhase::RoundTransition { .. }),
        sudden_death: state.sudden_death,
    };

    RenderState {
        width: state.terrain.width,
        height: state.terrain.height,
        cars,
        platforms: state.platforms.clone(),
        terrain: state.terrain.sample(TERRAIN_SAMPLE_STEP),
        hud,
    }
}
