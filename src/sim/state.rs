//! Match state and core simulation types
//!
//! Everything the simulation mutates lives in one exclusively-owned
//! [`MatchState`]; there is no ambient global state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::terrain::{Platform, Terrain, build_platforms};
use super::tick::FrameClock;
use crate::consts::*;
use crate::error::{ConfigError, check_viewport};
use crate::tuning::Tuning;

/// Fraction of the viewport width where each car spawns
const SPAWN_FRACTIONS: [f32; 2] = [0.2, 0.8];

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Constructed, waiting for `start`
    Idle,
    /// Clock running, physics active
    Running,
    /// Slow-motion after a head hit; cars respawn once the wall clock passes `until_ms`
    RoundTransition { until_ms: f64 },
    /// Someone won; physics frozen
    Ended,
}

impl MatchPhase {
    /// Physics and clock advance in this phase
    pub fn is_running(&self) -> bool {
        matches!(self, MatchPhase::Running | MatchPhase::RoundTransition { .. })
    }
}

/// Immutable per-car configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarProfile {
    /// Top horizontal speed (px/frame)
    pub max_speed: f32,
    /// Half the body size (px); both cars must match
    pub half_size: f32,
    /// Display colour (0xRRGGBB), passed through to the renderer
    pub color: u32,
}

impl CarProfile {
    pub const fn red() -> Self {
        Self {
            max_speed: CAR_MAX_SPEED,
            half_size: CAR_HALF_SIZE,
            color: 0xE7_4C_3C,
        }
    }

    pub const fn blue() -> Self {
        Self {
            max_speed: CAR_MAX_SPEED,
            half_size: CAR_HALF_SIZE,
            color: 0x34_98_DB,
        }
    }
}

/// A player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub label: String,
    pub profile: CarProfile,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual tilt in radians (cosmetic only)
    pub angle: f32,
    pub on_ground: bool,
    /// Head hits landed this match
    pub stars: u8,
    /// Display points
    pub score: u32,
    /// Jump already fired for the current press
    #[serde(default)]
    pub jump_latched: bool,
}

impl Car {
    pub fn new(label: impl Into<String>, profile: CarProfile) -> Self {
        Self {
            label: label.into(),
            profile,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: 0.0,
            on_ground: false,
            stars: 0,
            score: 0,
            jump_latched: false,
        }
    }

    #[inline]
    pub fn half_size(&self) -> f32 {
        self.profile.half_size
    }

    /// Put the car at rest on the ground at its side of the arena
    pub fn respawn(&mut self, slot: usize, terrain: &Terrain) {
        let x = terrain.width * SPAWN_FRACTIONS[slot.min(1)];
        self.pos = Vec2::new(x, terrain.height_at(x) - self.half_size());
        self.vel = Vec2::ZERO;
        self.angle = 0.0;
        self.on_ground = true;
        self.jump_latched = false;
    }

    /// Centre of the vulnerable head circle (above the body centre)
    pub fn head_center(&self, tuning: &Tuning) -> Vec2 {
        self.pos - Vec2::new(0.0, self.half_size() * tuning.head_offset_fraction)
    }

    pub fn head_radius(&self, tuning: &Tuning) -> f32 {
        self.half_size() * tuning.head_radius_fraction
    }
}

/// Transient "who scored" banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMessage {
    pub text: String,
    /// Wall-clock time it was raised (ms)
    pub timestamp: f64,
}

/// Things that happened during the last step, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    Jump { car: usize },
    RampLaunch { car: usize },
    CarsCollided { impulse: f32 },
    HeadHit { attacker: usize, defender: usize },
    RoundRestarted,
    SuddenDeath,
    MatchWon { winner: usize },
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub tuning: Tuning,
    pub terrain: Terrain,
    /// Rebuilt on every viewport change
    pub platforms: Vec<Platform>,
    pub cars: [Car; 2],
    pub phase: MatchPhase,
    /// Round clock (simulated seconds)
    pub time_left: f32,
    /// Index into `cars` once the match has been won
    pub winner: Option<usize>,
    /// Clock ran out on a tie; next head hit wins
    pub sudden_death: bool,
    pub last_score: Option<ScoreMessage>,
    /// Events raised by the most recent step
    #[serde(skip)]
    pub events: Vec<MatchEvent>,
    #[serde(skip)]
    pub(crate) clock: FrameClock,
}

impl MatchState {
    /// New idle match with default tuning
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        Self::with_tuning(width, height, Tuning::default())
    }

    /// New idle match with custom tuning
    pub fn with_tuning(width: f32, height: f32, tuning: Tuning) -> Result<Self, ConfigError> {
        check_viewport(width, height)?;
        tuning.validate()?;

        let terrain = Terrain::new(width, height)?;
        let [red, blue] = tuning.cars;
        let mut state = Self {
            time_left: tuning.round_duration,
            tuning,
            terrain,
            platforms: build_platforms(width, height),
            cars: [Car::new("Player 1", red), Car::new("Player 2", blue)],
            phase: MatchPhase::Idle,
            winner: None,
            sudden_death: false,
            last_score: None,
            events: Vec::new(),
            clock: FrameClock::default(),
        };
        state.respawn_cars();

        log::info!("Match initialized for {}x{} viewport", width, height);
        Ok(state)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn winner_label(&self) -> Option<&str> {
        self.winner.map(|i| self.cars[i].label.as_str())
    }

    /// Idle → Running. A finished match is reinitialized first.
    pub fn start(&mut self) {
        match self.phase {
            MatchPhase::Idle => {}
            MatchPhase::Ended => self.reinitialize(),
            MatchPhase::Running | MatchPhase::RoundTransition { .. } => return,
        }
        self.clock = FrameClock::default();
        self.phase = MatchPhase::Running;
        log::info!(
            "Match started (first to {} stars, timeout policy {})",
            self.tuning.win_stars,
            self.tuning.timeout_policy.as_str()
        );
    }

    /// Back to Idle with fresh cars, scores and clock. Supersedes any pending respawn.
    pub fn reset(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        let terrain = Terrain::new(width, height)?;
        self.terrain = terrain;
        self.platforms = build_platforms(width, height);
        self.reinitialize();
        log::info!("Match reset");
        Ok(())
    }

    /// Rebuild viewport-dependent geometry; scores, phase and clock are untouched
    pub fn on_viewport_resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        self.terrain = Terrain::new(width, height)?;
        self.platforms = build_platforms(width, height);

        for car in &mut self.cars {
            car.pos.x = car.pos.x.clamp(0.0, width);
            let floor = self.terrain.height_at(car.pos.x) - car.half_size();
            if car.pos.y > floor {
                car.pos.y = floor;
            }
        }
        log::debug!("Viewport resized to {}x{}, platforms rebuilt", width, height);
        Ok(())
    }

    /// Put both cars back at their spawn points, keeping scores
    pub fn respawn_cars(&mut self) {
        for (slot, car) in self.cars.iter_mut().enumerate() {
            car.respawn(slot, &self.terrain);
        }
    }

    fn reinitialize(&mut self) {
        let [red, blue] = self.tuning.cars;
        self.cars = [Car::new("Player 1", red), Car::new("Player 2", blue)];
        self.respawn_cars();
        self.phase = MatchPhase::Idle;
        self.time_left = self.tuning.round_duration;
        self.winner = None;
        self.sudden_death = false;
        self.last_score = None;
        self.events.clear();
        self.clock = FrameClock::default();
    }
}
