//! Car Clash - A two-car arena brawler
//!
//! Core modules:
//! - `sim`: Simulation (terrain, car physics, collisions, match state machine)
//! - `snapshot`: Read-only render/HUD projection for the presentation layer
//! - `tuning`: Data-driven game balance
//! - `demo`: Seeded autopilot for idle/demo mode
//!
//! Rendering, input capture and DOM widgets live outside this crate. The
//! core consumes an [`sim::InputActionSet`] plus wall-clock timestamps and
//! hands back a [`snapshot::RenderState`].

pub mod demo;
pub mod error;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use error::ConfigError;
pub use snapshot::{HudState, RenderState, snapshot};
pub use tuning::{TimeoutPolicy, Tuning};

/// Game configuration constants (defaults for [`Tuning`])
///
/// Physics values are expressed per reference frame (1/60 s), see [`consts::FRAME_SECS`].
pub mod consts {
    /// Length of one reference frame in seconds
    pub const FRAME_SECS: f32 = 1.0 / 60.0;
    /// Largest real-time step fed into the simulation (seconds)
    pub const MAX_FRAME_STEP: f32 = 0.05;

    /// Stars needed to win the match
    pub const WIN_STARS: u8 = 5;
    /// Round clock (seconds)
    pub const ROUND_DURATION: f32 = 120.0;
    /// Display points per head hit
    pub const SCORE_INCREMENT: u32 = 100;

    /// Downward acceleration (px/frame²)
    pub const GRAVITY: f32 = 0.6;
    /// Fraction of max speed gained per frame while steering
    pub const ACCEL_COEFFICIENT: f32 = 0.08;
    /// Velocity multiplier per frame while braking
    pub const BRAKE_DAMPING: f32 = 0.9;
    /// Horizontal velocity multiplier per frame on the ground
    pub const GROUND_FRICTION: f32 = 0.96;
    /// Horizontal velocity multiplier per frame in the air
    pub const AIR_FRICTION: f32 = 0.995;
    /// Vertical velocity multiplier on landing (soft bounce)
    pub const GROUND_BOUNCE: f32 = -0.2;
    /// Vertical velocity set by a jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -12.0;

    /// Car-vs-car restitution
    pub const RESTITUTION: f32 = 0.8;
    /// Overlap tolerated before cars are pushed apart (px)
    pub const ALLOWED_OVERLAP: f32 = 6.0;

    /// Minimum |slope| for a ramp launch
    pub const RAMP_SLOPE_THRESHOLD: f32 = 0.25;
    /// Minimum speed (px/frame) for a ramp launch
    pub const RAMP_SPEED_THRESHOLD: f32 = 3.0;
    /// Launch impulse per unit of speed
    pub const RAMP_BOOST: f32 = 0.35;

    /// Time scale during the post-hit slow-motion window
    pub const SLOW_MOTION_FACTOR: f32 = 0.3;
    /// Slow-motion window length (wall-clock seconds)
    pub const SLOW_MOTION_DURATION: f32 = 0.5;
    /// Scoring message lifetime (wall-clock seconds)
    pub const SCORE_MESSAGE_DURATION: f32 = 1.2;

    /// Head circle centre, above the body centre, as a fraction of half-size
    pub const HEAD_OFFSET_FRACTION: f32 = 0.6;
    /// Head circle radius as a fraction of half-size
    pub const HEAD_RADIUS_FRACTION: f32 = 0.35;
    /// Portion of the defender's half-size that counts as body for head hits
    pub const BODY_HIT_FRACTION: f32 = 0.9;

    /// Car body half-size (px), identical for both cars
    pub const CAR_HALF_SIZE: f32 = 28.0;
    /// Car top speed (px/frame)
    pub const CAR_MAX_SPEED: f32 = 7.0;
}

/// Seconds of simulated time converted to reference frames
#[inline]
pub fn secs_to_frames(secs: f32) -> f32 {
    secs / consts::FRAME_SECS
}

/// Frame-rate independent damping: `factor` per reference frame applied over `frames`
#[inline]
pub fn damp(factor: f32, frames: f32) -> f32 {
    factor.powf(frames)
}

/// Format whole seconds as `mm:ss` (rounded up so `00:00` only shows at zero)
pub fn format_clock(secs: f32) -> String {
    let total = secs.max(0.0).ceil() as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}
