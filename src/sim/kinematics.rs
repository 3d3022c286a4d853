//! Per-car integrator: steering, gravity, ground/platform contact, jump, bounds
//!
//! Time is measured in reference frames (`frames = dt / FRAME_SECS`), so the
//! constants in [`Tuning`] read as classic per-frame values while the
//! integration stays frame-rate independent.

use glam::Vec2;

use super::input::{Controls, InputActionSet};
use super::state::Car;
use super::terrain::{Platform, Terrain};
use crate::damp;
use crate::tuning::Tuning;

/// Largest visual tilt (radians)
const MAX_TILT: f32 = 0.6;

/// What happened to a car during one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarStep {
    pub jumped: bool,
    pub launched: bool,
}

/// Advance one car by `frames` reference frames
pub fn update_car(
    car: &mut Car,
    controls: &Controls,
    input: &InputActionSet,
    terrain: &Terrain,
    platforms: &[Platform],
    tuning: &Tuning,
    frames: f32,
) -> CarStep {
    let mut outcome = CarStep::default();
    let max_speed = car.profile.max_speed;
    let half = car.half_size();

    // Steering and brake
    let dir = controls.direction(input);
    car.vel.x += dir * max_speed * tuning.accel_coefficient * frames;
    if input.is_held(controls.brake) {
        car.vel.x *= damp(tuning.brake_damping, frames);
    }
    car.vel.x = car.vel.x.clamp(-max_speed, max_speed);

    car.vel.y += tuning.gravity * frames;

    let prev_bottom = car.pos.y + half;
    car.pos += car.vel * frames;
    car.on_ground = false;

    // Ground
    let floor = terrain.height_at(car.pos.x) - half;
    if car.pos.y >= floor {
        car.pos.y = floor;
        if car.vel.y > 0.0 {
            car.vel.y *= tuning.ground_bounce;
        }
        car.on_ground = true;
        car.vel.x *= damp(tuning.ground_friction, frames);
        outcome.launched = ramp_launch(car, terrain.slope_at(car.pos.x), tuning);
    } else {
        car.vel.x *= damp(tuning.air_friction, frames);
    }

    // Platforms (top surface only)
    if car.vel.y > 0.0 {
        let bottom = car.pos.y + half;
        if let Some(platform) = platforms
            .iter()
            .find(|p| p.spans(car.pos.x) && prev_bottom <= p.top() && bottom >= p.top())
        {
            car.pos.y = platform.top() - half;
            car.vel.y = 0.0;
            car.on_ground = true;
        }
    }

    // Jump fires once per press
    let jump_held = input.is_held(controls.jump);
    if !jump_held {
        car.jump_latched = false;
    } else if car.on_ground && !car.jump_latched {
        car.vel.y = tuning.jump_impulse;
        car.on_ground = false;
        car.jump_latched = true;
        outcome.jumped = true;
    }

    clamp_to_arena(car, terrain);
    car.angle = tilt_from_velocity(car.vel);

    outcome
}

/// Kick a car upward when it crosses a steep stretch of ground at speed.
///
/// Only called right after the car was snapped onto the terrain. Returns
/// whether a launch happened.
pub fn ramp_launch(car: &mut Car, slope: f32, tuning: &Tuning) -> bool {
    let speed = car.vel.length();
    if slope.abs() <= tuning.ramp_slope_threshold || speed <= tuning.ramp_speed_threshold {
        return false;
    }

    let normal = Vec2::new(slope, -1.0).normalize();
    let mut impulse = normal * tuning.ramp_boost * speed;
    if impulse.y == 0.0 {
        return false;
    }
    impulse.y = -impulse.y.abs();

    car.vel += impulse;
    if car.vel.y >= 0.0 {
        car.vel.y = -car.vel.y.max(impulse.y.abs());
    }
    car.on_ground = false;
    true
}

/// Keep the car inside `[0, width]` and on or above the ground
pub fn clamp_to_arena(car: &mut Car, terrain: &Terrain) {
    if car.pos.x < 0.0 {
        car.pos.x = 0.0;
        car.vel.x = 0.0;
    } else if car.pos.x > terrain.width {
        car.pos.x = terrain.width;
        car.vel.x = 0.0;
    }
    settle_on_terrain(car, terrain);
}

/// Lift a car that ended up below the ground surface back onto it
pub fn settle_on_terrain(car: &mut Car, terrain: &Terrain) {
    let floor = terrain.height_at(car.pos.x) - car.half_size();
    if car.pos.y > floor {
        car.pos.y = floor;
        car.vel.y = car.vel.y.min(0.0);
        car.on_ground = true;
    }
}

/// Cosmetic tilt: nose follows the direction of travel
fn tilt_from_velocity(vel: Vec2) -> f32 {
    if vel.length_squared() < 1e-4 {
        return 0.0;
    }
    let facing = if vel.x < 0.0 { -1.0 } else { 1.0 };
    (vel.y.atan2(vel.x.abs()) * facing).clamp(-MAX_TILT, MAX_TILT)
}
