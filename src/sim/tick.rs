//! Frame driver and match state machine
//!
//! One call to [`step`] is one tick: clock → cars → car-vs-car → head hits →
//! scoring → round clock. Two clocks are in play: simulated time (scaled by
//! slow motion, drives physics and the round clock) and wall-clock time
//! (drives the slow-motion deadline and message expiry).

use super::collision::{find_head_hit, resolve_car_pair};
use super::input::{Controls, InputActionSet};
use super::kinematics::{clamp_to_arena, update_car};
use super::state::{MatchEvent, MatchPhase, MatchState, ScoreMessage};
use crate::consts::FRAME_SECS;
use crate::secs_to_frames;
use crate::tuning::TimeoutPolicy;

/// Converts wall-clock timestamps into bounded real-time steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Real seconds elapsed since the previous call, clamped to `max_step`.
    ///
    /// The first call after a (re)start advances one nominal frame. A timestamp
    /// older than the previous one advances nothing.
    pub fn advance(&mut self, now_ms: f64, max_step: f32) -> f32 {
        let elapsed = match self.last_ms {
            None => FRAME_SECS,
            Some(last) if now_ms < last => {
                log::warn!("Discarding non-monotonic timestamp {now_ms} (last {last})");
                return 0.0;
            }
            Some(last) => ((now_ms - last) / 1000.0) as f32,
        };
        self.last_ms = Some(now_ms);

        if elapsed > max_step {
            log::debug!("Frame stall of {:.0} ms clamped", elapsed * 1000.0);
            max_step
        } else {
            elapsed
        }
    }
}

/// Advance the match by one tick if it is running; otherwise do nothing
pub fn step(state: &mut MatchState, input: &InputActionSet, now_ms: f64) {
    if !state.is_running() {
        return;
    }
    state.events.clear();

    let real_dt = state.clock.advance(now_ms, state.tuning.max_frame_step);

    // Wall-clock housekeeping
    if let MatchPhase::RoundTransition { until_ms } = state.phase {
        if now_ms >= until_ms {
            state.respawn_cars();
            state.phase = MatchPhase::Running;
            state.events.push(MatchEvent::RoundRestarted);
            log::debug!("Slow motion over, cars back at spawn");
        }
    }
    if state
        .last_score
        .as_ref()
        .is_some_and(|msg| now_ms - msg.timestamp > state.tuning.score_message_ms())
    {
        state.last_score = None;
    }

    let time_scale = match state.phase {
        MatchPhase::RoundTransition { .. } => state.tuning.slow_motion_factor,
        _ => 1.0,
    };
    let dt = real_dt * time_scale;
    let frames = secs_to_frames(dt);

    // Cars
    for (slot, car) in state.cars.iter_mut().enumerate() {
        let outcome = update_car(
            car,
            &Controls::for_player(slot),
            input,
            &state.terrain,
            &state.platforms,
            &state.tuning,
            frames,
        );
        if outcome.jumped {
            state.events.push(MatchEvent::Jump { car: slot });
        }
        if outcome.launched {
            state.events.push(MatchEvent::RampLaunch { car: slot });
        }
    }

    // Car vs car
    if let Some((_, impulse)) = resolve_car_pair(&mut state.cars, &state.tuning) {
        if impulse > 0.0 {
            state.events.push(MatchEvent::CarsCollided { impulse });
        }
        for car in &mut state.cars {
            clamp_to_arena(car, &state.terrain);
        }
    }

    // Head hits only count in open play
    if state.phase == MatchPhase::Running {
        if let Some((attacker, defender)) = find_head_hit(&state.cars, &state.tuning) {
            award_head_hit(state, attacker, defender, now_ms);
        }
    }

    if state.is_running() {
        run_round_clock(state, dt);
    }
}

/// Credit the car whose head made contact, then end the match or start slow motion
fn award_head_hit(state: &mut MatchState, attacker: usize, defender: usize, now_ms: f64) {
    let win_stars = state.tuning.win_stars;
    let increment = state.tuning.score_increment;
    let car = &mut state.cars[attacker];
    car.stars = (car.stars + 1).min(win_stars);
    car.score = car.score.saturating_add(increment);
    let stars = car.stars;
    let text = format!("{} HEAD HIT! +{}", car.label, increment);

    log::info!(
        "{} scores on {} ({}/{} stars)",
        state.cars[attacker].label,
        state.cars[defender].label,
        stars,
        win_stars
    );
    state.last_score = Some(ScoreMessage {
        text,
        timestamp: now_ms,
    });
    state.events.push(MatchEvent::HeadHit { attacker, defender });

    if stars >= win_stars || state.sudden_death {
        end_match(state, attacker);
    } else {
        state.phase = MatchPhase::RoundTransition {
            until_ms: now_ms + state.tuning.slow_motion_ms(),
        };
    }
}

fn end_match(state: &mut MatchState, winner: usize) {
    state.phase = MatchPhase::Ended;
    state.winner = Some(winner);
    state.events.push(MatchEvent::MatchWon { winner });
    log::info!("{} wins the match", state.cars[winner].label);
}

/// Count the round clock down on simulated time and apply the timeout policy
fn run_round_clock(state: &mut MatchState, dt: f32) {
    if state.time_left <= 0.0 {
        return;
    }
    state.time_left = (state.time_left - dt).max(0.0);
    if state.time_left > 0.0 {
        return;
    }

    match state.tuning.timeout_policy {
        TimeoutPolicy::Informational => {
            log::info!("Round clock expired");
        }
        TimeoutPolicy::MostStarsWins => {
            let [a, b] = [state.cars[0].stars, state.cars[1].stars];
            if a == b {
                state.sudden_death = true;
                state.events.push(MatchEvent::SuddenDeath);
                log::info!("Time up on a tie, sudden death");
            } else {
                let leader = if a > b { 0 } else { 1 };
                log::info!("Time up, {} leads", state.cars[leader].label);
                end_match(state, leader);
            }
        }
    }
}
