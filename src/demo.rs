//! Demo/idle mode autopilot
//!
//! Drives one car by emitting the same abstract actions a human would. Seeded
//! so a demo run can be replayed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Controls, InputActionSet, MatchState};

/// Distance from the arena edge where the pilot starts braking (px)
const EDGE_MARGIN: f32 = 40.0;
/// Chance per tick of a random hop
const JUMP_CHANCE: f64 = 0.02;

#[derive(Debug, Clone)]
pub struct DemoPilot {
    slot: usize,
    rng: Pcg32,
    /// Ticks left on the current jump press
    hold_jump: u32,
}

impl DemoPilot {
    pub fn new(slot: usize, seed: u64) -> Self {
        Self {
            slot: slot.min(1),
            rng: Pcg32::seed_from_u64(seed),
            hold_jump: 0,
        }
    }

    /// Decide this tick's actions for our car
    pub fn actions(&mut self, state: &MatchState) -> InputActionSet {
        let controls = Controls::for_player(self.slot);
        let me = &state.cars[self.slot];
        let them = &state.cars[1 - self.slot];
        let mut input = InputActionSet::new();

        // Chase with a little wobble so two pilots don't mirror each other
        let wobble = self.rng.random_range(-60.0..60.0);
        let dx = them.pos.x + wobble - me.pos.x;
        if dx < -8.0 {
            input.press(controls.left);
        } else if dx > 8.0 {
            input.press(controls.right);
        }

        let near_edge = (me.pos.x < EDGE_MARGIN && me.vel.x < 0.0)
            || (me.pos.x > state.terrain.width - EDGE_MARGIN && me.vel.x > 0.0);
        if near_edge {
            input.press(controls.brake);
        }

        // Hop when the opponent is overhead-ish or at random; release between hops
        if self.hold_jump > 0 {
            self.hold_jump -= 1;
            input.press(controls.jump);
        } else if me.on_ground
            && (dx.abs() < me.half_size() * 3.0 || self.rng.random_bool(JUMP_CHANCE))
        {
            self.hold_jump = self.rng.random_range(2..8);
        }

        input
    }
}
