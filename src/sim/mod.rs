//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - Input arrives as an [`InputActionSet`], time as wall-clock milliseconds
//! - All mutable state is owned by one [`MatchState`]
//! - Stages run in a fixed order every tick (see [`tick::step`])

pub mod collision;
pub mod input;
pub mod kinematics;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::{CollisionResult, find_head_hit, head_hit, resolve_car_pair};
pub use input::{Action, Controls, InputActionSet};
pub use kinematics::{CarStep, ramp_launch, update_car};
pub use state::{Car, CarProfile, MatchEvent, MatchPhase, MatchState, ScoreMessage};
pub use terrain::{Platform, Terrain, build_platforms};
pub use tick::{FrameClock, step};
