//! Abstract input actions
//!
//! The presentation layer maps keys/touches to [`Action`]s and hands the core
//! an [`InputActionSet`] each frame. The core only reads it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A discrete action a player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left1,
    Right1,
    Jump1,
    Brake1,
    Left2,
    Right2,
    Jump2,
    Brake2,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Left1 => "move-left-1",
            Action::Right1 => "move-right-1",
            Action::Jump1 => "jump-1",
            Action::Brake1 => "brake-1",
            Action::Left2 => "move-left-2",
            Action::Right2 => "move-right-2",
            Action::Jump2 => "jump-2",
            Action::Brake2 => "brake-2",
        }
    }

    /// Parse an action identifier; unknown identifiers yield `None`
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "move-left-1" => Some(Action::Left1),
            "move-right-1" => Some(Action::Right1),
            "jump-1" => Some(Action::Jump1),
            "brake-1" => Some(Action::Brake1),
            "move-left-2" => Some(Action::Left2),
            "move-right-2" => Some(Action::Right2),
            "jump-2" => Some(Action::Jump2),
            "brake-2" => Some(Action::Brake2),
            _ => None,
        }
    }
}

/// Actions currently held down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputActionSet {
    held: HashSet<Action>,
}

impl InputActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw identifiers, silently dropping ones we don't know
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        ids.into_iter().filter_map(Action::from_id).collect()
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Merge another set into this one (e.g. two autopilots)
    pub fn extend(&mut self, other: &InputActionSet) {
        self.held.extend(other.held.iter().copied());
    }
}

impl FromIterator<Action> for InputActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

/// Which actions steer a given car
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub left: Action,
    pub right: Action,
    pub jump: Action,
    pub brake: Action,
}

impl Controls {
    /// Control scheme for player slot 0 or 1
    pub const fn for_player(index: usize) -> Self {
        if index == 0 {
            Self {
                left: Action::Left1,
                right: Action::Right1,
                jump: Action::Jump1,
                brake: Action::Brake1,
            }
        } else {
            Self {
                left: Action::Left2,
                right: Action::Right2,
                jump: Action::Jump2,
                brake: Action::Brake2,
            }
        }
    }

    /// -1, 0 or +1 from the held left/right actions
    pub fn direction(&self, input: &InputActionSet) -> f32 {
        let mut dir = 0.0;
        if input.is_held(self.left) {
            dir -= 1.0;
        }
        if input.is_held(self.right) {
            dir += 1.0;
        }
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_ids_are_ignored() {
        let set = InputActionSet::from_ids(["jump-1", "fire-3", "", "move-right-2"]);
        assert!(set.is_held(Action::Jump1));
        assert!(set.is_held(Action::Right2));
        assert!(!set.is_held(Action::Left1));
    }

    #[test]
    fn test_ids_round_trip_names() {
        for action in [Action::Left1, Action::Brake2, Action::Jump2] {
            assert_eq!(Action::from_id(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_direction() {
        let c = Controls::for_player(0);
        let mut set = InputActionSet::new();
        assert_eq!(c.direction(&set), 0.0);
        set.press(Action::Left1);
        assert_eq!(c.direction(&set), -1.0);
        set.press(Action::Right1);
        assert_eq!(c.direction(&set), 0.0);
        set.release(Action::Left1);
        assert_eq!(c.direction(&set), 1.0);
        // Player two's keys don't steer player one
        assert_eq!(Controls::for_player(1).direction(&set), 0.0);
    }
}
