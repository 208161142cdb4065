//! Keyboard-driven basket

use std::collections::VecDeque;

use super::{Controller, Decision, Observation};

/// Arrow keys currently held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeldKeys {
    Left,
    Right,
    #[default]
    Neither,
}

impl HeldKeys {
    /// Parse one script character: `L`, `R`, anything else is neither
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_uppercase() {
            'L' => HeldKeys::Left,
            'R' => HeldKeys::Right,
            _ => HeldKeys::Neither,
        }
    }
}

/// Source of held-key state, polled once per tick
pub trait InputSource {
    fn held(&mut self) -> HeldKeys;
}

/// Replays a fixed key sequence, then reports nothing held
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    keys: VecDeque<HeldKeys>,
}

impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = HeldKeys>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Script like `"LLL--RR"`; whitespace is skipped
    pub fn parse(script: &str) -> Self {
        Self::new(
            script
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(HeldKeys::from_char),
        )
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl InputSource for ScriptedInput {
    fn held(&mut self) -> HeldKeys {
        self.keys.pop_front().unwrap_or_default()
    }
}

/// Moves at constant speed while an arrow is held; ignores the observation
#[derive(Debug, Clone)]
pub struct HumanController<I: InputSource> {
    input: I,
    speed: f32,
}

impl<I: InputSource> HumanController<I> {
    pub fn new(input: I, speed: f32) -> Self {
        Self { input, speed }
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

impl<I: InputSource> Controller for HumanController<I> {
    fn decide(&mut self, _observation: &Observation) -> Decision {
        match self.input.held() {
            HeldKeys::Left => Decision::MoveLeft,
            HeldKeys::Right => Decision::MoveRight,
            HeldKeys::Neither => Decision::Hold,
        }
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any_observation() -> Observation {
        Observation {
            collector_x: 0.0,
            nearest_item_x: 0.0,
            nearest_item_y: 0.0,
            arena_width: 700.0,
            arena_height: 550.0,
        }
    }

    #[test]
    fn test_script_replay() {
        let mut human = HumanController::new(ScriptedInput::parse("L R -x"), 300.0);
        let obs = any_observation();
        assert_eq!(human.decide(&obs), Decision::MoveLeft);
        assert_eq!(human.decide(&obs), Decision::MoveRight);
        assert_eq!(human.decide(&obs), Decision::Hold);
        assert_eq!(human.decide(&obs), Decision::Hold);
        // Exhausted script holds still
        assert_eq!(human.decide(&obs), Decision::Hold);
        assert_eq!(human.input().remaining(), 0);
    }

    #[test]
    fn test_lowercase_keys() {
        let mut input = ScriptedInput::parse("lr");
        assert_eq!(input.held(), HeldKeys::Left);
        assert_eq!(input.held(), HeldKeys::Right);
    }
}
