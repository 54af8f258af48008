use crate::action::{Direction, MoveKey};
use glam::DVec3;
use std::collections::HashSet;

/// Movement keys currently held down.
///
/// Keys are tracked individually, so releasing `ArrowUp` while `w` is
/// still down keeps moving forward.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<MoveKey>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&mut self, key: MoveKey, pressed: bool) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    pub fn is_key_held(&self, key: MoveKey) -> bool {
        self.held.contains(&key)
    }

    /// True while any key bound to `direction` is down.
    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.iter().any(|k| k.direction() == direction)
    }

    /// Forget every held key, e.g. when input listeners are detached.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Sum of `speed` steps for every held direction.
    pub fn movement(&self, speed: f64) -> DVec3 {
        Direction::ALL
            .into_iter()
            .filter(|d| self.is_held(*d))
            .map(|d| d.unit() * speed)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_held_means_no_movement() {
        assert_eq!(InputState::new().movement(2.0), DVec3::ZERO);
    }

    #[test]
    fn held_keys_accumulate() {
        let mut input = InputState::new();
        input.set_held(MoveKey::W, true);
        input.set_held(MoveKey::D, true);
        assert_eq!(input.movement(2.0), DVec3::new(2.0, 0.0, -2.0));

        input.set_held(MoveKey::W, false);
        assert_eq!(input.movement(2.0), DVec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn repeated_press_counts_once() {
        let mut input = InputState::new();
        input.set_held(MoveKey::A, true);
        input.set_held(MoveKey::A, true);
        assert_eq!(input.movement(1.0), DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn both_keys_for_a_direction_move_once() {
        let mut input = InputState::new();
        input.set_held(MoveKey::W, true);
        input.set_held(MoveKey::ArrowUp, true);
        assert_eq!(input.movement(2.0), DVec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn releasing_one_key_keeps_the_other_held() {
        let mut input = InputState::new();
        input.set_held(MoveKey::W, true);
        input.set_held(MoveKey::ArrowUp, true);
        input.set_held(MoveKey::ArrowUp, false);
        assert!(input.is_held(Direction::Forward));
        assert!(!input.is_key_held(MoveKey::ArrowUp));
        assert_eq!(input.movement(2.0), DVec3::new(0.0, 0.0, -2.0));

        input.set_held(MoveKey::W, false);
        assert!(!input.is_held(Direction::Forward));
    }

    #[test]
    fn release_all_clears() {
        let mut input = InputState::new();
        input.set_held(MoveKey::S, true);
        input.set_held(MoveKey::ArrowDown, true);
        input.release_all();
        assert!(!input.is_held(Direction::Backward));
    }
}
