use glam::DVec3;

/// One of the four camera movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Forward, Self::Backward, Self::Left, Self::Right];

    /// World-space unit step for this direction. Forward is `-z`.
    pub fn unit(self) -> DVec3 {
        match self {
            Self::Forward => DVec3::NEG_Z,
            Self::Backward => DVec3::Z,
            Self::Left => DVec3::NEG_X,
            Self::Right => DVec3::X,
        }
    }
}

/// A physical movement key. Two keys share each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl MoveKey {
    pub const ALL: [MoveKey; 8] = [
        Self::W,
        Self::A,
        Self::S,
        Self::D,
        Self::ArrowUp,
        Self::ArrowDown,
        Self::ArrowLeft,
        Self::ArrowRight,
    ];

    pub fn direction(self) -> Direction {
        match self {
            Self::W | Self::ArrowUp => Direction::Forward,
            Self::S | Self::ArrowDown => Direction::Backward,
            Self::A | Self::ArrowLeft => Direction::Left,
            Self::D | Self::ArrowRight => Direction::Right,
        }
    }
}

/// A device-independent input action consumed by the frame driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A movement key went down (`pressed`) or up.
    Move { key: MoveKey, pressed: bool },
    /// Flip automatic yaw rotation on or off.
    ToggleAutoRotate,
    /// The host surface changed size.
    Resize { width: u32, height: u32 },
    /// Input with no binding.
    Noop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions_cancel() {
        assert_eq!(Direction::Forward.unit() + Direction::Backward.unit(), DVec3::ZERO);
        assert_eq!(Direction::Left.unit() + Direction::Right.unit(), DVec3::ZERO);
    }

    #[test]
    fn forward_moves_toward_negative_z() {
        assert_eq!(Direction::Forward.unit(), DVec3::new(0.0, 0.0, -1.0));
        assert_eq!(Direction::Right.unit(), DVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn every_direction_has_two_keys() {
        for direction in Direction::ALL {
            let keys = MoveKey::ALL
                .into_iter()
                .filter(|k| k.direction() == direction)
                .count();
            assert_eq!(keys, 2, "{direction:?}");
        }
    }
}
