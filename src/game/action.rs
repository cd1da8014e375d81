use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// No movement yet (before the countdown finishes)
    #[default]
    None,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    /// Map a drag gesture to a direction.
    ///
    /// The dominant axis wins; horizontal wins ties. A gesture with no
    /// magnitude or a non-finite component yields `None`.
    pub fn from_swipe(dx: f32, dy: f32) -> Direction {
        if !dx.is_finite() || !dy.is_finite() {
            return Direction::None;
        }

        if dx.abs() >= dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else if dx < 0.0 {
                Direction::Left
            } else {
                Direction::None
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

/// Action that can be applied to the direction slot between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Turn to a specific direction
    Move(Direction),
    /// Keep the current heading
    Continue,
}

impl Action {
    /// Resolve the heading after this action, rejecting direct reversals
    /// and requests that carry no direction.
    pub fn resolve(self, current: Direction) -> Direction {
        match self {
            Action::Move(Direction::None) | Action::Continue => current,
            Action::Move(requested) if current.is_opposite(requested) => current,
            Action::Move(requested) => requested,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::None.is_opposite(Direction::Left));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
        assert_eq!(Direction::None.delta(), (0, 0));
    }

    #[test]
    fn test_swipe_dominant_axis() {
        assert_eq!(Direction::from_swipe(12.0, 3.0), Direction::Right);
        assert_eq!(Direction::from_swipe(-12.0, 3.0), Direction::Left);
        assert_eq!(Direction::from_swipe(2.0, 9.0), Direction::Down);
        assert_eq!(Direction::from_swipe(2.0, -9.0), Direction::Up);
    }

    #[test]
    fn test_swipe_tie_goes_horizontal() {
        assert_eq!(Direction::from_swipe(5.0, 5.0), Direction::Right);
        assert_eq!(Direction::from_swipe(-5.0, 5.0), Direction::Left);
        assert_eq!(Direction::from_swipe(0.0, 0.0), Direction::None);
    }

    #[test]
    fn test_swipe_ignores_non_finite_gestures() {
        assert_eq!(Direction::from_swipe(f32::NAN, 3.0), Direction::None);
        assert_eq!(Direction::from_swipe(3.0, f32::NAN), Direction::None);
        assert_eq!(Direction::from_swipe(f32::INFINITY, 1.0), Direction::None);
        assert_eq!(Direction::from_swipe(1.0, f32::NEG_INFINITY), Direction::None);
    }

    #[test]
    fn test_direction_into_action() {
        assert_eq!(Action::from(Direction::Up), Action::Move(Direction::Up));
        let action: Action = Direction::Left.into();
        assert_eq!(action.resolve(Direction::Up), Direction::Left);
    }

    #[test]
    fn test_resolve_rejects_reversal() {
        assert_eq!(
            Action::Move(Direction::Left).resolve(Direction::Right),
            Direction::Right
        );
        assert_eq!(
            Action::Move(Direction::Up).resolve(Direction::Right),
            Direction::Up
        );
        assert_eq!(Action::Continue.resolve(Direction::Down), Direction::Down);
        assert_eq!(
            Action::Move(Direction::None).resolve(Direction::Down),
            Direction::Down
        );
    }
}
