// Driving action definitions

/// Represents all possible driving actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Pedals
    Accelerate,
    Reverse,

    // Steering
    SteerLeft,
    SteerRight,

    // Gearbox
    ShiftUp,
    ShiftDown,

    // Meta
    Pause,
}

impl Action {
    /// All actions, in a stable order
    pub const ALL: [Action; 7] = [
        Action::Accelerate,
        Action::Reverse,
        Action::SteerLeft,
        Action::SteerRight,
        Action::ShiftUp,
        Action::ShiftDown,
        Action::Pause,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Accelerate, Action::Accelerate);
        assert_ne!(Action::SteerLeft, Action::SteerRight);
    }

    #[test]
    fn test_all_actions_unique() {
        for (i, a) in Action::ALL.iter().enumerate() {
            for (j, b) in Action::ALL.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                }
            }
        }
    }
}
