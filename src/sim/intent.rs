//! Discrete per-tick player intents

use serde::{Deserialize, Serialize};

use crate::error::InvalidAction;

/// Action requested for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Stand (or keep standing)
    #[default]
    None,
    /// Jump if grounded
    Jump,
    /// Crouch for this tick
    Crouch,
}

impl Intent {
    pub const ALL: [Intent; 3] = [Intent::None, Intent::Jump, Intent::Crouch];

    /// Action code used by policies
    pub fn code(self) -> u8 {
        match self {
            Intent::None => 0,
            Intent::Jump => 1,
            Intent::Crouch => 2,
        }
    }

    /// Jump and crouch carry an action cost; standing does not
    pub fn is_action(self) -> bool {
        self != Intent::None
    }
}

impl TryFrom<i64> for Intent {
    type Error = InvalidAction;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Intent::None),
            1 => Ok(Intent::Jump),
            2 => Ok(Intent::Crouch),
            other => Err(InvalidAction(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for intent in Intent::ALL {
            assert_eq!(Intent::try_from(intent.code() as i64), Ok(intent));
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(Intent::try_from(3), Err(InvalidAction(3)));
        assert_eq!(Intent::try_from(-1), Err(InvalidAction(-1)));
    }
}
