//! Optional draw detection: fifty-move rule and threefold repetition.
//!
//! Both rules are off unless enabled in [`EngineConfig`](crate::EngineConfig);
//! with the defaults only checkmate and stalemate end a game.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Plies without a pawn move or capture that trigger the fifty-move rule.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Occurrences of one position that trigger the repetition rule.
pub const REPETITION_COUNT: usize = 3;

/// Which draw rules are enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DrawRules {
    pub fifty_move_rule: bool,
    pub threefold_repetition: bool,
}

impl DrawRules {
    /// Both rules enabled.
    pub const ALL: DrawRules = DrawRules {
        fifty_move_rule: true,
        threefold_repetition: true,
    };

    /// Returns true if any rule is enabled.
    pub const fn any(self) -> bool {
        self.fifty_move_rule || self.threefold_repetition
    }

    /// Checks the enabled rules against the halfmove clock and the position
    /// key history (oldest first, current position last).
    pub fn detect(self, halfmove_clock: u32, keys: &[u64]) -> Option<DrawReason> {
        if self.fifty_move_rule && halfmove_clock >= FIFTY_MOVE_PLIES {
            return Some(DrawReason::FiftyMoveRule);
        }
        if self.threefold_repetition {
            let current = keys.last()?;
            if keys.iter().filter(|&k| k == current).count() >= REPETITION_COUNT {
                return Some(DrawReason::ThreefoldRepetition);
            }
        }
        None
    }
}

/// Reason a game was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// 100 plies without a pawn move or capture.
    FiftyMoveRule,
    /// The same position occurred three times.
    ThreefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::FiftyMoveRule => write!(f, "fifty-move rule"),
            DrawReason::ThreefoldRepetition => write!(f, "threefold repetition"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_rules_never_fire() {
        let rules = DrawRules::default();
        assert!(!rules.any());
        assert_eq!(rules.detect(500, &[1, 1, 1, 1]), None);
    }

    #[test]
    fn fifty_move_rule() {
        let rules = DrawRules {
            fifty_move_rule: true,
            ..DrawRules::default()
        };
        assert_eq!(rules.detect(99, &[1]), None);
        assert_eq!(rules.detect(100, &[1]), Some(DrawReason::FiftyMoveRule));
    }

    #[test]
    fn repetition_counts_the_current_key() {
        let rules = DrawRules {
            threefold_repetition: true,
            ..DrawRules::default()
        };
        assert_eq!(rules.detect(0, &[7, 2, 7, 3]), None);
        assert_eq!(rules.detect(0, &[7, 2, 7, 3, 7]), Some(DrawReason::ThreefoldRepetition));
        // Three earlier occurrences of another position do not count.
        assert_eq!(rules.detect(0, &[5, 5, 5, 7]), None);
        assert_eq!(rules.detect(0, &[]), None);
    }

    #[test]
    fn display() {
        assert_eq!(DrawReason::FiftyMoveRule.to_string(), "fifty-move rule");
        assert_eq!(DrawReason::ThreefoldRepetition.to_string(), "threefold repetition");
    }
}
