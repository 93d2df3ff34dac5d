//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// The two combatants. Yellow holds the left half of the arena and faces
/// right; red holds the right half and faces left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    #[default]
    Yellow,
    Red,
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::Yellow => PlayerId::Red,
            PlayerId::Red => PlayerId::Yellow,
        }
    }

    /// Whether this player's ship points left (and fires leftward).
    pub fn facing_left(self) -> bool {
        matches!(self, PlayerId::Red)
    }
}

/// Input mapping mode for the red player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Arrow keys to move, right-ctrl to fire.
    #[default]
    Arrows,
    /// Ship follows the cursor, left click to fire.
    Mouse,
}

/// Round lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    RoundOver,
}

/// How a finished round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    YellowWins,
    RedWins,
    /// Both ships destroyed on the same frame.
    Draw,
}

impl RoundOutcome {
    /// The surviving player, if any.
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            RoundOutcome::YellowWins => Some(PlayerId::Yellow),
            RoundOutcome::RedWins => Some(PlayerId::Red),
            RoundOutcome::Draw => None,
        }
    }

    /// End-screen banner text.
    pub fn banner_text(self) -> &'static str {
        match self {
            RoundOutcome::YellowWins => "YELLOW WINS!",
            RoundOutcome::RedWins => "RED WINS!",
            RoundOutcome::Draw => "MUTUAL DESTRUCTION!",
        }
    }
}
