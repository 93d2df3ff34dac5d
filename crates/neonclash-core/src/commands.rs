//! Player commands and per-frame input.
//!
//! Discrete actions (fire, restart) are queued as commands and processed
//! at the next tick boundary. Held movement keys and the cursor position
//! are polled fresh each frame and passed to `tick` as a snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{ControlScheme, PlayerId};

/// All discrete player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Fire a bullet. Ignored at the per-player live-bullet cap and
    /// outside the active phase.
    Fire { player: PlayerId },
    /// Discard the current round and start a fresh one.
    Restart,
    /// Switch the red player's control scheme. Also restarts the round.
    SetControlScheme { scheme: ControlScheme },
}

/// Held movement keys for one player.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MoveAxes {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Per-frame polled input snapshot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FrameInput {
    pub yellow: MoveAxes,
    pub red: MoveAxes,
    /// Cursor position in logical arena coordinates.
    pub mouse_pos: Vec2,
}
