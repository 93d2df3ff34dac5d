//! Events emitted by the simulation for audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::PlayerId;

/// Audio events for the host sound system. Fire-and-forget; the sink
/// may be a no-op when no audio device is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A bullet left the muzzle.
    BulletFired { player: PlayerId },
    /// A bullet connected with the opposing ship.
    BulletHit { victim: PlayerId },
}
