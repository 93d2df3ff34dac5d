//! Render snapshot — the complete visible state handed to the render
//! pass after each tick. The render pass only ever reads these views.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Rect, SimTime};

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub control_scheme: ControlScheme,
    pub outcome: Option<RoundOutcome>,
    /// Current screen-shake magnitude; the compositor rolls a random
    /// per-axis pixel offset within ±this when nonzero.
    pub shake_magnitude: f32,
    pub ships: Vec<ShipView>,
    pub bullets: Vec<BulletView>,
    pub trails: Vec<TrailView>,
    pub particles: Vec<ParticleView>,
    pub sparks: Vec<SparkView>,
    pub rings: Vec<RingView>,
    pub stars: Vec<StarView>,
    pub shooting_stars: Vec<ShootingStarView>,
    /// Sounds triggered this tick, drained into the snapshot.
    pub audio_events: Vec<AudioEvent>,
}

/// One ship with its HUD-relevant state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipView {
    pub player: PlayerId,
    pub rect: Rect,
    pub health: i32,
    /// Bullets still available: cap minus live bullets.
    pub ammo: u32,
    /// Frames of hit-flash overlay remaining.
    pub flash_frames: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BulletView {
    pub owner: PlayerId,
    pub rect: Rect,
}

/// A bullet's motion-blur trail: recent midpoints, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailView {
    pub owner: PlayerId,
    pub points: Vec<Vec2>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Vec2,
    pub size: f32,
    pub color: Color,
    /// Remaining-lifetime ratio; draw code pre-multiplies color by this.
    pub alpha: f32,
    /// Large hot particles draw a dim halo behind themselves.
    pub glow: bool,
}

/// A spark: a particle plus its recorded streak, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparkView {
    pub particle: ParticleView,
    pub trail: Vec<Vec2>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RingView {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    /// `1 - radius/max_radius`; fades as the ring expands.
    pub alpha: f32,
    /// Stroke width, thinning as the ring fades.
    pub width: f32,
}

/// A background star with twinkle already applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StarView {
    pub position: Vec2,
    pub size: f32,
    pub color: Color,
    /// Bright twinkle peaks on larger stars draw a soft halo.
    pub halo: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShootingStarView {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Streak length in segments.
    pub length: f32,
    /// Remaining-lifetime ratio.
    pub alpha: f32,
}
