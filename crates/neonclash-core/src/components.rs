//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::enums::PlayerId;

/// A player's spaceship. Position is a separate component; the rect is
/// derived from position plus the fixed ship dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship {
    pub player: PlayerId,
    /// Remaining health, 0..=10.
    pub health: i32,
    /// Frames of hit-flash overlay remaining.
    pub flash_frames: u32,
}

/// A live projectile. Destroyed on impact or when it leaves the arena.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub owner: PlayerId,
}

/// Bounded history of a bullet's recent midpoints, newest last.
/// Lives on the bullet entity itself, so it cannot outlive the bullet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailHistory {
    pub points: Vec<Vec2>,
}

/// Countdown lifetime in frames. When `remaining` hits zero the entity
/// is dead and cleanup despawns it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining: f32,
    pub max: f32,
}

/// Visual state for a particle. `size` shrinks toward zero with the
/// lifetime ratio while `fade` is set; `base_size` never changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParticleVisual {
    pub color: Color,
    pub base_size: f32,
    pub size: f32,
    pub fade: bool,
}

/// Per-particle physics parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParticleMotion {
    /// Additive per-frame vertical acceleration.
    pub gravity: f32,
    /// Multiplicative per-frame velocity damping.
    pub damping: f32,
}

/// Bounded history of a spark's recent positions, newest last.
/// A spark is a particle entity carrying this extra component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SparkTrail {
    pub points: Vec<Vec2>,
}

/// An expanding energy ring. Grows from radius 0 and dies once the
/// radius reaches `max_radius`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnergyRing {
    pub radius: f32,
    pub max_radius: f32,
    /// Radius growth per frame.
    pub growth: f32,
    pub color: Color,
}

/// A background star on one of three parallax layers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Star {
    /// Parallax layer, 1..=3. Nearer layers drift faster and draw larger.
    pub layer: u8,
    /// Leftward drift in pixels per frame.
    pub speed: f32,
    pub size: f32,
    /// Base brightness before twinkle modulation, 150..=255.
    pub brightness: u8,
    pub twinkle_speed: f32,
    pub twinkle_phase: f32,
    /// Small additive color cast (reddish, bluish, ...).
    pub tint: Color,
}

/// A streaking meteor. Spawns rarely in the upper-right region and
/// despawns when its lifetime expires or it leaves the arena.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShootingStar {
    /// Streak length in segments.
    pub length: f32,
}

/// Continuous exhaust emission, attached to a ship entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ThrusterEmitter {
    /// Whether the ship moved this frame (movement system sets this;
    /// emission drops to an idle trickle when false).
    pub moved: bool,
}
