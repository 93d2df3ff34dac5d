//! Simulation constants and tuning parameters.

/// Fixed simulation/render rate (Hz).
pub const FRAME_RATE: u32 = 60;

// --- Arena ---

/// Arena width in logical pixels.
pub const ARENA_WIDTH: f32 = 900.0;

/// Arena height in logical pixels.
pub const ARENA_HEIGHT: f32 = 500.0;

/// Left edge of the central dividing border.
pub const BORDER_LEFT: f32 = 445.0;

/// Width of the central dividing border.
pub const BORDER_WIDTH: f32 = 10.0;

/// Right edge of the central dividing border.
pub const BORDER_RIGHT: f32 = BORDER_LEFT + BORDER_WIDTH;

/// Ships may not descend past `ARENA_HEIGHT - FLOOR_MARGIN` (HUD strip).
pub const FLOOR_MARGIN: f32 = 15.0;

// --- Ships ---

pub const SHIP_WIDTH: f32 = 55.0;
pub const SHIP_HEIGHT: f32 = 40.0;

/// Ship movement speed in pixels per frame.
pub const SHIP_VEL: f32 = 5.0;

/// Starting health for both ships.
pub const MAX_HEALTH: i32 = 10;

/// Frames the hit-flash overlay lasts after taking damage.
pub const HIT_FLASH_FRAMES: u32 = 12;

/// Spawn posts at round start.
pub const YELLOW_SPAWN_X: f32 = 100.0;
pub const RED_SPAWN_X: f32 = 700.0;
pub const SHIP_SPAWN_Y: f32 = 300.0;

/// Cursor deltas below this are ignored in mouse-follow mode.
pub const MOUSE_DEADBAND: f32 = 10.0;

// --- Bullets ---

pub const BULLET_WIDTH: f32 = 14.0;
pub const BULLET_HEIGHT: f32 = 7.0;

/// Bullet speed in pixels per frame.
pub const BULLET_VEL: f32 = 10.0;

/// Maximum live bullets per player.
pub const MAX_BULLETS: usize = 3;

/// Midpoints kept for each bullet's trail.
pub const BULLET_TRAIL_CAP: usize = 12;

// --- Effects ---

/// Multiplicative per-frame velocity damping for particles.
pub const PARTICLE_DRAG: f32 = 0.99;

/// Downward acceleration applied to explosion debris (pixels/frame^2).
pub const EXPLOSION_GRAVITY: f32 = 0.08;

/// Past positions kept for each spark's streak.
pub const SPARK_TRAIL_CAP: usize = 5;

/// Screen-shake magnitude applied when a bullet connects.
pub const SHAKE_ON_HIT: f32 = 12.0;

/// Multiplicative per-frame screen-shake decay.
pub const SHAKE_DECAY: f32 = 0.85;

/// Shake magnitudes below this snap to zero.
pub const SHAKE_CUTOFF: f32 = 0.5;

// --- Starfield ---

/// Stars per parallax layer (near layers are sparser).
pub const STAR_COUNT_LAYER1: usize = 60;
pub const STAR_COUNT_LAYER2: usize = 35;
pub const STAR_COUNT_LAYER3: usize = 20;

/// Maximum simultaneously live shooting stars.
pub const SHOOTING_STAR_CAP: usize = 3;

/// Per-frame probability of a shooting-star spawn attempt.
pub const SHOOTING_STAR_CHANCE: f64 = 0.01;

/// Shooting-star lifetime in frames.
pub const SHOOTING_STAR_LIFETIME: f32 = 60.0;
