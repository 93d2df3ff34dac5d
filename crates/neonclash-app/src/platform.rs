//! Traits the host platform implements: drawing, input, and audio.
//!
//! Window creation, display scaling, font rasterization, and asset
//! decoding all live behind these seams. The core never talks to a
//! windowing or audio library directly.

use glam::Vec2;
use thiserror::Error;

use neonclash_core::color::Color;
use neonclash_core::types::Rect;

/// Fatal platform conditions. Asset and surface failures abort startup
/// or the frame loop; they are never recoverable gameplay state.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to load asset `{path}`: {reason}")]
    AssetLoad { path: String, reason: String },
    #[error("render surface lost: {0}")]
    SurfaceLost(String),
}

/// Pre-scaled sprites the backend loads once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    YellowShip,
    RedShip,
    Background,
}

/// An off-screen buffer accepting draw primitives, presented once per
/// frame. Primitive calls are buffered and infallible; `present`
/// flushes the frame and is where surface loss surfaces.
pub trait RenderSurface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color, corner_radius: f32);
    fn stroke_rect(&mut self, rect: Rect, color: Color, stroke: f32, corner_radius: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, stroke: f32);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    fn draw_text(&mut self, text: &str, pos: Vec2, px: f32, color: Color);
    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2);
    /// Composite the buffered frame to the screen, shifted by the
    /// screen-shake offset (zero when the arena is calm).
    fn present(&mut self, offset: Vec2) -> Result<(), PlatformError>;
}

/// Keys the game cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    LeftCtrl,
    RightCtrl,
    R,
    Num1,
    Num2,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Discrete input edges drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    MouseDown(MouseButton),
    Quit,
}

/// One frame's worth of input: the held-key snapshot, the cursor in
/// logical (unscaled) coordinates, and the drained event queue.
#[derive(Debug, Clone, Default)]
pub struct PolledInput {
    pub held: Vec<Key>,
    pub mouse_pos: Vec2,
    pub events: Vec<InputEvent>,
}

impl PolledInput {
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

/// Non-blocking input poll, called once at the top of each frame.
pub trait InputSource {
    fn poll(&mut self) -> PolledInput;
}

/// Fire-and-forget sound effects.
pub trait AudioSink {
    fn play_fire(&mut self);
    fn play_hit(&mut self);
}

/// Silent sink used when no audio device is available. The downgrade
/// happens once at startup and lasts for the process lifetime.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_fire(&mut self) {}
    fn play_hit(&mut self) {}
}
