//! RGB color type and the neon palette.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color. Alpha is not stored; fading effects carry a separate
/// alpha scalar and pre-multiply at draw time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `alpha` (clamped to [0, 1]).
    pub fn scaled(self, alpha: f32) -> Self {
        let a = alpha.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * a) as u8,
            g: (self.g as f32 * a) as u8,
            b: (self.b as f32 * a) as u8,
        }
    }

    /// Saturating additive brighten of every channel.
    pub fn lightened(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
        }
    }

    /// Add the same signed offset to every channel, clamped to [0, 255].
    /// Explosion recipes use this for per-particle color variation.
    pub fn jittered(self, delta: i16) -> Self {
        let shift = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
        Self {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
        }
    }
}

pub const WHITE: Color = Color::new(255, 255, 255);
pub const BLACK: Color = Color::new(0, 0, 0);
pub const RED: Color = Color::new(255, 60, 60);
pub const BRIGHT_RED: Color = Color::new(255, 100, 100);
pub const YELLOW: Color = Color::new(255, 255, 60);
pub const BRIGHT_YELLOW: Color = Color::new(255, 255, 150);
pub const CYAN: Color = Color::new(0, 255, 255);
pub const MAGENTA: Color = Color::new(255, 50, 255);
pub const ORANGE: Color = Color::new(255, 150, 50);
pub const NEON_BLUE: Color = Color::new(50, 150, 255);
pub const NEON_PINK: Color = Color::new(255, 50, 180);
pub const ELECTRIC_BLUE: Color = Color::new(100, 200, 255);
pub const ICE_BLUE: Color = Color::new(150, 220, 255);
