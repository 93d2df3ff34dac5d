//! Headless runner: drives the full frame loop against no-op platform
//! seams for a bounded number of frames. Useful as a smoke test of the
//! engine + orchestrator without a window or audio device; a real
//! backend plugs its own `RenderSurface`/`InputSource`/`AudioSink`
//! implementations into `game_loop::run`.

use anyhow::Result;
use glam::Vec2;

use neonclash_app::game_loop;
use neonclash_app::platform::{
    InputEvent, InputSource, Key, NullAudio, PlatformError, PolledInput, RenderSurface, SpriteId,
};
use neonclash_core::color::Color;
use neonclash_core::types::Rect;
use neonclash_sim::engine::SimConfig;

/// Discards every draw call.
struct HeadlessSurface;

impl RenderSurface for HeadlessSurface {
    fn clear(&mut self, _color: Color) {}
    fn fill_rect(&mut self, _rect: Rect, _color: Color, _corner_radius: f32) {}
    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _stroke: f32, _corner_radius: f32) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _color: Color, _stroke: f32) {}
    fn line(&mut self, _from: Vec2, _to: Vec2, _color: Color, _width: f32) {}
    fn draw_text(&mut self, _text: &str, _pos: Vec2, _px: f32, _color: Color) {}
    fn draw_sprite(&mut self, _sprite: SpriteId, _pos: Vec2) {}
    fn present(&mut self, _offset: Vec2) -> Result<(), PlatformError> {
        Ok(())
    }
}

/// A short scripted session: both players trade fire, then quit.
struct DemoInput {
    frame: u64,
}

impl InputSource for DemoInput {
    fn poll(&mut self) -> PolledInput {
        let frame = self.frame;
        self.frame += 1;

        let mut polled = PolledInput {
            mouse_pos: Vec2::new(700.0, 300.0),
            ..Default::default()
        };
        if frame % 80 == 10 {
            polled.events.push(InputEvent::KeyDown(Key::LeftCtrl));
        }
        if frame % 80 == 50 {
            polled.events.push(InputEvent::KeyDown(Key::RightCtrl));
        }
        if frame % 3 == 0 {
            polled.held.push(Key::W);
            polled.held.push(Key::Down);
        }
        if frame >= 600 {
            polled.events.push(InputEvent::Quit);
        }
        polled
    }
}

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    // No audio backend in the headless runner; run silent from the start.
    tracing::warn!("audio device unavailable, continuing without sound");

    let mut surface = HeadlessSurface;
    let mut input = DemoInput { frame: 0 };
    let mut audio = NullAudio;

    game_loop::run(&mut surface, &mut input, &mut audio, SimConfig::default())?;
    tracing::info!("headless session complete");
    Ok(())
}
