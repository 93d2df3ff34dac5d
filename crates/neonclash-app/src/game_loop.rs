//! Fixed-rate frame orchestrator.
//!
//! Each iteration: poll input, translate discrete events to engine
//! commands, tick the engine once, play queued sounds, run the render
//! pass, and present with the screen-shake offset. Pacing uses an
//! absolute deadline so frame times do not drift.

use std::time::{Duration, Instant};

use glam::Vec2;
use rand::Rng;

use neonclash_core::commands::{FrameInput, MoveAxes, PlayerCommand};
use neonclash_core::constants::FRAME_RATE;
use neonclash_core::enums::{ControlScheme, GamePhase, PlayerId};
use neonclash_core::events::AudioEvent;
use neonclash_sim::engine::{RoundEngine, SimConfig};

use crate::platform::{
    AudioSink, InputEvent, InputSource, Key, MouseButton, PlatformError, PolledInput,
    RenderSurface,
};
use crate::render;

/// Nominal duration of one frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Run the game until a quit event arrives or the surface is lost.
pub fn run<S, I, A>(
    surface: &mut S,
    input: &mut I,
    audio: &mut A,
    config: SimConfig,
) -> Result<(), PlatformError>
where
    S: RenderSurface,
    I: InputSource,
    A: AudioSink,
{
    let mut engine = RoundEngine::new(config);
    let mut shake_rng = rand::thread_rng();
    let mut next_frame = Instant::now();

    tracing::info!("frame loop started");
    loop {
        // 1. Drain this frame's input
        let polled = input.poll();
        if polled
            .events
            .iter()
            .any(|e| matches!(e, InputEvent::Quit | InputEvent::KeyDown(Key::Escape)))
        {
            tracing::info!("quit requested");
            return Ok(());
        }
        for event in &polled.events {
            if let Some(command) = map_event(*event, engine.phase(), engine.control_scheme()) {
                engine.queue_command(command);
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick(&frame_input(&polled));

        // 3. Fire-and-forget sounds
        for event in &snapshot.audio_events {
            match event {
                AudioEvent::BulletFired { .. } => audio.play_fire(),
                AudioEvent::BulletHit { .. } => audio.play_hit(),
            }
        }

        // 4. Render, then present with the screen-shake offset
        render::draw_frame(surface, &snapshot);
        let offset = if snapshot.shake_magnitude > 0.0 {
            let magnitude = snapshot.shake_magnitude;
            Vec2::new(
                shake_rng.gen_range(-magnitude..=magnitude),
                shake_rng.gen_range(-magnitude..=magnitude),
            )
        } else {
            Vec2::ZERO
        };
        surface.present(offset)?;

        // 5. Sleep until the next frame boundary
        next_frame += FRAME_DURATION;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else if now - next_frame > FRAME_DURATION * 2 {
            // Too far behind — reset to avoid a catch-up spiral
            next_frame = now;
        }
    }
}

/// Map a discrete input event to an engine command, honoring the
/// active control scheme and round phase.
fn map_event(
    event: InputEvent,
    phase: GamePhase,
    scheme: ControlScheme,
) -> Option<PlayerCommand> {
    match event {
        InputEvent::KeyDown(Key::LeftCtrl) => Some(PlayerCommand::Fire {
            player: PlayerId::Yellow,
        }),
        InputEvent::KeyDown(Key::RightCtrl) if scheme == ControlScheme::Arrows => {
            Some(PlayerCommand::Fire {
                player: PlayerId::Red,
            })
        }
        InputEvent::MouseDown(MouseButton::Left) if scheme == ControlScheme::Mouse => {
            Some(PlayerCommand::Fire {
                player: PlayerId::Red,
            })
        }
        InputEvent::KeyDown(Key::R) if phase == GamePhase::RoundOver => {
            Some(PlayerCommand::Restart)
        }
        InputEvent::KeyDown(Key::Num1) if phase == GamePhase::RoundOver => {
            Some(PlayerCommand::SetControlScheme {
                scheme: ControlScheme::Arrows,
            })
        }
        InputEvent::KeyDown(Key::Num2) if phase == GamePhase::RoundOver => {
            Some(PlayerCommand::SetControlScheme {
                scheme: ControlScheme::Mouse,
            })
        }
        _ => None,
    }
}

/// Flatten the held-key snapshot into per-player movement axes.
fn frame_input(polled: &PolledInput) -> FrameInput {
    FrameInput {
        yellow: MoveAxes {
            left: polled.is_held(Key::A),
            right: polled.is_held(Key::D),
            up: polled.is_held(Key::W),
            down: polled.is_held(Key::S),
        },
        red: MoveAxes {
            left: polled.is_held(Key::Left),
            right: polled.is_held(Key::Right),
            up: polled.is_held(Key::Up),
            down: polled.is_held(Key::Down),
        },
        mouse_pos: polled.mouse_pos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neonclash_core::color::Color;
    use neonclash_core::types::Rect;
    use crate::platform::{NullAudio, SpriteId};

    /// Counts draw and present calls; never fails.
    #[derive(Default)]
    struct RecordingSurface {
        frames: usize,
        draw_calls: usize,
    }

    impl RenderSurface for RecordingSurface {
        fn clear(&mut self, _color: Color) {
            self.draw_calls += 1;
        }
        fn fill_rect(&mut self, _rect: Rect, _color: Color, _corner_radius: f32) {
            self.draw_calls += 1;
        }
        fn stroke_rect(&mut self, _rect: Rect, _color: Color, _stroke: f32, _corner_radius: f32) {
            self.draw_calls += 1;
        }
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
            self.draw_calls += 1;
        }
        fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _color: Color, _stroke: f32) {
            self.draw_calls += 1;
        }
        fn line(&mut self, _from: Vec2, _to: Vec2, _color: Color, _width: f32) {
            self.draw_calls += 1;
        }
        fn draw_text(&mut self, _text: &str, _pos: Vec2, _px: f32, _color: Color) {
            self.draw_calls += 1;
        }
        fn draw_sprite(&mut self, _sprite: SpriteId, _pos: Vec2) {
            self.draw_calls += 1;
        }
        fn present(&mut self, _offset: Vec2) -> Result<(), PlatformError> {
            self.frames += 1;
            Ok(())
        }
    }

    /// Presents fail immediately, as when the surface is lost.
    struct LostSurface;

    impl RenderSurface for LostSurface {
        fn clear(&mut self, _color: Color) {}
        fn fill_rect(&mut self, _rect: Rect, _color: Color, _corner_radius: f32) {}
        fn stroke_rect(&mut self, _rect: Rect, _color: Color, _stroke: f32, _corner_radius: f32) {}
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
        fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _color: Color, _stroke: f32) {}
        fn line(&mut self, _from: Vec2, _to: Vec2, _color: Color, _width: f32) {}
        fn draw_text(&mut self, _text: &str, _pos: Vec2, _px: f32, _color: Color) {}
        fn draw_sprite(&mut self, _sprite: SpriteId, _pos: Vec2) {}
        fn present(&mut self, _offset: Vec2) -> Result<(), PlatformError> {
            Err(PlatformError::SurfaceLost("device removed".into()))
        }
    }

    /// Emits a fixed script of events, then a quit.
    struct ScriptedInput {
        frame: usize,
        quit_at: usize,
        script: Vec<(usize, InputEvent)>,
    }

    impl InputSource for ScriptedInput {
        fn poll(&mut self) -> PolledInput {
            let frame = self.frame;
            self.frame += 1;
            let mut events: Vec<InputEvent> = self
                .script
                .iter()
                .filter(|(at, _)| *at == frame)
                .map(|(_, e)| *e)
                .collect();
            if frame >= self.quit_at {
                events.push(InputEvent::Quit);
            }
            PolledInput {
                events,
                ..Default::default()
            }
        }
    }

    struct CountingAudio {
        fires: usize,
        hits: usize,
    }

    impl AudioSink for CountingAudio {
        fn play_fire(&mut self) {
            self.fires += 1;
        }
        fn play_hit(&mut self) {
            self.hits += 1;
        }
    }

    #[test]
    fn test_loop_runs_to_quit_and_plays_sounds() {
        let mut surface = RecordingSurface::default();
        let mut input = ScriptedInput {
            frame: 0,
            quit_at: 90,
            script: vec![(0, InputEvent::KeyDown(Key::LeftCtrl))],
        };
        let mut audio = CountingAudio { fires: 0, hits: 0 };

        run(&mut surface, &mut input, &mut audio, SimConfig::default()).unwrap();

        // One frame per tick until the quit frame, which renders nothing.
        assert_eq!(surface.frames, 90);
        assert!(surface.draw_calls > 0);
        assert_eq!(audio.fires, 1);
        // The shot connects well before the quit frame.
        assert_eq!(audio.hits, 1);
    }

    #[test]
    fn test_present_failure_aborts_the_loop() {
        let mut surface = LostSurface;
        let mut input = ScriptedInput {
            frame: 0,
            quit_at: 1000,
            script: Vec::new(),
        };
        let mut audio = NullAudio;

        let result = run(&mut surface, &mut input, &mut audio, SimConfig::default());
        assert!(matches!(result, Err(PlatformError::SurfaceLost(_))));
    }

    #[test]
    fn test_event_mapping_respects_scheme() {
        let fire_red = PlayerCommand::Fire {
            player: PlayerId::Red,
        };

        assert_eq!(
            map_event(
                InputEvent::KeyDown(Key::RightCtrl),
                GamePhase::Active,
                ControlScheme::Arrows,
            ),
            Some(fire_red)
        );
        assert_eq!(
            map_event(
                InputEvent::KeyDown(Key::RightCtrl),
                GamePhase::Active,
                ControlScheme::Mouse,
            ),
            None
        );
        assert_eq!(
            map_event(
                InputEvent::MouseDown(MouseButton::Left),
                GamePhase::Active,
                ControlScheme::Mouse,
            ),
            Some(fire_red)
        );
        assert_eq!(
            map_event(
                InputEvent::MouseDown(MouseButton::Left),
                GamePhase::Active,
                ControlScheme::Arrows,
            ),
            None
        );
    }

    #[test]
    fn test_restart_only_maps_on_end_screen() {
        assert_eq!(
            map_event(
                InputEvent::KeyDown(Key::R),
                GamePhase::Active,
                ControlScheme::Arrows,
            ),
            None
        );
        assert_eq!(
            map_event(
                InputEvent::KeyDown(Key::R),
                GamePhase::RoundOver,
                ControlScheme::Arrows,
            ),
            Some(PlayerCommand::Restart)
        );
        assert_eq!(
            map_event(
                InputEvent::KeyDown(Key::Num2),
                GamePhase::RoundOver,
                ControlScheme::Arrows,
            ),
            Some(PlayerCommand::SetControlScheme {
                scheme: ControlScheme::Mouse,
            })
        );
    }

    #[test]
    fn test_held_keys_become_axes() {
        let polled = PolledInput {
            held: vec![Key::A, Key::W, Key::Right],
            mouse_pos: Vec2::new(700.0, 200.0),
            events: Vec::new(),
        };
        let input = frame_input(&polled);
        assert!(input.yellow.left && input.yellow.up);
        assert!(!input.yellow.right && !input.yellow.down);
        assert!(input.red.right);
        assert!(!input.red.left);
        assert_eq!(input.mouse_pos, Vec2::new(700.0, 200.0));
    }
}
