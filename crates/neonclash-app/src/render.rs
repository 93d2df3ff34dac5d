//! The composed render pass: turns a `RenderSnapshot` into draw calls.
//!
//! Strictly a read of the snapshot — nothing here mutates game state.
//! Draw order is back to front: backdrop, starfield, border, effects,
//! gameplay entities, HUD, end-screen banner.

use glam::Vec2;

use neonclash_core::color::{self, Color};
use neonclash_core::constants::*;
use neonclash_core::enums::{GamePhase, PlayerId, RoundOutcome};
use neonclash_core::state::*;
use neonclash_core::types::Rect;

use crate::platform::{RenderSurface, SpriteId};

const BACKDROP: Color = Color::new(5, 5, 15);
const FLASH_YELLOW: Color = Color::new(255, 255, 200);
const FLASH_RED: Color = Color::new(255, 200, 200);

/// Draw one complete frame from the snapshot.
pub fn draw_frame<S: RenderSurface>(surface: &mut S, snap: &RenderSnapshot) {
    surface.clear(BACKDROP);
    surface.draw_sprite(SpriteId::Background, Vec2::ZERO);

    draw_starfield(surface, snap);
    draw_border(surface, snap.time.frame);

    for ring in &snap.rings {
        surface.stroke_circle(
            ring.center,
            ring.radius,
            ring.color.scaled(ring.alpha),
            ring.width,
        );
    }
    for particle in &snap.particles {
        draw_particle(surface, particle);
    }
    for spark in &snap.sparks {
        draw_spark(surface, spark);
    }

    match snap.phase {
        GamePhase::Active => {
            for trail in &snap.trails {
                draw_trail(surface, trail);
            }
            for ship in &snap.ships {
                draw_ship(surface, ship);
            }
            for bullet in &snap.bullets {
                let glow_color = match bullet.owner {
                    PlayerId::Yellow => color::BRIGHT_YELLOW,
                    PlayerId::Red => color::BRIGHT_RED,
                };
                draw_glow_rect(surface, glow_color, bullet.rect, 4);
            }
            draw_hud(surface, snap);
        }
        GamePhase::RoundOver => {
            if let Some(outcome) = snap.outcome {
                draw_banner(surface, outcome, snap.time.frame);
            }
        }
    }
}

fn draw_starfield<S: RenderSurface>(surface: &mut S, snap: &RenderSnapshot) {
    for star in &snap.stars {
        if star.halo {
            surface.fill_circle(star.position, star.size + 2.0, star.color.scaled(0.33));
        }
        surface.fill_circle(star.position, star.size, star.color);
    }

    for meteor in &snap.shooting_stars {
        let segments = meteor.length as i32;
        for i in 0..segments {
            let t = i as f32 / meteor.length;
            let point = meteor.position - meteor.velocity * t * 0.5;
            let level = 255.0 * (1.0 - t) * meteor.alpha;
            if level <= 0.0 {
                continue;
            }
            let gray = Color::new(level as u8, level as u8, level as u8);
            surface.fill_circle(point, (3.0 * (1.0 - t)).max(1.0), gray);
        }
    }
}

/// The pulsing neon divider between the two halves.
fn draw_border<S: RenderSurface>(surface: &mut S, frame: u64) {
    let pulse = (frame as f32 * 0.08).sin() * 0.4 + 0.6;
    let border = Rect::new(BORDER_LEFT, 0.0, BORDER_WIDTH, ARENA_HEIGHT);

    for i in (2..=12).rev().step_by(2) {
        let glow = pulse / (i as f32 * 0.5);
        let glow_color = Color::new(0, (180.0 * glow) as u8, (255.0 * glow).min(255.0) as u8);
        let inflated = Rect::new(
            border.x - i as f32,
            border.y,
            border.w + i as f32 * 2.0,
            border.h,
        );
        surface.fill_rect(inflated, glow_color, 0.0);
    }
    let core = Color::new(0, (200.0 * pulse) as u8, (200.0 * pulse + 50.0).min(255.0) as u8);
    surface.fill_rect(border, core, 0.0);
    surface.stroke_rect(border, color::WHITE, 1.0, 0.0);
}

fn draw_particle<S: RenderSurface>(surface: &mut S, particle: &ParticleView) {
    if particle.size <= 0.5 {
        return;
    }
    let lit = particle.color.scaled(particle.alpha);
    if particle.glow {
        surface.fill_circle(particle.position, particle.size * 2.0, lit.scaled(0.33));
    }
    surface.fill_circle(particle.position, particle.size.max(1.0), lit);
}

/// Sparks draw their streak dimmest-oldest to brightest-newest, then
/// the head particle on top.
fn draw_spark<S: RenderSurface>(surface: &mut S, spark: &SparkView) {
    let count = spark.trail.len();
    for (i, point) in spark.trail.iter().enumerate() {
        let fade = (i + 1) as f32 / count as f32 * spark.particle.alpha;
        let size = (spark.particle.size * fade).max(1.0);
        surface.fill_circle(*point, size, spark.particle.color.scaled(fade));
    }
    draw_particle(surface, &spark.particle);
}

fn draw_trail<S: RenderSurface>(surface: &mut S, trail: &TrailView) {
    if trail.points.len() < 2 {
        return;
    }
    let base = match trail.owner {
        PlayerId::Yellow => color::YELLOW,
        PlayerId::Red => color::RED,
    };
    let count = trail.points.len();
    for i in 0..count - 1 {
        let fade = (i + 1) as f32 / count as f32;
        surface.line(
            trail.points[i],
            trail.points[i + 1],
            base.scaled(fade),
            (4.0 * fade).floor() + 1.0,
        );
    }
    // Dim wide underglow beneath the whole trail.
    for i in 0..count - 1 {
        surface.line(trail.points[i], trail.points[i + 1], base.scaled(0.25), 6.0);
    }
}

fn draw_ship<S: RenderSurface>(surface: &mut S, ship: &ShipView) {
    if ship.flash_frames > 0 {
        let intensity = (ship.flash_frames as f32 / 10.0).min(1.0);
        let flash = match ship.player {
            PlayerId::Yellow => FLASH_YELLOW,
            PlayerId::Red => FLASH_RED,
        };
        let halo = Rect::new(
            ship.rect.x - 5.0,
            ship.rect.y - 5.0,
            ship.rect.w + 10.0,
            ship.rect.h + 10.0,
        );
        surface.fill_rect(halo, flash.scaled(0.6 * intensity), 4.0);
    }
    let sprite = match ship.player {
        PlayerId::Yellow => SpriteId::YellowShip,
        PlayerId::Red => SpriteId::RedShip,
    };
    surface.draw_sprite(sprite, Vec2::new(ship.rect.x, ship.rect.y));
}

/// Layered glow rectangle, used for bullets.
fn draw_glow_rect<S: RenderSurface>(surface: &mut S, base: Color, rect: Rect, glow_size: i32) {
    for i in (1..=glow_size).rev() {
        let glow = base.scaled(0.3 / i as f32);
        let inflated = Rect::new(
            rect.x - i as f32 * 1.5,
            rect.y - i as f32 * 1.5,
            rect.w + i as f32 * 3.0,
            rect.h + i as f32 * 3.0,
        );
        surface.fill_rect(inflated, glow, 3.0);
    }
    surface.fill_rect(rect, base, 2.0);
    surface.line(
        Vec2::new(rect.x + 2.0, rect.y + 1.0),
        Vec2::new(rect.right() - 2.0, rect.y + 1.0),
        base.lightened(80),
        1.0,
    );
}

fn draw_hud<S: RenderSurface>(surface: &mut S, snap: &RenderSnapshot) {
    for ship in &snap.ships {
        let (bar_x, label, label_x, ammo_x, accent) = match ship.player {
            PlayerId::Yellow => (15.0, "YELLOW", 15.0, 15.0, color::YELLOW),
            PlayerId::Red => (
                ARENA_WIDTH - 175.0,
                "RED",
                ARENA_WIDTH - 45.0,
                ARENA_WIDTH - 69.0,
                color::RED,
            ),
        };
        draw_health_bar(surface, Vec2::new(bar_x, 15.0), ship.health, accent);
        surface.draw_text(label, Vec2::new(label_x, 42.0), 16.0, accent);
        draw_ammo_pips(surface, Vec2::new(ammo_x, 65.0), ship.ammo, accent);
    }
}

fn draw_health_bar<S: RenderSurface>(surface: &mut S, pos: Vec2, health: i32, accent: Color) {
    const BAR_W: f32 = 160.0;
    const BAR_H: f32 = 22.0;

    let plate = Rect::new(pos.x - 3.0, pos.y - 3.0, BAR_W + 6.0, BAR_H + 6.0);
    surface.fill_rect(plate, Color::new(20, 20, 30), 6.0);
    let well = Rect::new(pos.x, pos.y, BAR_W, BAR_H);
    surface.fill_rect(well, Color::new(40, 40, 50), 4.0);

    let filled = (health.max(0) as f32 / MAX_HEALTH as f32) * BAR_W;
    if filled > 0.0 {
        let fill = Rect::new(pos.x, pos.y, filled, BAR_H);
        surface.fill_rect(fill, accent, 4.0);
        surface.line(
            Vec2::new(pos.x + 1.0, pos.y + 1.0),
            Vec2::new(pos.x + filled - 1.0, pos.y + 1.0),
            accent.lightened(100),
            2.0,
        );
        surface.fill_rect(
            Rect::new(pos.x + filled - 3.0, pos.y, 3.0, BAR_H),
            color::WHITE,
            1.0,
        );
    }
    surface.stroke_rect(well, accent, 2.0, 4.0);
}

fn draw_ammo_pips<S: RenderSurface>(surface: &mut S, pos: Vec2, ammo: u32, accent: Color) {
    for i in 0..MAX_BULLETS as u32 {
        let pip = Rect::new(pos.x + i as f32 * 18.0, pos.y, 12.0, 8.0);
        if i < ammo {
            surface.fill_rect(
                Rect::new(pip.x - 2.0, pip.y - 2.0, pip.w + 4.0, pip.h + 4.0),
                accent.scaled(0.25),
                3.0,
            );
            surface.fill_rect(pip, accent, 2.0);
            surface.fill_rect(Rect::new(pip.x, pip.y, pip.w, 3.0), color::WHITE, 1.0);
        } else {
            surface.fill_rect(pip, Color::new(30, 30, 40), 2.0);
            surface.stroke_rect(pip, Color::new(50, 50, 60), 1.0, 2.0);
        }
    }
}

fn draw_banner<S: RenderSurface>(surface: &mut S, outcome: RoundOutcome, frame: u64) {
    let banner_color = match outcome.winner() {
        Some(PlayerId::Yellow) => color::YELLOW,
        Some(PlayerId::Red) => color::RED,
        None => color::WHITE,
    };

    const BOX_W: f32 = 550.0;
    const BOX_H: f32 = 220.0;
    let panel = Rect::new(
        ARENA_WIDTH / 2.0 - BOX_W / 2.0,
        ARENA_HEIGHT / 2.0 - BOX_H / 2.0,
        BOX_W,
        BOX_H,
    );

    for i in (1..=8).rev() {
        let glow = banner_color.scaled(0.15 / i as f32);
        let inflated = Rect::new(
            panel.x - i as f32 * 3.0,
            panel.y - i as f32 * 3.0,
            panel.w + i as f32 * 6.0,
            panel.h + i as f32 * 6.0,
        );
        surface.fill_rect(inflated, glow, 20.0);
    }
    surface.fill_rect(panel, Color::new(15, 15, 25), 15.0);
    surface.stroke_rect(panel, banner_color, 3.0, 15.0);

    let pulse = (frame as f32 * 0.1).sin() * 0.1 + 0.9;
    let text = outcome.banner_text();
    surface.draw_text(
        text,
        Vec2::new(ARENA_WIDTH / 2.0 - text.len() as f32 * 20.0, ARENA_HEIGHT / 2.0 - 50.0),
        80.0,
        banner_color.scaled(pulse),
    );

    let blink = ((frame as f32 * 0.12).sin() + 1.0) * 60.0 + 135.0;
    let hint = Color::new(blink as u8, blink as u8, blink as u8);
    surface.draw_text(
        "R - Restart  |  1/2 - Controls  |  ESC - Quit",
        Vec2::new(ARENA_WIDTH / 2.0 - 180.0, ARENA_HEIGHT / 2.0 + 50.0),
        24.0,
        hint,
    );
}
