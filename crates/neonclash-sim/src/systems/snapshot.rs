//! Snapshot builder — flattens the world into the read-only views the
//! render pass consumes. Derived visual state (fade alpha, twinkle,
//! glow) is computed here so drawing never mutates anything.

use hecs::World;

use neonclash_core::color::Color;
use neonclash_core::components::{
    Bullet, EnergyRing, Lifetime, ParticleVisual, Ship, ShootingStar, SparkTrail, Star,
    TrailHistory,
};
use neonclash_core::constants::*;
use neonclash_core::enums::{ControlScheme, GamePhase, PlayerId, RoundOutcome};
use neonclash_core::events::AudioEvent;
use neonclash_core::state::*;
use neonclash_core::types::{Position, Rect, SimTime, Velocity};

/// Build the complete frame snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    control_scheme: ControlScheme,
    outcome: Option<RoundOutcome>,
    shake: f32,
    audio_events: Vec<AudioEvent>,
) -> RenderSnapshot {
    let mut snapshot = RenderSnapshot {
        time: *time,
        phase,
        control_scheme,
        outcome,
        shake_magnitude: shake,
        audio_events,
        ..Default::default()
    };

    let mut live_yellow = 0usize;
    let mut live_red = 0usize;
    for (_entity, (bullet, pos, trail)) in
        world.query::<(&Bullet, &Position, &TrailHistory)>().iter()
    {
        match bullet.owner {
            PlayerId::Yellow => live_yellow += 1,
            PlayerId::Red => live_red += 1,
        }
        snapshot.bullets.push(BulletView {
            owner: bullet.owner,
            rect: Rect::new(pos.0.x, pos.0.y, BULLET_WIDTH, BULLET_HEIGHT),
        });
        snapshot.trails.push(TrailView {
            owner: bullet.owner,
            points: trail.points.clone(),
        });
    }

    for (_entity, (ship, pos)) in world.query::<(&Ship, &Position)>().iter() {
        let live = match ship.player {
            PlayerId::Yellow => live_yellow,
            PlayerId::Red => live_red,
        };
        snapshot.ships.push(ShipView {
            player: ship.player,
            rect: Rect::new(pos.0.x, pos.0.y, SHIP_WIDTH, SHIP_HEIGHT),
            health: ship.health,
            ammo: MAX_BULLETS.saturating_sub(live) as u32,
            flash_frames: ship.flash_frames,
        });
    }

    for (_entity, (pos, life, visual, spark_trail)) in world
        .query::<(&Position, &Lifetime, &ParticleVisual, Option<&SparkTrail>)>()
        .iter()
    {
        let alpha = if visual.fade {
            (life.remaining / life.max).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let view = ParticleView {
            position: pos.0,
            size: visual.size,
            color: visual.color,
            alpha,
            glow: visual.size > 2.0,
        };
        match spark_trail {
            Some(trail) => snapshot.sparks.push(SparkView {
                particle: view,
                trail: trail.points.clone(),
            }),
            None => snapshot.particles.push(view),
        }
    }

    for (_entity, (ring, pos)) in world.query::<(&EnergyRing, &Position)>().iter() {
        let alpha = (1.0 - ring.radius / ring.max_radius).clamp(0.0, 1.0);
        snapshot.rings.push(RingView {
            center: pos.0,
            radius: ring.radius,
            color: ring.color,
            alpha,
            width: (3.0 * alpha).max(1.0),
        });
    }

    for (_entity, (star, pos)) in world.query::<(&Star, &Position)>().iter() {
        let twinkle =
            (time.frame as f32 * star.twinkle_speed + star.twinkle_phase).sin() * 0.4 + 0.6;
        let level = star.brightness as f32 * twinkle;
        let color = Color::new(
            (level + star.tint.r as f32).min(255.0) as u8,
            (level + star.tint.g as f32).min(255.0) as u8,
            (level + star.tint.b as f32).min(255.0) as u8,
        );
        snapshot.stars.push(StarView {
            position: pos.0,
            size: star.size,
            color,
            halo: star.size > 1.0 && twinkle > 0.8,
        });
    }

    for (_entity, (meteor, pos, vel, life)) in world
        .query::<(&ShootingStar, &Position, &Velocity, &Lifetime)>()
        .iter()
    {
        snapshot.shooting_stars.push(ShootingStarView {
            position: pos.0,
            velocity: vel.0,
            length: meteor.length,
            alpha: (life.remaining / life.max).clamp(0.0, 1.0),
        });
    }

    snapshot
}
