//! Ambient starfield: layered parallax drift, edge wrapping, and the
//! occasional shooting star. Purely decorative and independent of
//! gameplay state; runs every tick, end screen included.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use neonclash_core::color::Color;
use neonclash_core::components::{Lifetime, ShootingStar, Star};
use neonclash_core::constants::*;
use neonclash_core::types::{Position, Velocity};

/// Subtle color casts a star can carry.
const STAR_TINTS: [Color; 5] = [
    Color::new(0, 0, 0),
    Color::new(30, 0, 0),
    Color::new(0, 0, 30),
    Color::new(20, 20, 0),
    Color::new(0, 20, 20),
];

/// Re-roll a star's visual properties. Layer is preserved; speed and
/// size scale with it.
pub fn randomize_star(star: &mut Star, rng: &mut ChaCha8Rng) {
    star.speed = (0.3 + rng.gen::<f32>()) * star.layer as f32;
    star.size = (rng.gen::<f32>() * 2.0 + star.layer as f32 * 0.5).floor().max(1.0);
    star.brightness = rng.gen_range(150..=255);
    star.twinkle_speed = rng.gen::<f32>() * 0.15 + 0.05;
    star.twinkle_phase = rng.gen::<f32>() * std::f32::consts::TAU;
    star.tint = STAR_TINTS[rng.gen_range(0..STAR_TINTS.len())];
}

/// Drift stars leftward, wrap departed ones, roll for shooting-star
/// spawns, and advance live shooting stars.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng) {
    for (_entity, (star, pos)) in world.query_mut::<(&mut Star, &mut Position)>() {
        pos.0.x -= star.speed;
        if pos.0.x < -5.0 {
            pos.0.x = ARENA_WIDTH + rng.gen_range(10.0..=50.0);
            pos.0.y = rng.gen_range(0.0..=ARENA_HEIGHT);
            randomize_star(star, rng);
        }
    }

    let live = world.query_mut::<&ShootingStar>().into_iter().count();
    if live < SHOOTING_STAR_CAP && rng.gen_bool(SHOOTING_STAR_CHANCE) {
        spawn_shooting_star(world, rng);
    }

    for (_entity, (_meteor, pos, vel, life)) in
        world.query_mut::<(&ShootingStar, &mut Position, &Velocity, &mut Lifetime)>()
    {
        pos.0 += vel.0;
        life.remaining -= 1.0;
    }
}

/// Launch a meteor from the upper-right region on a down-left streak.
fn spawn_shooting_star(world: &mut World, rng: &mut ChaCha8Rng) {
    let x = rng.gen_range(ARENA_WIDTH / 2.0..=ARENA_WIDTH);
    let y = rng.gen_range(0.0..=ARENA_HEIGHT / 3.0);
    let speed = rng.gen_range(15.0..=25.0);
    let angle = rng.gen::<f32>() * 0.5 + 0.2;
    let vel = Vec2::new(-speed * angle.cos(), speed * angle.sin());
    let length = rng.gen_range(30.0..=60.0);

    world.spawn((
        ShootingStar { length },
        Position::new(x, y),
        Velocity(vel),
        Lifetime {
            remaining: SHOOTING_STAR_LIFETIME,
            max: SHOOTING_STAR_LIFETIME,
        },
    ));
}
