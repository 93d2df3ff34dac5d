//! Particle, spark, and energy-ring effects: emission recipes plus the
//! per-tick advance.
//!
//! Every emission is a fixed recipe of randomized sub-bursts. Emitted
//! entities are self-limiting: each carries a finite lifetime (or a
//! radius bound) and cleanup despawns the dead ones each tick.

use std::f32::consts::TAU;

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use neonclash_core::color::{self, Color};
use neonclash_core::components::{
    EnergyRing, Lifetime, ParticleMotion, ParticleVisual, SparkTrail,
};
use neonclash_core::constants::{EXPLOSION_GRAVITY, PARTICLE_DRAG, SHAKE_ON_HIT, SPARK_TRAIL_CAP};
use neonclash_core::types::{Position, Velocity};

/// Thruster exhaust palette: cool blues and white.
pub const EXHAUST_COLORS: [Color; 5] = [
    color::CYAN,
    color::ELECTRIC_BLUE,
    color::WHITE,
    color::NEON_BLUE,
    color::ICE_BLUE,
];

/// Muzzle flash palette: hot whites and yellows.
const FLASH_COLORS: [Color; 4] = [
    color::WHITE,
    color::YELLOW,
    color::ORANGE,
    color::BRIGHT_YELLOW,
];

/// Spawn a single particle entity.
pub fn spawn_particle(
    world: &mut World,
    pos: Vec2,
    vel: Vec2,
    particle_color: Color,
    size: f32,
    lifetime: f32,
    gravity: f32,
) -> hecs::Entity {
    world.spawn((
        Position(pos),
        Velocity(vel),
        Lifetime {
            remaining: lifetime,
            max: lifetime,
        },
        ParticleVisual {
            color: particle_color,
            base_size: size,
            size,
            fade: true,
        },
        ParticleMotion {
            gravity,
            damping: PARTICLE_DRAG,
        },
    ))
}

/// Spawn a spark: a small short-lived particle that also records a
/// streak of its recent positions.
pub fn spawn_spark(world: &mut World, rng: &mut ChaCha8Rng, pos: Vec2, spark_color: Color, vel: Vec2) {
    let lifetime = rng.gen_range(10..=25) as f32;
    world.spawn((
        Position(pos),
        Velocity(vel),
        Lifetime {
            remaining: lifetime,
            max: lifetime,
        },
        ParticleVisual {
            color: spark_color,
            base_size: 2.0,
            size: 2.0,
            fade: true,
        },
        ParticleMotion {
            gravity: 0.0,
            damping: PARTICLE_DRAG,
        },
        SparkTrail::default(),
    ));
}

/// Spawn an expanding ring. Radius starts at zero and the ring dies
/// once it reaches `max_radius`, after exactly `max_radius / growth`
/// advances.
pub fn spawn_ring(world: &mut World, pos: Vec2, ring_color: Color, max_radius: f32, growth: f32) {
    world.spawn((
        Position(pos),
        EnergyRing {
            radius: 0.0,
            max_radius,
            growth,
            color: ring_color,
        },
    ));
}

/// Full explosion: two rings, `count` debris particles with per-particle
/// color jitter and a little gravity, and ten bright sparks.
pub fn spawn_explosion(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pos: Vec2,
    base_color: Color,
    count: usize,
    speed_mult: f32,
) {
    spawn_ring(world, pos, base_color, 80.0, 4.0);
    spawn_ring(world, pos, color::WHITE, 50.0, 6.0);

    for _ in 0..count {
        let angle = rng.gen::<f32>() * TAU;
        let speed = (rng.gen::<f32>() * 5.0 + 2.0) * speed_mult;
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        let size = rng.gen_range(2..=6) as f32;
        let lifetime = rng.gen_range(25..=50) as f32;
        let varied = base_color.jittered(rng.gen_range(-40i16..=40));
        spawn_particle(world, pos, vel, varied, size, lifetime, EXPLOSION_GRAVITY);
    }

    for _ in 0..10 {
        let angle = rng.gen::<f32>() * TAU;
        let speed = rng.gen::<f32>() * 8.0 + 3.0;
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        spawn_spark(world, rng, pos, color::WHITE, vel);
    }
}

/// Bullet-impact burst: kicks the screen shake, adds a ring, a reduced
/// explosion, and eight extra sparks.
pub fn spawn_hit_burst(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pos: Vec2,
    base_color: Color,
    shake: &mut f32,
) {
    *shake = SHAKE_ON_HIT;

    spawn_ring(world, pos, base_color, 60.0, 5.0);
    spawn_explosion(world, rng, pos, base_color, 20, 0.9);

    for _ in 0..8 {
        let angle = rng.gen::<f32>() * TAU;
        let speed = rng.gen::<f32>() * 6.0 + 2.0;
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        spawn_spark(world, rng, pos, color::WHITE, vel);
    }
}

/// Short-lived flash at the muzzle, biased along the firing direction.
pub fn spawn_muzzle_flash(world: &mut World, rng: &mut ChaCha8Rng, pos: Vec2, facing_left: bool) {
    let base_vx = if facing_left { -5.0 } else { 5.0 };

    for _ in 0..12 {
        let vel = Vec2::new(
            base_vx + rng.gen::<f32>() * 4.0 - 2.0,
            rng.gen::<f32>() * 3.0 - 1.5,
        );
        let flash_color = FLASH_COLORS[rng.gen_range(0..FLASH_COLORS.len())];
        let size = rng.gen_range(2..=4) as f32;
        spawn_particle(world, pos, vel, flash_color, size, 10.0, 0.0);
    }

    for _ in 0..5 {
        let vel = Vec2::new(
            base_vx * 1.5 + rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
        );
        spawn_spark(world, rng, pos, color::WHITE, vel);
    }
}

/// Round-ending cascade: five staggered rings, four concentric bursts
/// with cycling colors, a cloud of sparkles, and a final spray of
/// sparks. Emitted once, at the destroyed ship's center.
pub fn spawn_victory_burst(world: &mut World, rng: &mut ChaCha8Rng, pos: Vec2, base_color: Color) {
    for i in 0..5 {
        let max_radius = 30.0 + i as f32 * 40.0 + 60.0;
        spawn_ring(world, pos, base_color, max_radius, 3.0 + i as f32);
    }

    let cycle = [base_color, color::CYAN, color::MAGENTA, color::WHITE];
    for ring in 0..4usize {
        for i in 0..25 {
            let angle = (i as f32 / 25.0) * TAU + ring as f32 * 0.3;
            let speed = 4.0 + ring as f32 * 2.5;
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            let lifetime = 60.0 + ring as f32 * 15.0;
            spawn_particle(world, pos, vel, cycle[ring % 4], 5.0, lifetime, 0.0);
        }
    }

    let sparkle_colors = [
        color::WHITE,
        color::CYAN,
        color::MAGENTA,
        color::YELLOW,
        base_color,
        color::NEON_PINK,
    ];
    for _ in 0..50 {
        let angle = rng.gen::<f32>() * TAU;
        let speed = rng.gen::<f32>() * 10.0 + 3.0;
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        let sparkle = sparkle_colors[rng.gen_range(0..sparkle_colors.len())];
        let size = rng.gen_range(2..=7) as f32;
        let lifetime = rng.gen_range(50..=100) as f32;
        spawn_particle(world, pos, vel, sparkle, size, lifetime, 0.0);
    }

    for _ in 0..20 {
        let spark_color = if rng.gen_bool(0.5) {
            color::WHITE
        } else {
            base_color
        };
        let vel = Vec2::new(
            rng.gen::<f32>() * 16.0 - 8.0,
            rng.gen::<f32>() * 16.0 - 8.0,
        );
        spawn_spark(world, rng, pos, spark_color, vel);
    }
}

/// Advance every live particle, spark, and ring by one frame.
pub fn run(world: &mut World) {
    // Record spark streaks before integration so the streak trails the
    // particle rather than including its new position.
    for (_entity, (pos, trail)) in world.query_mut::<(&Position, &mut SparkTrail)>() {
        trail.points.push(pos.0);
        if trail.points.len() > SPARK_TRAIL_CAP {
            trail.points.remove(0);
        }
    }

    for (_entity, (pos, vel, life, visual, motion)) in world.query_mut::<(
        &mut Position,
        &mut Velocity,
        &mut Lifetime,
        &mut ParticleVisual,
        &ParticleMotion,
    )>() {
        pos.0 += vel.0;
        vel.0.y += motion.gravity;
        vel.0 *= motion.damping;
        life.remaining -= 1.0;

        if visual.fade {
            let ratio = (life.remaining / life.max).max(0.0);
            visual.size = visual.base_size * ratio;
        }
    }

    for (_entity, ring) in world.query_mut::<&mut EnergyRing>() {
        ring.radius += ring.growth;
    }
}
