//! Continuous emission bound to moving gameplay entities: thruster
//! exhaust behind each ship and the midpoint history of each bullet.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use neonclash_core::components::{Bullet, Ship, ThrusterEmitter, TrailHistory};
use neonclash_core::constants::*;
use neonclash_core::enums::PlayerId;
use neonclash_core::types::Position;

use crate::systems::effects::{self, EXHAUST_COLORS};

/// Exhaust particles per frame while the ship is moving / idle.
const EXHAUST_MOVING: usize = 3;
const EXHAUST_IDLE: usize = 1;

/// Emit thruster exhaust and record bullet trail midpoints.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng) {
    let mut jets: Vec<(PlayerId, Vec2, usize)> = Vec::new();
    for (_entity, (ship, pos, thruster)) in
        world.query_mut::<(&Ship, &Position, &ThrusterEmitter)>()
    {
        let count = if thruster.moved {
            EXHAUST_MOVING
        } else {
            EXHAUST_IDLE
        };
        jets.push((ship.player, pos.0, count));
    }

    for (player, ship_pos, count) in jets {
        for _ in 0..count {
            // Exhaust leaves from the tail, opposite the facing direction.
            let (x, vx) = if player.facing_left() {
                (
                    ship_pos.x + SHIP_WIDTH + rng.gen_range(0.0..=5.0),
                    rng.gen::<f32>() * 3.0 + 2.0,
                )
            } else {
                (
                    ship_pos.x - rng.gen_range(0.0..=5.0),
                    -(rng.gen::<f32>() * 3.0 + 2.0),
                )
            };
            let y = ship_pos.y + SHIP_HEIGHT / 2.0 + rng.gen_range(-8.0..=8.0);
            let vy = rng.gen::<f32>() * 1.5 - 0.75;

            let exhaust_color = EXHAUST_COLORS[rng.gen_range(0..EXHAUST_COLORS.len())];
            let size = rng.gen_range(2..=5) as f32;
            let lifetime = rng.gen_range(8..=15) as f32;

            effects::spawn_particle(
                world,
                Vec2::new(x, y),
                Vec2::new(vx, vy),
                exhaust_color,
                size,
                lifetime,
                0.0,
            );
        }
    }

    // Bullet trails record the post-move midpoint each frame; the
    // history lives on the bullet entity and dies with it.
    for (_entity, (_bullet, pos, trail)) in
        world.query_mut::<(&Bullet, &Position, &mut TrailHistory)>()
    {
        let midpoint = Vec2::new(
            pos.0.x + BULLET_WIDTH / 2.0,
            pos.0.y + BULLET_HEIGHT / 2.0,
        );
        trail.points.push(midpoint);
        if trail.points.len() > BULLET_TRAIL_CAP {
            trail.points.remove(0);
        }
    }
}
