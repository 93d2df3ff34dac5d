//! Entity spawn factories for setting up the simulation world.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use neonclash_core::components::{Ship, ShootingStar, Star, ThrusterEmitter};
use neonclash_core::constants::*;
use neonclash_core::enums::PlayerId;
use neonclash_core::types::Position;

use crate::systems::starfield;

/// Spawn the three parallax star layers at random positions. Done once
/// at engine creation; the starfield persists across rounds.
pub fn spawn_starfield(world: &mut World, rng: &mut ChaCha8Rng) {
    let layers = [
        (1u8, STAR_COUNT_LAYER1),
        (2u8, STAR_COUNT_LAYER2),
        (3u8, STAR_COUNT_LAYER3),
    ];
    for (layer, count) in layers {
        for _ in 0..count {
            let mut star = Star {
                layer,
                speed: 0.0,
                size: 0.0,
                brightness: 0,
                twinkle_speed: 0.0,
                twinkle_phase: 0.0,
                tint: neonclash_core::color::BLACK,
            };
            starfield::randomize_star(&mut star, rng);
            let pos = Position::new(
                rng.gen_range(0.0..=ARENA_WIDTH),
                rng.gen_range(0.0..=ARENA_HEIGHT),
            );
            world.spawn((star, pos));
        }
    }
}

/// Spawn both ships at their posts with full health and idle thrusters.
pub fn spawn_ships(world: &mut World) {
    for (player, x) in [
        (PlayerId::Yellow, YELLOW_SPAWN_X),
        (PlayerId::Red, RED_SPAWN_X),
    ] {
        world.spawn((
            Ship {
                player,
                health: MAX_HEALTH,
                flash_frames: 0,
            },
            Position::new(x, SHIP_SPAWN_Y),
            ThrusterEmitter::default(),
        ));
    }
}

/// Discard the current round: despawn every entity except the ambient
/// starfield, then respawn fresh ships.
pub fn reset_round(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for entity_ref in world.iter() {
        if !entity_ref.has::<Star>() && !entity_ref.has::<ShootingStar>() {
            despawn_buffer.push(entity_ref.entity());
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    spawn_ships(world);
}
