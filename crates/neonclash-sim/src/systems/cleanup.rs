//! Cleanup system: removes entities whose lifetime has run out or whose
//! bound has been exceeded.
//!
//! Dead entities are collected into a pre-allocated buffer and
//! despawned afterwards — never removed mid-iteration.

use hecs::{Entity, World};

use neonclash_core::components::{EnergyRing, Lifetime, ShootingStar};
use neonclash_core::constants::ARENA_HEIGHT;
use neonclash_core::types::Position;

/// Collect and despawn everything that is no longer alive.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    // Particles, sparks, and shooting stars: dead once the countdown ends.
    for (entity, life) in world.query_mut::<&Lifetime>() {
        if life.remaining <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    // Rings: dead once fully expanded.
    for (entity, ring) in world.query_mut::<&EnergyRing>() {
        if ring.radius >= ring.max_radius {
            despawn_buffer.push(entity);
        }
    }

    // Shooting stars also die on leaving the arena.
    for (entity, (_meteor, pos)) in world.query_mut::<(&ShootingStar, &Position)>() {
        if pos.0.x < -50.0 || pos.0.y > ARENA_HEIGHT + 50.0 {
            despawn_buffer.push(entity);
        }
    }

    // An entity may be collected twice (expired and out of bounds);
    // the second despawn is a harmless no-op.
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
