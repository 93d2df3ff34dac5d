//! Bullet lifecycle and damage resolution.
//!
//! Bullets fly at a fixed speed along their owner's facing direction.
//! On overlap with the opposing ship the bullet is destroyed (its trail
//! dies with it), the victim loses a health point, and a hit burst is
//! emitted. Bullets that leave the arena vanish silently.

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use neonclash_core::color;
use neonclash_core::components::{Bullet, Ship, TrailHistory};
use neonclash_core::constants::*;
use neonclash_core::enums::{PlayerId, RoundOutcome};
use neonclash_core::events::AudioEvent;
use neonclash_core::types::{Position, Rect, Velocity};

use crate::systems::effects;

/// Fire a bullet for `player`. No-op at the live-bullet cap. Spawns the
/// bullet at the muzzle with an empty trail, emits the muzzle flash,
/// and queues the fire sound.
pub fn fire(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    player: PlayerId,
    audio_events: &mut Vec<AudioEvent>,
) {
    let live = world
        .query_mut::<&Bullet>()
        .into_iter()
        .filter(|(_, bullet)| bullet.owner == player)
        .count();
    if live >= MAX_BULLETS {
        return;
    }

    let mut ship_pos = None;
    for (_entity, (ship, pos)) in world.query_mut::<(&Ship, &Position)>() {
        if ship.player == player {
            ship_pos = Some(pos.0);
        }
    }
    let Some(ship_pos) = ship_pos else {
        return;
    };

    let facing_left = player.facing_left();
    let bullet_y = ship_pos.y + SHIP_HEIGHT / 2.0 - BULLET_HEIGHT / 2.0;
    // The muzzle sits on the ship edge the bullet leaves from.
    let (bullet_x, vel_x, muzzle_x) = if facing_left {
        (ship_pos.x - BULLET_WIDTH, -BULLET_VEL, ship_pos.x)
    } else {
        (
            ship_pos.x + SHIP_WIDTH,
            BULLET_VEL,
            ship_pos.x + SHIP_WIDTH,
        )
    };

    world.spawn((
        Bullet { owner: player },
        Position::new(bullet_x, bullet_y),
        Velocity::new(vel_x, 0.0),
        TrailHistory::default(),
    ));

    let muzzle = Vec2::new(muzzle_x, bullet_y + BULLET_HEIGHT / 2.0);
    effects::spawn_muzzle_flash(world, rng, muzzle, facing_left);
    audio_events.push(AudioEvent::BulletFired { player });
}

/// Move every bullet and resolve collisions and arena exits.
pub fn advance_bullets(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    despawn_buffer: &mut Vec<Entity>,
    audio_events: &mut Vec<AudioEvent>,
    shake: &mut f32,
) {
    let mut ships: Vec<(Entity, PlayerId, Rect)> = Vec::new();
    for (entity, (ship, pos)) in world.query_mut::<(&Ship, &Position)>() {
        ships.push((
            entity,
            ship.player,
            Rect::new(pos.0.x, pos.0.y, SHIP_WIDTH, SHIP_HEIGHT),
        ));
    }

    despawn_buffer.clear();
    let mut hits: Vec<(Entity, PlayerId, Vec2)> = Vec::new();

    for (entity, (bullet, pos, vel)) in
        world.query_mut::<(&Bullet, &mut Position, &Velocity)>()
    {
        pos.0 += vel.0;
        let rect = Rect::new(pos.0.x, pos.0.y, BULLET_WIDTH, BULLET_HEIGHT);

        let victim = bullet.owner.opponent();
        if let Some(&(ship_entity, _, ship_rect)) =
            ships.iter().find(|(_, player, _)| *player == victim)
        {
            if rect.intersects(&ship_rect) {
                hits.push((ship_entity, victim, ship_rect.center()));
                despawn_buffer.push(entity);
                continue;
            }
        }

        let gone = if bullet.owner.facing_left() {
            pos.0.x < 0.0
        } else {
            pos.0.x > ARENA_WIDTH
        };
        if gone {
            despawn_buffer.push(entity);
        }
    }

    // Despawning the bullet entity also drops its trail component.
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    for (ship_entity, victim, impact) in hits {
        if let Ok(mut ship) = world.get::<&mut Ship>(ship_entity) {
            ship.health -= 1;
            ship.flash_frames = HIT_FLASH_FRAMES;
        }
        let burst_color = match victim {
            PlayerId::Red => color::ORANGE,
            PlayerId::Yellow => color::YELLOW,
        };
        effects::spawn_hit_burst(world, rng, impact, burst_color, shake);
        audio_events.push(AudioEvent::BulletHit { victim });
    }
}

/// Check for destroyed ships. If a ship reached zero health the round
/// is over; a simultaneous double kill is an explicit draw rather than
/// an arbitrary winner. Victory bursts are emitted at each wreck in the
/// wrecked ship's color.
pub fn detect_round_end(world: &mut World, rng: &mut ChaCha8Rng) -> Option<RoundOutcome> {
    let mut yellow_wreck = None;
    let mut red_wreck = None;
    for (_entity, (ship, pos)) in world.query_mut::<(&Ship, &Position)>() {
        if ship.health <= 0 {
            let center = Rect::new(pos.0.x, pos.0.y, SHIP_WIDTH, SHIP_HEIGHT).center();
            match ship.player {
                PlayerId::Yellow => yellow_wreck = Some(center),
                PlayerId::Red => red_wreck = Some(center),
            }
        }
    }

    let outcome = match (yellow_wreck, red_wreck) {
        (Some(_), Some(_)) => RoundOutcome::Draw,
        (Some(_), None) => RoundOutcome::RedWins,
        (None, Some(_)) => RoundOutcome::YellowWins,
        (None, None) => return None,
    };

    if let Some(center) = red_wreck {
        effects::spawn_victory_burst(world, rng, center, color::RED);
    }
    if let Some(center) = yellow_wreck {
        effects::spawn_victory_burst(world, rng, center, color::YELLOW);
    }

    Some(outcome)
}
