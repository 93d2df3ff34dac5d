//! Tests for the simulation engine: determinism, bullet lifecycle,
//! damage resolution, movement clamps, and effect-entity lifetimes.

use glam::Vec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use neonclash_core::color;
use neonclash_core::commands::{FrameInput, MoveAxes, PlayerCommand};
use neonclash_core::components::{
    Bullet, EnergyRing, Lifetime, ParticleVisual, Ship, SparkTrail, Star, TrailHistory,
};
use neonclash_core::constants::*;
use neonclash_core::enums::*;
use neonclash_core::events::AudioEvent;
use neonclash_core::state::RenderSnapshot;
use neonclash_core::types::{Position, Velocity};

use crate::engine::{RoundEngine, SimConfig};
use crate::systems::{cleanup, effects};

fn idle_input() -> FrameInput {
    FrameInput::default()
}

fn held(left: bool, right: bool, up: bool, down: bool) -> MoveAxes {
    MoveAxes {
        left,
        right,
        up,
        down,
    }
}

fn bullet_count(engine: &RoundEngine, player: PlayerId) -> usize {
    engine
        .world()
        .query::<&Bullet>()
        .iter()
        .filter(|(_, b)| b.owner == player)
        .count()
}

fn trail_count(engine: &RoundEngine) -> usize {
    engine.world().query::<&TrailHistory>().iter().count()
}

fn ship_health(engine: &RoundEngine, player: PlayerId) -> i32 {
    engine
        .world()
        .query::<&Ship>()
        .iter()
        .find(|(_, s)| s.player == player)
        .map(|(_, s)| s.health)
        .expect("ship missing")
}

/// Tick until the given player takes a hit, or panic after `limit`.
fn tick_until_hit(engine: &mut RoundEngine, victim: PlayerId, limit: usize) -> RenderSnapshot {
    for _ in 0..limit {
        let snap = engine.tick(&idle_input());
        if snap
            .audio_events
            .iter()
            .any(|e| matches!(e, AudioEvent::BulletHit { victim: v } if *v == victim))
        {
            return snap;
        }
    }
    panic!("no hit on {:?} within {} ticks", victim, limit);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = RoundEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = RoundEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    for frame in 0..300u64 {
        let mut input = idle_input();
        input.yellow = held(false, frame % 2 == 0, frame % 3 == 0, false);
        input.red = held(frame % 5 == 0, false, false, frame % 4 == 0);
        if frame % 37 == 0 {
            engine_a.queue_command(PlayerCommand::Fire {
                player: PlayerId::Yellow,
            });
            engine_b.queue_command(PlayerCommand::Fire {
                player: PlayerId::Yellow,
            });
        }
        if frame % 53 == 0 {
            engine_a.queue_command(PlayerCommand::Fire {
                player: PlayerId::Red,
            });
            engine_b.queue_command(PlayerCommand::Fire {
                player: PlayerId::Red,
            });
        }

        let snap_a = engine_a.tick(&input);
        let snap_b = engine_b.tick(&input);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = RoundEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = RoundEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    // The starfield is seeded at creation, so snapshots diverge right away.
    let snap_a = engine_a.tick(&idle_input());
    let snap_b = engine_b.tick(&idle_input());
    let json_a = serde_json::to_string(&snap_a).unwrap();
    let json_b = serde_json::to_string(&snap_b).unwrap();
    assert_ne!(json_a, json_b, "different seeds should produce divergent output");
}

// ---- Firing ----

#[test]
fn test_fire_spawns_bullet_at_muzzle() {
    let mut engine = RoundEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::Yellow,
    });
    engine.tick(&idle_input());

    let world = engine.world();
    let mut q = world.query::<(&Bullet, &Position, &Velocity)>();
    let bullets: Vec<_> = q.iter().collect();
    assert_eq!(bullets.len(), 1);

    let (_, (bullet, pos, vel)) = bullets[0];
    assert_eq!(bullet.owner, PlayerId::Yellow);
    // Muzzle is the ship's right edge, vertically centered on the hull;
    // the bullet has moved one frame by snapshot time.
    assert_eq!(pos.0.x, YELLOW_SPAWN_X + SHIP_WIDTH + BULLET_VEL);
    assert_eq!(
        pos.0.y,
        SHIP_SPAWN_Y + SHIP_HEIGHT / 2.0 - BULLET_HEIGHT / 2.0
    );
    assert_eq!(vel.0, Vec2::new(BULLET_VEL, 0.0));
}

#[test]
fn test_fire_cap_at_three_bullets() {
    let mut engine = RoundEngine::new(SimConfig::default());
    for _ in 0..5 {
        engine.queue_command(PlayerCommand::Fire {
            player: PlayerId::Yellow,
        });
    }
    let snap = engine.tick(&idle_input());

    assert_eq!(bullet_count(&engine, PlayerId::Yellow), MAX_BULLETS);
    assert_eq!(trail_count(&engine), MAX_BULLETS);
    // Ammo display shows an empty magazine.
    let yellow = snap
        .ships
        .iter()
        .find(|s| s.player == PlayerId::Yellow)
        .unwrap();
    assert_eq!(yellow.ammo, 0);
    // Exactly three fire sounds for five attempts.
    let fired = snap
        .audio_events
        .iter()
        .filter(|e| matches!(e, AudioEvent::BulletFired { .. }))
        .count();
    assert_eq!(fired, 3);
}

#[test]
fn test_fire_ignored_after_round_over() {
    let mut engine = drain_health(PlayerId::Red, MAX_HEALTH);
    assert_eq!(engine.phase(), GamePhase::RoundOver);

    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::Red,
    });
    engine.tick(&idle_input());
    assert_eq!(bullet_count(&engine, PlayerId::Red), 0);
}

// ---- Bullet flight and damage ----

#[test]
fn test_bullet_hit_decrements_health_once() {
    let mut engine = RoundEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::Yellow,
    });

    let snap = tick_until_hit(&mut engine, PlayerId::Red, 120);

    assert_eq!(ship_health(&engine, PlayerId::Red), MAX_HEALTH - 1);
    assert_eq!(ship_health(&engine, PlayerId::Yellow), MAX_HEALTH);
    // Bullet and its trail are gone.
    assert_eq!(bullet_count(&engine, PlayerId::Yellow), 0);
    assert_eq!(trail_count(&engine), 0);
    // Exactly one hit burst: the hit ring plus the explosion's two rings.
    assert_eq!(snap.rings.len(), 3);
    // Screen shake kicks in at full strength.
    assert_eq!(snap.shake_magnitude, SHAKE_ON_HIT);
    // Victim flashes.
    let red = snap.ships.iter().find(|s| s.player == PlayerId::Red).unwrap();
    assert_eq!(red.flash_frames, HIT_FLASH_FRAMES);
}

#[test]
fn test_bullet_leaves_arena_silently() {
    let mut engine = RoundEngine::new(SimConfig::default());
    // Move red out of the bullet's path first.
    let dodge = FrameInput {
        red: held(false, false, false, true),
        ..Default::default()
    };
    for _ in 0..30 {
        engine.tick(&dodge);
    }
    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::Yellow,
    });

    for _ in 0..120 {
        let snap = engine.tick(&idle_input());
        assert!(snap
            .audio_events
            .iter()
            .all(|e| !matches!(e, AudioEvent::BulletHit { .. })));
    }
    assert_eq!(bullet_count(&engine, PlayerId::Yellow), 0);
    assert_eq!(trail_count(&engine), 0);
    assert_eq!(ship_health(&engine, PlayerId::Red), MAX_HEALTH);
}

/// Land `hits` confirmed yellow hits on the given victim.
fn drain_health(victim: PlayerId, hits: i32) -> RoundEngine {
    let mut engine = RoundEngine::new(SimConfig::default());
    let shooter = victim.opponent();
    for _ in 0..hits {
        engine.queue_command(PlayerCommand::Fire { player: shooter });
        tick_until_hit(&mut engine, victim, 200);
    }
    engine
}

#[test]
fn test_ten_hits_end_round_with_winner() {
    let engine = drain_health(PlayerId::Red, MAX_HEALTH);

    assert_eq!(ship_health(&engine, PlayerId::Red), 0);
    assert_eq!(engine.phase(), GamePhase::RoundOver);
    let outcome = engine.outcome().expect("round should have an outcome");
    assert_eq!(outcome, RoundOutcome::YellowWins);
    assert_eq!(outcome.winner(), Some(PlayerId::Yellow));
    assert_eq!(outcome.banner_text(), "YELLOW WINS!");

    // Nine hits are not enough.
    let engine_nine = drain_health(PlayerId::Yellow, MAX_HEALTH - 1);
    assert_eq!(engine_nine.phase(), GamePhase::Active);
    assert_eq!(ship_health(&engine_nine, PlayerId::Yellow), 1);
}

#[test]
fn test_double_ko_is_a_draw() {
    let mut engine = RoundEngine::new(SimConfig::default());

    // The spawn posts are mirrored, so simultaneous shots connect on the
    // same frame. Ten exchanges take both ships to zero together.
    for _ in 0..MAX_HEALTH {
        engine.queue_command(PlayerCommand::Fire {
            player: PlayerId::Yellow,
        });
        engine.queue_command(PlayerCommand::Fire {
            player: PlayerId::Red,
        });
        tick_until_hit(&mut engine, PlayerId::Red, 200);
    }

    assert_eq!(ship_health(&engine, PlayerId::Red), 0);
    assert_eq!(ship_health(&engine, PlayerId::Yellow), 0);
    assert_eq!(engine.phase(), GamePhase::RoundOver);
    assert_eq!(engine.outcome(), Some(RoundOutcome::Draw));
    assert_eq!(RoundOutcome::Draw.winner(), None);
}

#[test]
fn test_victory_burst_emitted_once_and_fades_out() {
    let mut engine = drain_health(PlayerId::Red, MAX_HEALTH);

    // The kill frame carries the hit burst (3 rings) plus the victory
    // cascade (5 rings).
    let mut ring_count = engine.world().query::<&EnergyRing>().iter().count();
    assert_eq!(ring_count, 8);

    // No further emissions on the end screen; every pool drains empty.
    for _ in 0..150 {
        let snap = engine.tick(&idle_input());
        let rings_now = snap.rings.len();
        assert!(rings_now <= ring_count, "rings must only ever drain");
        ring_count = rings_now;
    }
    let final_snap = engine.tick(&idle_input());
    assert!(final_snap.rings.is_empty());
    assert!(final_snap.particles.is_empty());
    assert!(final_snap.sparks.is_empty());
}

// ---- Movement ----

#[test]
fn test_yellow_clamped_to_left_half() {
    let mut engine = RoundEngine::new(SimConfig::default());
    let push = FrameInput {
        yellow: held(false, true, false, false),
        ..Default::default()
    };
    for _ in 0..100 {
        engine.tick(&push);
    }
    let snap = engine.tick(&idle_input());
    let yellow = snap
        .ships
        .iter()
        .find(|s| s.player == PlayerId::Yellow)
        .unwrap();
    assert!(yellow.rect.right() < BORDER_LEFT);
    // One more step would cross the border.
    assert!(yellow.rect.x + SHIP_VEL + SHIP_WIDTH >= BORDER_LEFT);
}

#[test]
fn test_red_clamped_to_right_half() {
    let mut engine = RoundEngine::new(SimConfig::default());
    let push = FrameInput {
        red: held(true, false, false, false),
        ..Default::default()
    };
    for _ in 0..100 {
        engine.tick(&push);
    }
    let snap = engine.tick(&idle_input());
    let red = snap.ships.iter().find(|s| s.player == PlayerId::Red).unwrap();
    assert!(red.rect.x > BORDER_RIGHT);
    assert!(red.rect.x - SHIP_VEL <= BORDER_RIGHT);
}

#[test]
fn test_vertical_clamps() {
    let mut engine = RoundEngine::new(SimConfig::default());
    let up = FrameInput {
        yellow: held(false, false, true, false),
        red: held(false, false, true, false),
        ..Default::default()
    };
    for _ in 0..120 {
        engine.tick(&up);
    }
    let down = FrameInput {
        yellow: held(false, false, false, true),
        red: held(false, false, false, true),
        ..Default::default()
    };
    let top = engine.tick(&idle_input());
    for ship in &top.ships {
        assert!(ship.rect.y > 0.0);
        assert!(ship.rect.y - SHIP_VEL <= 0.0);
    }
    for _ in 0..200 {
        engine.tick(&down);
    }
    let bottom = engine.tick(&idle_input());
    for ship in &bottom.ships {
        assert!(ship.rect.bottom() < ARENA_HEIGHT - FLOOR_MARGIN);
        assert!(ship.rect.bottom() + SHIP_VEL >= ARENA_HEIGHT - FLOOR_MARGIN);
    }
}

#[test]
fn test_mouse_follow_deadband_and_side() {
    let mut engine = RoundEngine::new(SimConfig {
        control_scheme: ControlScheme::Mouse,
        ..Default::default()
    });

    let start_x = RED_SPAWN_X;
    // Cursor within the deadband of the ship center: no movement.
    let center = Vec2::new(
        start_x + SHIP_WIDTH / 2.0,
        SHIP_SPAWN_Y + SHIP_HEIGHT / 2.0,
    );
    let near = FrameInput {
        mouse_pos: center + Vec2::new(MOUSE_DEADBAND - 1.0, 0.0),
        ..Default::default()
    };
    let snap = engine.tick(&near);
    let red = snap.ships.iter().find(|s| s.player == PlayerId::Red).unwrap();
    assert_eq!(red.rect.x, start_x);

    // Cursor on yellow's side of the border: ignored entirely.
    let wrong_side = FrameInput {
        mouse_pos: Vec2::new(200.0, 100.0),
        ..Default::default()
    };
    for _ in 0..20 {
        engine.tick(&wrong_side);
    }
    let snap = engine.tick(&idle_input_mouse(center));
    let red = snap.ships.iter().find(|s| s.player == PlayerId::Red).unwrap();
    assert_eq!(red.rect.x, start_x);
    assert_eq!(red.rect.y, SHIP_SPAWN_Y);

    // Cursor well to the right: the ship walks toward it.
    let chase = FrameInput {
        mouse_pos: Vec2::new(850.0, center.y),
        ..Default::default()
    };
    for _ in 0..10 {
        engine.tick(&chase);
    }
    let snap = engine.tick(&idle_input_mouse(Vec2::new(850.0, center.y)));
    let red = snap.ships.iter().find(|s| s.player == PlayerId::Red).unwrap();
    assert!(red.rect.x > start_x);
}

fn idle_input_mouse(mouse_pos: Vec2) -> FrameInput {
    FrameInput {
        mouse_pos,
        ..Default::default()
    }
}

// ---- Effect-entity lifetimes ----

#[test]
fn test_particle_lifetime_monotonic_and_fades() {
    let mut world = World::new();
    let entity = effects::spawn_particle(
        &mut world,
        Vec2::new(100.0, 100.0),
        Vec2::new(1.0, 0.0),
        color::WHITE,
        4.0,
        30.0,
        0.0,
    );

    let mut buffer = Vec::new();
    let mut last_remaining = 30.0;
    for step in 1..=29 {
        effects::run(&mut world);
        cleanup::run(&mut world, &mut buffer);

        let life = *world.get::<&Lifetime>(entity).expect("still alive");
        assert!(life.remaining < last_remaining, "lifetime must decrease");
        last_remaining = life.remaining;

        let visual = *world.get::<&ParticleVisual>(entity).expect("still alive");
        let expected = 4.0 * (30.0 - step as f32) / 30.0;
        assert!((visual.size - expected).abs() < 1e-4, "size fades linearly");
    }

    // The 30th advance kills it; it never comes back.
    effects::run(&mut world);
    cleanup::run(&mut world, &mut buffer);
    assert!(world.get::<&Lifetime>(entity).is_err());
}

#[test]
fn test_particle_drag_and_gravity() {
    let mut world = World::new();
    let entity = effects::spawn_particle(
        &mut world,
        Vec2::ZERO,
        Vec2::new(2.0, 0.0),
        color::WHITE,
        3.0,
        50.0,
        EXPLOSION_GRAVITY,
    );

    effects::run(&mut world);
    let vel = world.get::<&Velocity>(entity).unwrap().0;
    // Position integrates before gravity and drag apply.
    let pos = world.get::<&Position>(entity).unwrap().0;
    assert_eq!(pos, Vec2::new(2.0, 0.0));
    assert!((vel.x - 2.0 * PARTICLE_DRAG).abs() < 1e-5);
    assert!((vel.y - EXPLOSION_GRAVITY * PARTICLE_DRAG).abs() < 1e-5);
}

#[test]
fn test_spark_history_bounded() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    effects::spawn_spark(
        &mut world,
        &mut rng,
        Vec2::new(50.0, 50.0),
        color::WHITE,
        Vec2::new(3.0, -1.0),
    );

    let mut buffer = Vec::new();
    for _ in 0..20 {
        effects::run(&mut world);
        // Skip cleanup so the history keeps being appended past the cap.
        let mut q = world.query::<&SparkTrail>();
        if let Some((_, trail)) = q.iter().next() {
            assert!(trail.points.len() <= SPARK_TRAIL_CAP);
        }
    }
    cleanup::run(&mut world, &mut buffer);
}

#[test]
fn test_ring_dies_after_exact_advance_count() {
    let mut world = World::new();
    effects::spawn_ring(&mut world, Vec2::new(100.0, 100.0), color::CYAN, 80.0, 4.0);

    let mut buffer = Vec::new();
    for _ in 0..19 {
        effects::run(&mut world);
        cleanup::run(&mut world, &mut buffer);
        assert_eq!(
            world.query_mut::<&EnergyRing>().into_iter().count(),
            1,
            "ring must survive until its radius reaches the bound"
        );
    }
    // 20th advance: radius hits 80 and the ring dies.
    effects::run(&mut world);
    cleanup::run(&mut world, &mut buffer);
    assert_eq!(world.query_mut::<&EnergyRing>().into_iter().count(), 0);
}

#[test]
fn test_shake_decays_to_exact_zero() {
    let mut engine = RoundEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::Yellow,
    });
    let snap = tick_until_hit(&mut engine, PlayerId::Red, 120);
    assert_eq!(snap.shake_magnitude, SHAKE_ON_HIT);

    // 12 * 0.85^19 is still above the cutoff; one more tick snaps to 0.
    let mut last = SHAKE_ON_HIT;
    for _ in 0..19 {
        let snap = engine.tick(&idle_input());
        assert!(snap.shake_magnitude > 0.0);
        assert!(snap.shake_magnitude < last);
        last = snap.shake_magnitude;
    }
    let snap = engine.tick(&idle_input());
    assert_eq!(snap.shake_magnitude, 0.0);
}

// ---- Starfield ----

#[test]
fn test_starfield_population_is_stable() {
    let mut engine = RoundEngine::new(SimConfig::default());
    let expected = STAR_COUNT_LAYER1 + STAR_COUNT_LAYER2 + STAR_COUNT_LAYER3;

    for _ in 0..2000 {
        let snap = engine.tick(&idle_input());
        assert_eq!(snap.stars.len(), expected);
        assert!(snap.shooting_stars.len() <= SHOOTING_STAR_CAP);
        for star in &snap.stars {
            assert!(star.position.x >= -5.0, "departed stars must wrap");
        }
    }
}

#[test]
fn test_shooting_stars_spawn_and_expire() {
    let mut engine = RoundEngine::new(SimConfig::default());

    let mut seen_any = false;
    for _ in 0..3000 {
        let snap = engine.tick(&idle_input());
        if !snap.shooting_stars.is_empty() {
            seen_any = true;
            for meteor in &snap.shooting_stars {
                assert!(meteor.velocity.x < 0.0, "meteors streak leftward");
                assert!(meteor.velocity.y > 0.0, "meteors streak downward");
                assert!(meteor.alpha > 0.0 && meteor.alpha <= 1.0);
            }
        }
    }
    assert!(seen_any, "a 1% roll should fire within 3000 frames");
}

// ---- Round lifecycle ----

#[test]
fn test_restart_resets_combat_but_keeps_starfield() {
    let mut engine = drain_health(PlayerId::Red, MAX_HEALTH);
    assert_eq!(engine.phase(), GamePhase::RoundOver);

    let stars_before = engine.world().query::<&Star>().iter().count();
    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick(&idle_input());

    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(engine.outcome(), None);
    assert_eq!(snap.time.frame, 1);
    assert_eq!(ship_health(&engine, PlayerId::Red), MAX_HEALTH);
    assert_eq!(ship_health(&engine, PlayerId::Yellow), MAX_HEALTH);
    assert_eq!(bullet_count(&engine, PlayerId::Yellow), 0);
    assert!(snap.rings.is_empty());
    assert_eq!(snap.shake_magnitude, 0.0);
    assert_eq!(engine.world().query::<&Star>().iter().count(), stars_before);
}

#[test]
fn test_control_scheme_change_restarts_round() {
    let mut engine = RoundEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::Yellow,
    });
    tick_until_hit(&mut engine, PlayerId::Red, 120);
    assert_eq!(ship_health(&engine, PlayerId::Red), MAX_HEALTH - 1);

    engine.queue_command(PlayerCommand::SetControlScheme {
        scheme: ControlScheme::Mouse,
    });
    let snap = engine.tick(&idle_input());
    assert_eq!(engine.control_scheme(), ControlScheme::Mouse);
    assert_eq!(snap.control_scheme, ControlScheme::Mouse);
    assert_eq!(ship_health(&engine, PlayerId::Red), MAX_HEALTH);
}

#[test]
fn test_effects_keep_animating_on_end_screen() {
    let mut engine = drain_health(PlayerId::Red, MAX_HEALTH);

    let first = engine.tick(&idle_input());
    let second = engine.tick(&idle_input());
    assert_eq!(first.phase, GamePhase::RoundOver);
    // The victory cascade is still in motion: ring radii keep growing.
    let r1: Vec<f32> = first.rings.iter().map(|r| r.radius).collect();
    let r2: Vec<f32> = second.rings.iter().map(|r| r.radius).collect();
    assert!(!r1.is_empty());
    assert!(r2.iter().zip(&r1).all(|(b, a)| b > a));
    // And the clock keeps running for the ambient animation.
    assert!(second.time.frame > first.time.frame);
}
