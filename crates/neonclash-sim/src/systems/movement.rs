//! Ship movement system.
//!
//! Applies held movement input with per-axis clamping: each ship stays
//! inside the arena and its own half of it. Also decays hit-flash
//! timers and records whether each ship moved (the thruster system
//! throttles emission on idle ships).

use glam::Vec2;
use hecs::World;

use neonclash_core::commands::{FrameInput, MoveAxes};
use neonclash_core::components::{Ship, ThrusterEmitter};
use neonclash_core::constants::*;
use neonclash_core::enums::{ControlScheme, PlayerId};
use neonclash_core::types::Position;

/// Run ship movement for the current frame's input.
pub fn run(world: &mut World, input: &FrameInput, scheme: ControlScheme) {
    for (_entity, (ship, pos, emitter)) in
        world.query_mut::<(&mut Ship, &mut Position, &mut ThrusterEmitter)>()
    {
        if ship.flash_frames > 0 {
            ship.flash_frames -= 1;
        }

        let before = pos.0;
        match ship.player {
            PlayerId::Yellow => move_yellow(pos, &input.yellow),
            PlayerId::Red => match scheme {
                ControlScheme::Arrows => move_red_arrows(pos, &input.red),
                ControlScheme::Mouse => move_red_mouse(pos, input.mouse_pos),
            },
        }
        emitter.moved = pos.0 != before;
    }
}

/// Yellow is confined to the left of the border.
fn move_yellow(pos: &mut Position, axes: &MoveAxes) {
    if axes.left && pos.0.x - SHIP_VEL > 0.0 {
        pos.0.x -= SHIP_VEL;
    }
    if axes.right && pos.0.x + SHIP_VEL + SHIP_WIDTH < BORDER_LEFT {
        pos.0.x += SHIP_VEL;
    }
    if axes.up && pos.0.y - SHIP_VEL > 0.0 {
        pos.0.y -= SHIP_VEL;
    }
    if axes.down && pos.0.y + SHIP_VEL + SHIP_HEIGHT < ARENA_HEIGHT - FLOOR_MARGIN {
        pos.0.y += SHIP_VEL;
    }
}

/// Red is confined to the right of the border.
fn move_red_arrows(pos: &mut Position, axes: &MoveAxes) {
    if axes.left && pos.0.x - SHIP_VEL > BORDER_RIGHT {
        pos.0.x -= SHIP_VEL;
    }
    if axes.right && pos.0.x + SHIP_VEL + SHIP_WIDTH < ARENA_WIDTH {
        pos.0.x += SHIP_VEL;
    }
    if axes.up && pos.0.y - SHIP_VEL > 0.0 {
        pos.0.y -= SHIP_VEL;
    }
    if axes.down && pos.0.y + SHIP_VEL + SHIP_HEIGHT < ARENA_HEIGHT - FLOOR_MARGIN {
        pos.0.y += SHIP_VEL;
    }
}

/// Mouse-follow mode: nudge the ship toward the cursor at the normal
/// speed, one axis at a time, with a deadband so the ship does not
/// jitter around the cursor. Cursor positions on yellow's side are
/// ignored entirely.
fn move_red_mouse(pos: &mut Position, mouse: Vec2) {
    if mouse.x <= BORDER_RIGHT {
        return;
    }

    let center_x = pos.0.x + SHIP_WIDTH / 2.0;
    let center_y = pos.0.y + SHIP_HEIGHT / 2.0;

    if center_x < mouse.x - MOUSE_DEADBAND && pos.0.x + SHIP_VEL + SHIP_WIDTH < ARENA_WIDTH {
        pos.0.x += SHIP_VEL;
    } else if center_x > mouse.x + MOUSE_DEADBAND && pos.0.x - SHIP_VEL > BORDER_RIGHT {
        pos.0.x -= SHIP_VEL;
    }

    if center_y < mouse.y - MOUSE_DEADBAND
        && pos.0.y + SHIP_VEL + SHIP_HEIGHT < ARENA_HEIGHT - FLOOR_MARGIN
    {
        pos.0.y += SHIP_VEL;
    } else if center_y > mouse.y + MOUSE_DEADBAND && pos.0.y - SHIP_VEL > 0.0 {
        pos.0.y -= SHIP_VEL;
    }
}
