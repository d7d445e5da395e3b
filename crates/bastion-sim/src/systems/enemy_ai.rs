//! Enemy AI controller system.
//!
//! Runs the per-enemy state machine (Wandering / Retargeting / Frozen)
//! against the decision helpers in bastion-ai, feeding chosen directions
//! through the shared movement resolver. A game-wide freeze suspends
//! movement and firing entirely.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_ai::fsm;
use bastion_ai::profiles::profile;
use bastion_core::components::{AiController, EnemyTag, PlayerTag, Tank};
use bastion_core::enums::AiState;
use bastion_core::events::AudioCue;
use bastion_core::types::Position;
use bastion_terrain::TileGrid;

use crate::systems::{combat, movement};

pub fn run(
    world: &mut World,
    grid: &TileGrid,
    rng: &mut ChaCha8Rng,
    frozen: bool,
    audio: &mut Vec<AudioCue>,
) {
    let player_pos = {
        let mut query = world.query::<(&PlayerTag, &Position)>();
        query.iter().next().map(|(_, (_tag, pos))| *pos)
    };
    let base_pos = grid
        .base_position()
        .map(|(col, row)| Position::tile_center(col, row));

    // Collect first: move attempts need &mut World.
    let enemies: Vec<(Entity, AiState, u32, f64, f64)> = {
        let mut query = world.query::<(&EnemyTag, &AiController, &Tank)>();
        query
            .iter()
            .filter(|(_, (_, _, tank))| tank.health > 0)
            .map(|(entity, (_tag, ai, tank))| {
                (
                    entity,
                    ai.state,
                    ai.dwell_ticks,
                    tank.speed,
                    profile(tank.kind).fire_chance,
                )
            })
            .collect()
    };

    for (entity, state, dwell, speed, fire_chance) in enemies {
        if frozen {
            set_controller(world, entity, AiState::Frozen, dwell);
            continue;
        }

        let mut state = state;
        let mut dwell = dwell;
        if state == AiState::Frozen {
            // Freeze expired: resume wandering with a fresh timer.
            state = AiState::Wandering;
            dwell = fsm::roll_dwell(rng);
        }

        if state == AiState::Wandering {
            if dwell == 0 {
                state = AiState::Retargeting;
            } else {
                dwell -= 1;
                let facing = match world.get::<&Tank>(entity) {
                    Ok(tank) => tank.facing,
                    Err(_) => continue,
                };
                let (dx, dy) = facing.delta();
                if !movement::try_move(world, grid, entity, dx * speed, dy * speed) {
                    state = AiState::Retargeting;
                }
            }
        }

        if state == AiState::Retargeting {
            let pos = match world.get::<&Position>(entity) {
                Ok(pos) => *pos,
                Err(_) => continue,
            };
            let target =
                fsm::pick_target(rng, player_pos, base_pos, grid.pixel_width(), grid.pixel_height());

            let mut moved = false;
            for direction in fsm::candidate_directions(rng, pos, target) {
                let (dx, dy) = direction.delta();
                if movement::try_move(world, grid, entity, dx * speed, dy * speed) {
                    moved = true;
                    break;
                }
            }
            if !moved {
                let fallback = fsm::random_direction(rng);
                let (dx, dy) = fallback.delta();
                if !movement::try_move(world, grid, entity, dx * speed, dy * speed) {
                    // Boxed in: at least turn, and wait for the field to open.
                    if let Ok(mut tank) = world.get::<&mut Tank>(entity) {
                        tank.facing = fallback;
                    }
                }
            }
            state = AiState::Wandering;
            dwell = fsm::roll_dwell(rng);
        }

        set_controller(world, entity, state, dwell);

        // Fire roll is independent of the movement state.
        if fire_chance > 0.0 && rng.gen_bool(fire_chance) {
            combat::try_fire(world, entity, audio);
        }
    }
}

fn set_controller(world: &mut World, entity: Entity, state: AiState, dwell_ticks: u32) {
    if let Ok(mut ai) = world.get::<&mut AiController>(entity) {
        ai.state = state;
        ai.dwell_ticks = dwell_ticks;
    }
}
