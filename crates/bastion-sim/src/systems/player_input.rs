//! Player input system — applies the tick's sampled intents to the
//! player tank through the movement resolver and fire path.

use hecs::World;

use bastion_core::commands::InputState;
use bastion_core::components::{PlayerTag, Tank};
use bastion_core::events::AudioCue;
use bastion_terrain::TileGrid;

use crate::systems::{combat, movement};

pub fn run(world: &mut World, grid: &TileGrid, input: InputState, audio: &mut Vec<AudioCue>) {
    let player = {
        let mut query = world.query::<(&PlayerTag, &Tank)>();
        query.iter().next().map(|(entity, (_tag, tank))| (entity, tank.speed))
    };
    let Some((entity, speed)) = player else {
        return;
    };

    if let Some(direction) = input.direction {
        let (dx, dy) = direction.delta();
        movement::try_move(world, grid, entity, dx * speed, dy * speed);
    }
    if input.fire {
        combat::try_fire(world, entity, audio);
    }
}
