//! Tests for the simulation engine, movement resolver, combat resolver,
//! and the full tick pipeline.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bastion_core::commands::PlayerCommand;
use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::events::AudioCue;
use bastion_core::types::Position;
use bastion_terrain::TileGrid;

use crate::engine::{SimConfig, SimulationEngine};
use crate::progress::{LevelProgress, ScoreState};
use crate::systems::{combat, lifetimes, movement, spawner};
use crate::world_setup;

fn start_level(engine: &mut SimulationEngine) {
    engine.queue_command(PlayerCommand::StartLevel { number: 1 });
    engine.tick();
}

/// Run the combat system with drop chances zeroed for determinism.
fn run_combat(
    world: &mut World,
    grid: &mut TileGrid,
    rng: &mut ChaCha8Rng,
    score: &mut ScoreState,
    progress: &mut LevelProgress,
) -> Vec<AudioCue> {
    let mut audio = Vec::new();
    let mut buffer = Vec::new();
    combat::run(
        world,
        grid,
        rng,
        score,
        progress,
        0.0,
        0.0,
        Position::new(0.0, 0.0),
        &mut audio,
        &mut buffer,
    );
    audio
}

fn count_bullets(world: &World) -> usize {
    let mut query = world.query::<&Bullet>();
    query.iter().count()
}

fn count_tanks(world: &World) -> usize {
    let mut query = world.query::<&Tank>();
    query.iter().count()
}

fn large_explosions(world: &World) -> usize {
    let mut query = world.query::<&Explosion>();
    query
        .iter()
        .filter(|(_, e)| e.size == ExplosionSize::Large)
        .count()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartLevel { number: 1 });
    engine_b.queue_command(PlayerCommand::StartLevel { number: 1 });

    for _ in 0..300 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartLevel { number: 1 });
    engine_b.queue_command(PlayerCommand::StartLevel { number: 1 });

    // Enemies spawn after the spawn interval; AI rolls then diverge.
    let mut diverged = false;
    for _ in 0..900 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Pause/Resume ----

#[test]
fn test_pause_stops_simulation() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start_level(&mut engine);

    for _ in 0..9 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10);
    assert_eq!(engine.phase(), GamePhase::Active);

    engine.queue_command(PlayerCommand::Pause);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10, "Time should not advance while paused");
    assert_eq!(engine.phase(), GamePhase::Paused);

    engine.queue_command(PlayerCommand::Resume);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 20);
    assert_eq!(engine.phase(), GamePhase::Active);
}

// ---- Movement resolver ----

#[test]
fn test_try_move_rejected_at_world_edge() {
    let mut world = World::new();
    let grid = TileGrid::new(10, 10);
    let mut next_id = 0;
    let tank = world_setup::spawn_enemy(&mut world, &mut next_id, TankKind::Basic, Position::new(0.0, 0.0));

    assert!(!movement::try_move(&mut world, &grid, tank, 0.0, -1.0));
    assert!(!movement::try_move(&mut world, &grid, tank, -1.0, 0.0));
    let pos = *world.get::<&Position>(tank).unwrap();
    assert_eq!(pos, Position::new(0.0, 0.0));

    assert!(movement::try_move(&mut world, &grid, tank, 0.0, 1.0));
}

#[test]
fn test_try_move_blocked_by_solid_tiles() {
    for tile in [Tile::Brick, Tile::Steel, Tile::Water, Tile::Base] {
        let mut world = World::new();
        let mut grid = TileGrid::new(10, 10);
        grid.set_tile(2, 0, tile);
        let mut next_id = 0;
        let tank = world_setup::spawn_enemy(
            &mut world,
            &mut next_id,
            TankKind::Basic,
            Position::tile_origin(1, 0),
        );

        assert!(
            !movement::try_move(&mut world, &grid, tank, 1.0, 0.0),
            "{tile:?} should block tank movement"
        );
        let pos = *world.get::<&Position>(tank).unwrap();
        assert_eq!(pos, Position::tile_origin(1, 0), "position must be unchanged");
    }
}

#[test]
fn test_try_move_passes_grass_and_ice() {
    for tile in [Tile::Grass, Tile::Ice] {
        let mut world = World::new();
        let mut grid = TileGrid::new(10, 10);
        grid.set_tile(2, 0, tile);
        let mut next_id = 0;
        let tank = world_setup::spawn_enemy(
            &mut world,
            &mut next_id,
            TankKind::Basic,
            Position::tile_origin(1, 0),
        );

        assert!(
            movement::try_move(&mut world, &grid, tank, 1.0, 0.0),
            "{tile:?} should not block tank movement"
        );
    }
}

#[test]
fn test_try_move_blocked_by_other_tank() {
    let mut world = World::new();
    let grid = TileGrid::new(10, 10);
    let mut next_id = 0;
    let mover = world_setup::spawn_enemy(
        &mut world,
        &mut next_id,
        TankKind::Basic,
        Position::tile_origin(1, 1),
    );
    world_setup::spawn_enemy(
        &mut world,
        &mut next_id,
        TankKind::Fast,
        Position::tile_origin(2, 1),
    );

    assert!(!movement::try_move(&mut world, &grid, mover, 1.0, 0.0));
    // Opposite way is clear
    assert!(movement::try_move(&mut world, &grid, mover, -1.0, 0.0));
}

#[test]
fn test_try_move_updates_facing_only_on_acceptance() {
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    grid.set_tile(2, 1, Tile::Steel);
    let mut next_id = 0;
    let tank = world_setup::spawn_enemy(
        &mut world,
        &mut next_id,
        TankKind::Basic,
        Position::tile_origin(1, 1),
    );
    // spawn_enemy faces Down

    assert!(!movement::try_move(&mut world, &grid, tank, 1.0, 0.0));
    assert_eq!(world.get::<&Tank>(tank).unwrap().facing, Direction::Down);

    assert!(movement::try_move(&mut world, &grid, tank, -1.0, 0.0));
    let tank_ref = world.get::<&Tank>(tank).unwrap();
    assert_eq!(tank_ref.facing, Direction::Left);
}

// ---- Firing ----

#[test]
fn test_fire_refused_during_cooldown() {
    let mut world = World::new();
    let mut next_id = 0;
    let player = world_setup::spawn_player(&mut world, &mut next_id, Position::tile_origin(5, 5));
    let mut audio = Vec::new();

    assert!(combat::try_fire(&mut world, player, &mut audio));
    assert_eq!(count_bullets(&world), 1);
    assert!(matches!(audio[0], AudioCue::Shoot));

    // Cooldown is armed; a second request is refused
    assert!(!combat::try_fire(&mut world, player, &mut audio));
    assert_eq!(count_bullets(&world), 1);

    // Cooldown decrements exactly once per tick
    let reload = world.get::<&Tank>(player).unwrap().reload_ticks;
    let mut freeze = 0;
    let mut buffer = Vec::new();
    for _ in 0..reload {
        lifetimes::run(&mut world, &mut freeze, &mut buffer);
    }
    assert_eq!(world.get::<&Tank>(player).unwrap().cooldown, 0);
    assert!(combat::try_fire(&mut world, player, &mut audio));
    assert_eq!(count_bullets(&world), 2);
}

#[test]
fn test_fire_refused_at_magazine_limit() {
    let mut world = World::new();
    let mut next_id = 0;
    let player = world_setup::spawn_player(&mut world, &mut next_id, Position::tile_origin(5, 5));
    let mut audio = Vec::new();

    for expected in 1..=MAX_LIVE_BULLETS_PER_TANK {
        assert!(combat::try_fire(&mut world, player, &mut audio));
        assert_eq!(count_bullets(&world), expected);
        world.get::<&mut Tank>(player).unwrap().cooldown = 0;
    }
    // Both bullets still in flight: magazine is dry
    assert!(!combat::try_fire(&mut world, player, &mut audio));
    assert_eq!(count_bullets(&world), MAX_LIVE_BULLETS_PER_TANK);
}

// ---- Combat resolver ----

#[test]
fn test_bullet_priority_terrain_before_tank() {
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    grid.set_tile(5, 5, Tile::Brick);
    let mut next_id = 0;
    // A tank parked on the same cell as the brick; the bullet reaches both.
    let enemy = world_setup::spawn_enemy(
        &mut world,
        &mut next_id,
        TankKind::Basic,
        Position::tile_origin(5, 5),
    );
    world_setup::spawn_bullet(&mut world, Position::new(176.0, 180.0), Direction::Up, 1, 99, true);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut score = ScoreState::default();
    let mut progress = LevelProgress::new(10);
    let audio = run_combat(&mut world, &mut grid, &mut rng, &mut score, &mut progress);

    assert_eq!(count_bullets(&world), 0, "bullet consumed by the brick");
    assert_eq!(grid.tile_at(5, 5), Tile::Brick, "one hit does not crumble");
    assert_eq!(
        world.get::<&Tank>(enemy).unwrap().health,
        1,
        "tank behind the wall must not be hit in the same tick"
    );
    assert_eq!(score.score, 0);
    assert_eq!(progress.destroyed, 0);
    assert!(audio.iter().any(|c| matches!(c, AudioCue::BrickHit)));
}

#[test]
fn test_basic_kill_awards_points_and_large_explosion() {
    // Scenario: a Basic enemy with 1 health hit once by a power-1 bullet.
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    let mut next_id = 0;
    world_setup::spawn_enemy(
        &mut world,
        &mut next_id,
        TankKind::Basic,
        Position::tile_origin(5, 5),
    );
    world_setup::spawn_bullet(&mut world, Position::new(176.0, 198.0), Direction::Up, 1, 99, true);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut score = ScoreState::default();
    let mut progress = LevelProgress::new(10);
    run_combat(&mut world, &mut grid, &mut rng, &mut score, &mut progress);

    assert_eq!(score.score, 100);
    assert_eq!(progress.destroyed, 1);
    assert_eq!(count_tanks(&world), 0, "enemy despawned");
    assert_eq!(count_bullets(&world), 0);
    assert_eq!(large_explosions(&world), 1);
}

#[test]
fn test_enemy_kill_without_player_attribution_scores_nothing() {
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    let mut next_id = 0;
    world_setup::spawn_enemy(
        &mut world,
        &mut next_id,
        TankKind::Basic,
        Position::tile_origin(5, 5),
    );
    // Stray enemy bullet; owner long gone
    world_setup::spawn_bullet(&mut world, Position::new(176.0, 198.0), Direction::Up, 1, 77, false);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut score = ScoreState::default();
    let mut progress = LevelProgress::new(10);
    run_combat(&mut world, &mut grid, &mut rng, &mut score, &mut progress);

    assert_eq!(score.score, 0, "no points without player attribution");
    assert_eq!(progress.destroyed, 1, "the kill still counts toward the quota");
}

#[test]
fn test_kill_is_idempotent_within_a_tick() {
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    let mut next_id = 0;
    world_setup::spawn_enemy(
        &mut world,
        &mut next_id,
        TankKind::Basic,
        Position::tile_origin(5, 5),
    );
    // Two bullets arriving on the same tick, far enough apart not to
    // collide with each other.
    world_setup::spawn_bullet(&mut world, Position::new(166.0, 198.0), Direction::Up, 1, 99, true);
    world_setup::spawn_bullet(&mut world, Position::new(186.0, 198.0), Direction::Up, 1, 99, true);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut score = ScoreState::default();
    let mut progress = LevelProgress::new(10);
    run_combat(&mut world, &mut grid, &mut rng, &mut score, &mut progress);

    assert_eq!(score.score, 100, "no double score award");
    assert_eq!(progress.destroyed, 1, "no double destruction count");
    assert_eq!(
        count_bullets(&world),
        1,
        "second bullet passes through the already-destroyed tank"
    );
}

#[test]
fn test_steel_consumes_normal_bullet_and_survives() {
    // Scenario: power-1 removed, tile intact; power-2 destroys the tile.
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    grid.set_tile(5, 5, Tile::Steel);
    world_setup::spawn_bullet(&mut world, Position::new(176.0, 180.0), Direction::Up, 1, 99, true);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut score = ScoreState::default();
    let mut progress = LevelProgress::new(10);
    let audio = run_combat(&mut world, &mut grid, &mut rng, &mut score, &mut progress);

    assert_eq!(count_bullets(&world), 0);
    assert_eq!(grid.tile_at(5, 5), Tile::Steel);
    assert!(audio.iter().any(|c| matches!(c, AudioCue::SteelHit)));

    world_setup::spawn_bullet(&mut world, Position::new(176.0, 180.0), Direction::Up, 2, 99, true);
    run_combat(&mut world, &mut grid, &mut rng, &mut score, &mut progress);
    assert_eq!(grid.tile_at(5, 5), Tile::Empty, "power-2 pierces steel");
    assert_eq!(count_bullets(&world), 0);
}

#[test]
fn test_brick_crumbles_after_four_bullet_hits() {
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    grid.set_tile(5, 5, Tile::Brick);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut score = ScoreState::default();
    let mut progress = LevelProgress::new(10);

    for hit in 1..=BRICK_HITS {
        world_setup::spawn_bullet(&mut world, Position::new(176.0, 180.0), Direction::Up, 1, 99, true);
        run_combat(&mut world, &mut grid, &mut rng, &mut score, &mut progress);
        if hit < BRICK_HITS {
            assert_eq!(grid.tile_at(5, 5), Tile::Brick, "hit {hit} leaves the brick");
        }
    }
    assert_eq!(grid.tile_at(5, 5), Tile::Empty);
}

#[test]
fn test_opposing_bullets_annihilate() {
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    world_setup::spawn_bullet(&mut world, Position::new(160.0, 100.0), Direction::Right, 1, 1, false);
    world_setup::spawn_bullet(&mut world, Position::new(170.0, 100.0), Direction::Left, 1, 2, false);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut score = ScoreState::default();
    let mut progress = LevelProgress::new(10);
    run_combat(&mut world, &mut grid, &mut rng, &mut score, &mut progress);

    assert_eq!(count_bullets(&world), 0, "both bullets removed");
    let mut query = world.query::<&Explosion>();
    assert_eq!(query.iter().count(), 1, "one shared explosion");
}

#[test]
fn test_bullet_expires_out_of_bounds_without_effect() {
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    world_setup::spawn_bullet(&mut world, Position::new(160.0, 2.0), Direction::Up, 1, 1, false);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut score = ScoreState::default();
    let mut progress = LevelProgress::new(10);
    run_combat(&mut world, &mut grid, &mut rng, &mut score, &mut progress);

    assert_eq!(count_bullets(&world), 0);
    let mut query = world.query::<&Explosion>();
    assert_eq!(query.iter().count(), 0, "no explosion for an expired bullet");
}

#[test]
fn test_protected_tank_consumes_bullet_without_damage() {
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    let mut next_id = 0;
    // Fresh player spawn carries spawn protection
    let player = world_setup::spawn_player(&mut world, &mut next_id, Position::tile_origin(5, 5));
    world_setup::spawn_bullet(&mut world, Position::new(176.0, 198.0), Direction::Up, 1, 99, false);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut score = ScoreState::default();
    let mut progress = LevelProgress::new(10);
    run_combat(&mut world, &mut grid, &mut rng, &mut score, &mut progress);

    assert_eq!(count_bullets(&world), 0, "bullet is still consumed");
    assert_eq!(world.get::<&Tank>(player).unwrap().health, 1);
    assert_eq!(score.lives, PLAYER_LIVES);
}

#[test]
fn test_player_death_respawns_with_protection() {
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    let mut next_id = 0;
    let player = world_setup::spawn_player(&mut world, &mut next_id, Position::tile_origin(5, 5));
    *world.get::<&mut StatusEffects>(player).unwrap() = StatusEffects::default();
    world_setup::spawn_bullet(&mut world, Position::new(176.0, 198.0), Direction::Up, 1, 99, false);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut score = ScoreState::default();
    let mut progress = LevelProgress::new(10);
    let mut audio = Vec::new();
    let mut buffer = Vec::new();
    let respawn_point = Position::tile_origin(1, 1);
    combat::run(
        &mut world,
        &mut grid,
        &mut rng,
        &mut score,
        &mut progress,
        0.0,
        0.0,
        respawn_point,
        &mut audio,
        &mut buffer,
    );

    assert_eq!(score.lives, PLAYER_LIVES - 1);
    let pos = *world.get::<&Position>(player).unwrap();
    assert_eq!(pos, respawn_point, "respawned at the level start point");
    assert_eq!(world.get::<&Tank>(player).unwrap().health, 1);
    let status = world.get::<&StatusEffects>(player).unwrap();
    assert_eq!(status.spawn_shield_ticks, SPAWN_PROTECTION_TICKS);
}

#[test]
fn test_player_last_life_removes_tank() {
    let mut world = World::new();
    let mut grid = TileGrid::new(10, 10);
    let mut next_id = 0;
    let player = world_setup::spawn_player(&mut world, &mut next_id, Position::tile_origin(5, 5));
    *world.get::<&mut StatusEffects>(player).unwrap() = StatusEffects::default();
    world_setup::spawn_bullet(&mut world, Position::new(176.0, 198.0), Direction::Up, 1, 99, false);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut score = ScoreState::default();
    score.lives = 1;
    let mut progress = LevelProgress::new(10);
    run_combat(&mut world, &mut grid, &mut rng, &mut score, &mut progress);

    assert_eq!(score.lives, 0);
    assert_eq!(count_tanks(&world), 0, "player tank removed on final death");
}

// ---- Power-up lifecycle ----

#[test]
fn test_powerup_expires_without_effect() {
    let mut world = World::new();
    world.spawn((
        Position::tile_origin(3, 3),
        PowerUp {
            kind: PowerUpKind::Shield,
            ticks_remaining: POWERUP_LIFETIME_TICKS,
        },
    ));

    let mut freeze = 0;
    let mut buffer = Vec::new();
    for _ in 0..(POWERUP_LIFETIME_TICKS - 1) {
        lifetimes::run(&mut world, &mut freeze, &mut buffer);
    }
    {
        let mut query = world.query::<&PowerUp>();
        assert_eq!(query.iter().count(), 1, "still on the field at tick 599");
    }
    lifetimes::run(&mut world, &mut freeze, &mut buffer);
    let mut query = world.query::<&PowerUp>();
    assert_eq!(query.iter().count(), 0, "expired at its configured lifetime");
}

#[test]
fn test_shield_pickup_awards_bonus_and_arms_timer() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start_level(&mut engine);
    engine.block_spawns();

    let player = engine.player_entity().unwrap();
    let player_pos = *engine.world().get::<&Position>(player).unwrap();
    engine.spawn_powerup_at(PowerUpKind::Shield, player_pos);

    let snap = engine.tick();
    assert_eq!(engine.score().score, POWERUP_PICKUP_POINTS);
    assert!(snap
        .audio_cues
        .iter()
        .any(|c| matches!(c, AudioCue::PowerUp { kind: PowerUpKind::Shield })));
    let status = engine.world().get::<&StatusEffects>(player).unwrap();
    assert!(status.shield_ticks > 0);
    assert!(snap.power_ups.is_empty(), "collected power-up removed");
}

#[test]
fn test_freeze_suspends_all_enemies_then_releases() {
    // Scenario: Freeze collected by the player stops every live enemy
    // from moving or firing for the configured window.
    let mut engine = SimulationEngine::new(SimConfig::default());
    start_level(&mut engine);
    engine.block_spawns();
    let a = engine.spawn_enemy_at(TankKind::Basic, 0, 0);
    let b = engine.spawn_enemy_at(TankKind::Fast, 19, 0);
    // Keep the pickup tick quiet: the freeze lands after the AI phase,
    // so a lucky fire roll beforehand would leave a bullet in flight.
    for enemy in [a, b] {
        engine.world_mut().get::<&mut Tank>(enemy).unwrap().cooldown = 1_000_000;
    }

    let player = engine.player_entity().unwrap();
    let player_pos = *engine.world().get::<&Position>(player).unwrap();
    engine.spawn_powerup_at(PowerUpKind::Freeze, player_pos);
    engine.tick();
    assert_eq!(engine.freeze_ticks(), FREEZE_DURATION_TICKS);

    // One more tick so the AI observes the freeze
    engine.tick();
    let frozen_a = *engine.world().get::<&Position>(a).unwrap();
    let frozen_b = *engine.world().get::<&Position>(b).unwrap();
    for _ in 0..120 {
        let snap = engine.tick();
        assert!(snap.bullets.is_empty(), "no firing during the freeze");
        assert!(snap.tanks.iter().filter(|t| t.kind.is_enemy()).all(|t| t.frozen));
    }
    assert_eq!(*engine.world().get::<&Position>(a).unwrap(), frozen_a);
    assert_eq!(*engine.world().get::<&Position>(b).unwrap(), frozen_b);

    // Run past expiry: enemies resume wandering
    for _ in 0..FREEZE_DURATION_TICKS {
        engine.tick();
    }
    assert_eq!(engine.freeze_ticks(), 0);
    let ai = engine.world().get::<&AiController>(a).unwrap();
    assert_ne!(ai.state, AiState::Frozen);
}

#[test]
fn test_grenade_clears_field_and_counts_kills() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start_level(&mut engine);
    engine.block_spawns();
    engine.spawn_enemy_at(TankKind::Basic, 0, 0);
    engine.spawn_enemy_at(TankKind::Armor, 19, 0);
    let destroyed_before = engine.progress().destroyed;

    let player = engine.player_entity().unwrap();
    let player_pos = *engine.world().get::<&Position>(player).unwrap();
    engine.spawn_powerup_at(PowerUpKind::Grenade, player_pos);
    engine.tick();

    assert_eq!(engine.live_enemies(), 0);
    assert_eq!(engine.progress().destroyed, destroyed_before + 2);
    assert_eq!(
        engine.score().score,
        POWERUP_PICKUP_POINTS + 2 * GRENADE_POINTS_PER_KILL
    );
}

#[test]
fn test_shovel_upgrades_base_ring_to_steel() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start_level(&mut engine);
    engine.block_spawns();
    let (base_col, base_row) = engine.grid().base_position().unwrap();
    assert_eq!(engine.grid().tile_at(base_col, base_row - 1), Tile::Brick);

    let player = engine.player_entity().unwrap();
    let player_pos = *engine.world().get::<&Position>(player).unwrap();
    engine.spawn_powerup_at(PowerUpKind::Shovel, player_pos);
    engine.tick();

    assert_eq!(engine.grid().tile_at(base_col, base_row - 1), Tile::Steel);
    assert_eq!(engine.grid().tile_at(base_col - 1, base_row), Tile::Steel);
    assert_eq!(engine.grid().tile_at(base_col + 1, base_row), Tile::Steel);
}

#[test]
fn test_star_upgrades_stack() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start_level(&mut engine);
    engine.block_spawns();
    let player = engine.player_entity().unwrap();
    let player_pos = *engine.world().get::<&Position>(player).unwrap();

    engine.spawn_powerup_at(PowerUpKind::Star, player_pos);
    engine.tick();
    {
        let tank = engine.world().get::<&Tank>(player).unwrap();
        assert_eq!(tank.reload_ticks, UPGRADED_RELOAD_TICKS);
        assert_eq!(tank.power, 1, "power upgrade needs level 3");
    }

    engine.spawn_powerup_at(PowerUpKind::Star, player_pos);
    engine.tick();
    {
        let tank = engine.world().get::<&Tank>(player).unwrap();
        assert_eq!(tank.power, 2, "level 3 fires piercing bullets");
    }
    let state = engine.world().get::<&PlayerState>(player).unwrap();
    assert_eq!(state.upgrade_level, 3);
}

#[test]
fn test_extra_life_increments_lives() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start_level(&mut engine);
    engine.block_spawns();
    let player = engine.player_entity().unwrap();
    let player_pos = *engine.world().get::<&Position>(player).unwrap();
    engine.spawn_powerup_at(PowerUpKind::ExtraLife, player_pos);
    let snap = engine.tick();
    assert_eq!(snap.hud.lives, PLAYER_LIVES + 1);
}

// ---- Terminal conditions ----

#[test]
fn test_base_destruction_fails_level_regardless_of_lives() {
    // Scenario: the base tile, once hit by any bullet, permanently fails
    // the level even with all lives remaining.
    let mut engine = SimulationEngine::new(SimConfig::default());
    start_level(&mut engine);
    engine.block_spawns();

    let (base_col, base_row) = engine.grid().base_position().unwrap();
    let base_center = Position::tile_center(base_col, base_row);
    world_setup::spawn_bullet(
        engine.world_mut(),
        Position::new(base_center.x, base_center.y + 4.0),
        Direction::Up,
        1,
        99,
        false,
    );

    let snap = engine.tick();
    assert!(engine.grid().base_destroyed());
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(snap.hud.lives, PLAYER_LIVES, "lives were untouched");
    assert!(snap.audio_cues.iter().any(|c| matches!(c, AudioCue::BaseDestroyed)));
    assert!(snap.audio_cues.iter().any(|c| matches!(c, AudioCue::GameOver)));

    // The base stays down
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
}

#[test]
fn test_level_complete_when_quota_cleared() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start_level(&mut engine);
    engine.score_mut().score = 777;
    engine.progress_mut().quota = 0;

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::LevelComplete);
    assert!(snap.audio_cues.iter().any(|c| matches!(c, AudioCue::LevelComplete)));

    // Score and lives carry into the next level of the run
    engine.queue_command(PlayerCommand::StartLevel { number: 2 });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.hud.level, 2);
    assert_eq!(snap.hud.score, 777);
}

#[test]
fn test_spawner_respects_concurrency_cap() {
    // Scenario: the wave director never exceeds the cap even with the
    // spawn timer elapsing many times over.
    let mut engine = SimulationEngine::new(SimConfig { seed: 7, ..Default::default() });
    start_level(&mut engine);

    let mut max_live = 0;
    for _ in 0..6000 {
        engine.tick();
        let live = engine.live_enemies();
        max_live = max_live.max(live);
        assert!(live <= MAX_LIVE_ENEMIES, "cap breached: {live}");
        assert!(engine.progress().spawned <= engine.progress().quota);
        if engine.phase() != GamePhase::Active {
            break;
        }
    }
    assert!(max_live >= 1, "spawner never produced an enemy");
}

#[test]
fn test_spawner_kind_weights() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..50 {
        assert_eq!(spawner::draw_kind(&mut rng, &[1.0, 0.0, 0.0, 0.0]), TankKind::Basic);
        assert_eq!(spawner::draw_kind(&mut rng, &[0.0, 0.0, 0.0, 1.0]), TankKind::Armor);
    }
}

// ---- Snapshot ----

#[test]
fn test_first_tick_snapshot_contents() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartLevel { number: 1 });
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.hud.level, 1);
    assert_eq!(snap.hud.lives, PLAYER_LIVES);
    assert_eq!(snap.hud.enemies_remaining, DEFAULT_ENEMY_QUOTA);
    assert_eq!(
        snap.terrain.tiles.len(),
        (snap.terrain.width * snap.terrain.height) as usize
    );
    assert!(snap.terrain.tiles.contains(&Tile::Base));
    assert_eq!(snap.tanks.len(), 1, "only the player on the field");
    assert_eq!(snap.tanks[0].kind, TankKind::Player);
    assert!(snap.tanks[0].shielded, "spawn protection shows as shielded");
    assert!(snap.audio_cues.iter().any(|c| matches!(c, AudioCue::GameStart)));
}

#[test]
fn test_player_input_moves_and_fires() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start_level(&mut engine);
    engine.block_spawns();
    let player = engine.player_entity().unwrap();
    let before = *engine.world().get::<&Position>(player).unwrap();

    engine.queue_command(PlayerCommand::SetInput {
        direction: Some(Direction::Right),
        fire: true,
    });
    let snap = engine.tick();

    let after = *engine.world().get::<&Position>(player).unwrap();
    assert!(after.x > before.x, "player moved right");
    assert_eq!(snap.bullets.len(), 1, "fire intent produced a bullet");
    assert!(snap.audio_cues.iter().any(|c| matches!(c, AudioCue::Shoot)));

    // Releasing input stops the tank
    engine.queue_command(PlayerCommand::SetInput {
        direction: None,
        fire: false,
    });
    engine.tick();
    let rest = *engine.world().get::<&Position>(player).unwrap();
    engine.tick();
    assert_eq!(*engine.world().get::<&Position>(player).unwrap(), rest);
}
