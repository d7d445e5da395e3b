//! bastion: headless runner for the BASTION simulation core.
//!
//! Drives the engine at a fixed 60Hz and logs game events — the stand-in
//! for the out-of-scope render/input/audio frontends. Level files are
//! read from `levels/level{N}.json` when present, falling back to the
//! generated layouts.
//!
//! Usage:
//!   bastion [--level N] [--seed N] [--max-ticks N] [--turbo]

use std::process;

use bastion_core::commands::PlayerCommand;
use bastion_core::enums::GamePhase;
use bastion_sim::engine::{SimConfig, SimulationEngine};

mod game_loop;

struct Args {
    level: u32,
    seed: u64,
    max_ticks: u64,
    realtime: bool,
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };

    let mut engine = SimulationEngine::new(SimConfig {
        seed: args.seed,
        ..SimConfig::default()
    });
    engine.queue_command(PlayerCommand::StartLevel { number: args.level });

    let options = game_loop::RunOptions {
        max_ticks: args.max_ticks,
        realtime: args.realtime,
    };
    let final_snapshot = game_loop::run_until_terminal(&mut engine, &options);

    let outcome = match final_snapshot.phase {
        GamePhase::LevelComplete => "level complete",
        GamePhase::GameOver => "game over",
        _ => "tick budget reached",
    };
    log::info!(
        "{outcome}: score {} | lives {} | enemies remaining {} | {} ticks",
        final_snapshot.hud.score,
        final_snapshot.hud.lives,
        final_snapshot.hud.enemies_remaining,
        final_snapshot.time.tick,
    );
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        level: 1,
        seed: 42,
        max_ticks: u64::MAX,
        realtime: true,
    };

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "--level" => {
                args.level = parse_value(&argv, &mut i)?;
            }
            "--seed" => {
                args.seed = parse_value(&argv, &mut i)?;
            }
            "--max-ticks" => {
                args.max_ticks = parse_value(&argv, &mut i)?;
            }
            "--turbo" => {
                args.realtime = false;
                i += 1;
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn parse_value<T: std::str::FromStr>(argv: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &argv[*i];
    let value = argv
        .get(*i + 1)
        .ok_or_else(|| format!("{flag} requires a value"))?;
    *i += 2;
    value
        .parse()
        .map_err(|_| format!("{flag}: invalid value {value:?}"))
}

fn print_usage() {
    eprintln!(
        "bastion: headless BASTION simulation runner\n\
         \n\
         Options:\n\
           --level <N>      Level number to start (default: 1)\n\
           --seed <N>       RNG seed (default: 42)\n\
           --max-ticks <N>  Stop after N ticks (default: unbounded)\n\
           --turbo          Free-run without 60Hz pacing\n"
    );
}
