//! skyguard-autoplay: headless seeded run with a scripted defender.
//!
//! Usage:
//!   skyguard-autoplay --seed 7 --waves 5
//!   skyguard-autoplay --seed 7 --waves 3 --dt 0.02 --output final.json

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process;

use glam::DVec2;
use tracing::{info, warn};

use skyguard_core::constants::{DT, GROUND_Y};
use skyguard_core::enums::GamePhase;
use skyguard_core::events::GameEvent;
use skyguard_core::state::{GameStateSnapshot, ProjectileView};
use skyguard_core::types::Position;
use skyguard_sim::{SimConfig, SimulationEngine};

/// Projectiles are engaged once they have covered this much of their flight.
const ENGAGE_AT_PROGRESS: f64 = 0.45;

/// Aim this far ahead of a projectile along its flight line.
const LEAD_DISTANCE: f64 = 25.0;

/// Hard stop so a stuck run cannot spin forever.
const MAX_STEPS: u64 = 1_000_000;

struct Options {
    seed: u64,
    waves: u32,
    dt: f64,
    output: Option<PathBuf>,
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h" || a == "help") {
        print_usage();
        return;
    }

    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("Error: {msg}");
            print_usage();
            process::exit(1);
        }
    };

    let snapshot = run(&options);

    if let Some(path) = &options.output {
        if let Err(msg) = write_snapshot(path, &snapshot) {
            eprintln!("Error: {msg}");
            process::exit(1);
        }
        info!(path = %path.display(), "final snapshot written");
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn print_usage() {
    eprintln!(
        "skyguard-autoplay: run the SKYGUARD simulation headless with a scripted defender\n\
         \n\
           --seed <N>       RNG seed (default: 42)\n\
           --waves <N>      Stop after this many waves are cleared (default: 5)\n\
           --dt <SECS>      Seconds per update (default: 1/60)\n\
           --output <path>  Write the final snapshot as JSON\n\
         \n\
         Logging follows RUST_LOG (default: info). Set LOG_FORMAT=json for JSON lines.\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let known = ["--seed", "--waves", "--dt", "--output"];
    let mut i = 0;
    while i < args.len() {
        if !known.contains(&args[i].as_str()) {
            return Err(format!("unknown argument: {}", args[i]));
        }
        if i + 1 >= args.len() {
            return Err(format!("{} needs a value", args[i]));
        }
        i += 2;
    }

    let seed = match flag_value(args, "--seed") {
        Some(v) => v.parse().map_err(|_| format!("invalid --seed: {v}"))?,
        None => SimConfig::default().seed,
    };
    let waves = match flag_value(args, "--waves") {
        Some(v) => v.parse().map_err(|_| format!("invalid --waves: {v}"))?,
        None => 5,
    };
    let dt: f64 = match flag_value(args, "--dt") {
        Some(v) => v.parse().map_err(|_| format!("invalid --dt: {v}"))?,
        None => DT,
    };
    if !(dt > 0.0 && dt <= 0.25) {
        return Err(format!("--dt must be in (0, 0.25], got {dt}"));
    }

    Ok(Options {
        seed,
        waves,
        dt,
        output: flag_value(args, "--output").map(PathBuf::from),
    })
}

/// Point slightly ahead of the projectile on its way to the ground.
fn aim_point(projectile: &ProjectileView) -> Position {
    let position = DVec2::from(projectile.position);
    let heading = (DVec2::from(projectile.target) - position).normalize_or_zero();
    let mut aim: Position = (position + heading * LEAD_DISTANCE).into();
    aim.y = aim.y.min(GROUND_Y - 1.0);
    aim
}

fn run(options: &Options) -> GameStateSnapshot {
    let mut engine = SimulationEngine::new(SimConfig { seed: options.seed });
    engine.start();
    info!(seed = options.seed, waves = options.waves, dt = options.dt, "autoplay started");

    let mut engaged: HashSet<u32> = HashSet::new();
    let mut waves_cleared = 0;
    let mut snapshot = engine.update(options.dt);

    for _ in 0..MAX_STEPS {
        for event in &snapshot.events {
            match event {
                GameEvent::CityDestroyed { city_id } => info!(city_id, "city lost"),
                GameEvent::LaunchSiteDestroyed { site_id } => info!(site_id, "launch site lost"),
                _ => {}
            }
        }

        match snapshot.phase {
            GamePhase::GameOver => break,
            GamePhase::WaveEnd => {
                waves_cleared += 1;
                if waves_cleared >= options.waves {
                    break;
                }
                engaged.clear();
                engine.continue_to_next_wave();
            }
            _ => {
                for projectile in &snapshot.projectiles {
                    if projectile.progress >= ENGAGE_AT_PROGRESS && engaged.insert(projectile.id) {
                        let aim = aim_point(projectile);
                        engine.fire_at(aim.x, aim.y);
                    }
                }
            }
        }

        snapshot = engine.update(options.dt);
    }

    if !matches!(snapshot.phase, GamePhase::GameOver | GamePhase::WaveEnd) {
        warn!(steps = MAX_STEPS, "step limit reached before the run settled");
    }

    info!(
        phase = ?snapshot.phase,
        wave = snapshot.wave,
        score = snapshot.score,
        cities = snapshot.cities.iter().filter(|c| c.alive).count(),
        "autoplay finished"
    );
    snapshot
}

fn write_snapshot(path: &Path, snapshot: &GameStateSnapshot) -> Result<(), String> {
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| format!("failed to encode snapshot: {e}"))?;
    std::fs::write(path, json).map_err(|e| format!("failed to write {}: {e}", path.display()))
}
