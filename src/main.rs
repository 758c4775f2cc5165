//! Sky Raid headless entry point
//!
//! Runs a demo session at the fixed tick rate with the autopilot at the
//! controls, logging a scene summary once per second.
//!
//! Usage: `sky-raid [settings.json] [sprites.json]`

use std::env;
use std::process::ExitCode;

use sky_raid::input::{Autopilot, InputSource};
use sky_raid::render::{LogRenderer, Renderer, Scene};
use sky_raid::sim::{SimulationClock, SimulationWorld, tick};
use sky_raid::{ConfigError, Settings, SpriteCatalog};

/// Demo sessions quit after three minutes even if the autopilot survives
const DEMO_TICK_LIMIT: u64 = 60 * 180;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Sky Raid (headless) starting...");

    let args: Vec<String> = env::args().skip(1).collect();
    match run(args.first(), args.get(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Configuration error: {e}");
            eprintln!("sky-raid: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings_path: Option<&String>, catalog_path: Option<&String>) -> Result<(), ConfigError> {
    let settings = match settings_path {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };
    let catalog = match catalog_path {
        Some(path) => SpriteCatalog::load(path)?,
        None => SpriteCatalog::default(),
    };

    let mut world = SimulationWorld::new(settings, &catalog)?;
    let mut clock = SimulationClock::new(&world.settings.timing);
    let mut pilot = Autopilot::new(Some(DEMO_TICK_LIMIT));
    let mut renderer = LogRenderer::new(u64::from(world.settings.timing.tick_rate));

    while !world.phase.is_finished() {
        clock.wait_for_tick();
        let input = pilot.sample(&world);
        let now = clock.elapsed();
        let signals = clock.poll(now);
        tick(&mut world, &input, &signals, now);
        renderer.draw(&Scene::capture(&world));
    }

    log::info!(
        "Session ended ({:?}) after {} ticks, score {}",
        world.phase,
        world.time_ticks,
        world.score
    );
    println!("Final score: {}", world.score);
    Ok(())
}
