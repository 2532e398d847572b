//! Fogcast - Entry Point
//!
//! Runs the fog pipeline over a generated scene for a few seconds of
//! simulated ticks and prints the final intensity field.
//!
//! Usage: `fogcast [config.ron]`

use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fogcast::game::{FogOfWar, Scene};
use fogcast::render::render_ascii;
use fogcast::world::Cell;
use fogcast::FogConfig;

/// Simulated ticks per second
const TICK_RATE: u64 = 60;
const RUN_SECONDS: u64 = 4;
const VIEWPORT: (i32, i32) = (640, 480);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Fogcast v{}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("fog.ron"));
    let config = FogConfig::load_or_default(&config_path);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut scene = Scene::generate(&mut rng, VIEWPORT, 36, 16);
    let mut fog = FogOfWar::new(config, VIEWPORT)?;

    for _ in 0..TICK_RATE * RUN_SECONDS {
        scene.step(&mut rng);
        let report = fog.tick(scene.observer, &scene.obstacles, &mut scene.ghosts);
        if report.tick % TICK_RATE == 0 {
            log::info!(
                "tick {}: observer at {:?}, {} visible, {} blocked, {} explored, {} ghosts shown",
                report.tick,
                report.origin,
                report.visible,
                report.blocked,
                fog.ledger().explored_count(),
                report.actors_shown
            );
        }
    }

    let cs = fog.metrics().cell_size_px;
    let mut overlays: Vec<(Cell, char)> = scene
        .ghosts
        .iter()
        .filter(|ghost| !ghost.hidden)
        .map(|ghost| {
            let (x, y) = ghost.center();
            (Cell::from_pixel(x, y, cs), 'g')
        })
        .collect();
    let (ox, oy) = scene.observer.center();
    overlays.push((Cell::from_pixel(ox, oy, cs), 'P'));

    print!("{}", render_ascii(fog.field(), &overlays));

    log::info!("Fogcast finished after {} ticks", fog.ticks());
    Ok(())
}
