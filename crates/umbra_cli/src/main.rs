use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

mod cli;
mod config;
mod logger;
mod scenes;

use cli::Args;
use config::FileConfig;
use logger::init_logger;
use umbra_renderer::{render, save_image};

fn main() {
    let args = Args::parse();
    init_logger(args.log_level.into());

    if let Err(err) = run(&args) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let file_config = match &args.config {
        Some(path) => {
            info!("Loading config {}", path.display());
            FileConfig::load(path)?
        }
        None => FileConfig::default(),
    };

    let render_config = file_config.render_config(args);
    let mut rng = StdRng::seed_from_u64(render_config.seed);

    let start = Instant::now();
    let scene = scenes::build(args.scene, &mut rng);
    let camera = file_config.camera_settings(scene.camera, args).build();
    info!(
        "Scene {:?}: {} primitives, {}x{} image",
        args.scene,
        scene.world.len(),
        camera.image_width(),
        camera.image_height()
    );

    let world = scene.world.into_bvh(&mut rng);
    debug!("BVH built in {:.2?}, depth {}", start.elapsed(), world.depth());

    let image = render(&camera, &world, &render_config);

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Saved {}", args.output.display());

    Ok(())
}
