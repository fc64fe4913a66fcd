mod app;
mod config;
mod driver;
mod field;
mod particle;
mod pointer;
mod pulse;
mod surface;

use clap::Parser;

use crate::config::{make_rng, Args, FieldConfig};
use crate::driver::{Animation, CancelToken};
use crate::surface::{Bounds, DisplayList};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = FieldConfig::from_args(&args);
    if let Err(err) = config.validate() {
        log::error!("invalid configuration: {}", err);
        std::process::exit(2);
    }

    log::info!(
        "{} particles on {}x{}, seed {:?}",
        config.particle_count,
        config.width,
        config.height,
        config.seed
    );

    match args.headless_frames {
        Some(frames) => run_headless(&config, frames),
        None => app::run(config),
    }
}

// ウィンドウなしで指定フレーム数だけ回す / Drives the frame loop without a window.
fn run_headless(config: &FieldConfig, frames: u64) {
    let bounds = Bounds::new(config.width as f32, config.height as f32);
    let mut rng = make_rng(config.seed);
    let mut animation = Animation::new(&mut rng, bounds, config);
    let mut display = DisplayList::new(bounds);
    let token = CancelToken::new();
    if frames == 0 {
        token.cancel();
    }

    animation.run_until_cancelled(&mut display, &token, |animation, _| {
        if animation.frames() >= frames {
            token.cancel();
        }
    });

    log::info!(
        "headless run done: {} particles, {} active pulses, {} draw commands in last frame",
        animation.field().len(),
        animation.pulses().len(),
        display.len()
    );
}
