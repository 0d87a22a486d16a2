//! Headless runner for the gravity flip prototype.
//!
//! Loads an optional JSON configuration, spawns a player facing three
//! blocks, fires one shot and logs where the blocks end up.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use gravflip::{
    init_logging, spawn_block, spawn_player, Collider, GameConfig, GravityField, GravityFlipPlugin,
    InputState, PlayerAgent, RigidBody,
};
use log::info;

/// A first-person gravity gun prototype, run headless
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 100)]
    ticks: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = GameConfig::load_or_default(args.config.as_deref())
        .context("failed to load game configuration")?;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(GravityFlipPlugin::new(config))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            config.fixed_timestep_seconds,
        )));
    app.finish();
    app.cleanup();

    let world = app.world_mut();
    spawn_player(world, PlayerAgent::new(config.player), Vec3::ZERO);
    let cube = Collider::Cuboid {
        half_extents: Vec3::splat(0.5),
    };
    let field = GravityField::new(config.gravity_strength);
    let blocks = [
        ("ahead", spawn_block(world, Vec3::new(0.0, 0.6, 10.0), cube, Some(field))),
        ("left", spawn_block(world, Vec3::new(-4.0, 0.6, 10.0), cube, Some(field))),
        ("static", spawn_block(world, Vec3::new(4.0, 0.6, 10.0), cube, None)),
    ];

    // One scripted shot at the block straight ahead.
    world.resource_mut::<InputState>().press_interact();

    for _ in 0..args.ticks {
        app.update();
    }

    for (name, entity) in blocks {
        let Some(body) = app.world().get::<RigidBody>(entity) else {
            continue;
        };
        let inverted = app
            .world()
            .get::<GravityField>(entity)
            .is_some_and(GravityField::is_inverted);
        info!(
            "{name} block at {:.2?} moving {:.2?} (inverted: {inverted})",
            body.position, body.linear_velocity
        );
    }
    Ok(())
}
