//! Headless runner: drops a character with horizontal momentum and logs how
//! the active ability shapes its velocity frame by frame.
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::Vec3;
use locomotion::{
    init_logging, AnimationLog, Collaborators, LocomotionMachine, MovementConfig, StaticGround,
    VelocityProbe, DEFAULT_FIXED_DELTA, DEFAULT_FRAME_DELTA,
};
use log::info;

/// Simulates a falling character
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON file with movement tuning
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 180)]
    frames: u32,
    /// Horizontal speed when the fall starts
    #[arg(long, default_value_t = 15.0, allow_hyphen_values = true)]
    speed: f32,
    /// Horizontal input held from the first frame (-1 to 1)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    hold: f32,
    /// Frame at which the character touches flat ground
    #[arg(long)]
    land_after: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => MovementConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => MovementConfig::default(),
    };

    let mut machine = LocomotionMachine::new(config);
    machine.properties_mut().target_velocity = Vec3::new(args.speed, 0.0, 0.0);
    let mut view = AnimationLog::default();
    let mut body = VelocityProbe::new();
    let mut ground = StaticGround::airborne();

    {
        let mut world = Collaborators {
            scanner: &ground,
            view: &mut view,
            body: &mut body,
        };
        machine.start(&mut world)?;
        if args.hold != 0.0 {
            machine.engage_horizontal(args.hold, &mut world);
        }
    }

    let mut physics_time = 0.0_f32;
    for frame in 0..args.frames {
        if args.land_after == Some(frame) {
            info!("frame {frame}: ground reached");
            ground = StaticGround::flat();
        }
        let mut world = Collaborators {
            scanner: &ground,
            view: &mut view,
            body: &mut body,
        };

        physics_time += DEFAULT_FRAME_DELTA;
        while physics_time >= DEFAULT_FIXED_DELTA {
            machine.fixed_tick(&mut world, DEFAULT_FIXED_DELTA);
            physics_time -= DEFAULT_FIXED_DELTA;
        }
        let step = machine.tick(&mut world, DEFAULT_FRAME_DELTA);

        let kind = machine
            .active_kind()
            .map_or_else(|| "idle".to_owned(), |kind| kind.to_string());
        info!(
            "frame {frame}: {kind} velocity={:?} ramp={step:?}",
            machine.properties().target_velocity
        );
    }

    info!(
        "finished after {} frames; {} physics steps, clips {:?}, facing {:?}",
        args.frames,
        body.received(),
        view.started(),
        machine.facing().rotation()
    );
    Ok(())
}
