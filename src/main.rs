use anyhow::Result;
use glam::Vec2;
use log::info;

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::{Action, InputState};
use engine::physics::Viewport;
use game::level::{Level, LevelDescription, ObstacleKind, ObstacleSpec};

/// Demo drive length in wall seconds
const DEMO_DURATION_SECS: f32 = 8.0;
/// Half-size of the camera window that follows the vehicle
const VIEWPORT_HALF_SIZE: Vec2 = Vec2::new(640.0, 360.0);

/// A small slalom course: walls down both sides, cones to weave through,
/// a barrel and a crate to shove, fuel cans along the racing line.
fn demo_level() -> LevelDescription {
    let side_wall = ObstacleKind::Wall {
        width: 40.0,
        height: 2000.0,
    };

    let mut obstacles = vec![
        ObstacleSpec::new(side_wall, Vec2::new(-300.0, -800.0)),
        ObstacleSpec::new(side_wall, Vec2::new(300.0, -800.0)),
    ];
    for lane in 0..5 {
        let y = -150.0 - 250.0 * lane as f32;
        let x = if lane % 2 == 0 { -80.0 } else { 80.0 };
        obstacles.push(ObstacleSpec::new(ObstacleKind::Cone, Vec2::new(x, y)));
    }
    obstacles.push(ObstacleSpec::new(
        ObstacleKind::Barrel,
        Vec2::new(0.0, -700.0),
    ));
    obstacles.push(
        ObstacleSpec::new(ObstacleKind::Crate, Vec2::new(120.0, -1000.0)).rotated(30.0),
    );
    obstacles.push(ObstacleSpec::new(
        ObstacleKind::FuelCan,
        Vec2::new(0.0, -400.0),
    ));
    obstacles.push(ObstacleSpec::new(
        ObstacleKind::FuelCan,
        Vec2::new(-40.0, -1200.0),
    ));

    LevelDescription {
        vehicle: "car".to_string(),
        start_position: Vec2::ZERO,
        obstacles,
    }
}

/// Scripted driving: floor it, weave right and left through the cones,
/// then drop into reverse and back up for the finish
fn script_input(input: &mut InputState, elapsed: f32) {
    for action in Action::ALL {
        input.release(action);
    }
    input.press(Action::Accelerate);
    if (2.0..4.0).contains(&elapsed) {
        input.press(Action::SteerRight);
    } else if (4.0..6.0).contains(&elapsed) {
        input.press(Action::SteerLeft);
    }
    if elapsed >= 6.5 {
        input.press(Action::ShiftDown);
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Overdrive demo drive...");

    let mut level = Level::load(&demo_level())?;
    let mut game_loop = GameLoop::new();
    let mut input = InputState::new();

    let mut last_report = 0u64;
    while game_loop.elapsed().as_secs_f32() < DEMO_DURATION_SECS {
        let updates = game_loop.begin_frame();
        let elapsed = game_loop.elapsed().as_secs_f32();

        script_input(&mut input, elapsed);
        if input.just_pressed(Action::Pause) {
            game_loop.toggle_pause();
        }

        for _ in 0..updates {
            let viewport = Viewport::new(level.player().body.position, VIEWPORT_HALF_SIZE);
            level.update(game_loop.fixed_timestep(), &input, &viewport);
        }
        input.end_frame();

        if updates == 0 {
            // Nothing to simulate yet; don't spin the CPU
            std::thread::sleep(std::time::Duration::from_millis(1));
        }

        // Telemetry once a second
        let second = elapsed as u64;
        if second > last_report {
            last_report = second;
            let player = level.player();
            info!(
                "t={second}s pos=({:.0}, {:.0}) speed={:.0} rpm={} fuel={:.0} damage={} fps={:.0}",
                player.body.position.x,
                player.body.position.y,
                player.speed(),
                player.rpm(),
                player.fuel(),
                player.damage(),
                game_loop.fps()
            );
        }
    }

    let player = level.player();
    info!(
        "Demo finished: {} frames, {} updates, final pos=({:.0}, {:.0}), damage={}, fuel cans left={}",
        game_loop.frame_count(),
        game_loop.update_count(),
        player.body.position.x,
        player.body.position.y,
        player.damage(),
        level.remaining_fuel_cans()
    );

    Ok(())
}
