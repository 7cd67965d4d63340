use aabb_space::{instance_bytes, presets, BodyBuilder, BodyHandle, Space, SpaceConfig};
use anyhow::{Context, Result};
use glam::Vec2;
use log::info;

/// Ticks to simulate when no count is given on the command line
const DEFAULT_TICKS: u32 = 600;

/// How often (in ticks) the scene is logged
const LOG_INTERVAL: u32 = 60;

/// Patrol range of the moving platform's left edge
const PATROL_MIN_X: f32 = 200.0;
const PATROL_MAX_X: f32 = 500.0;
const PATROL_SPEED: f32 = 1.0;

/// Upward force the player jumps with when grounded
const JUMP_FORCE: f32 = 40.0;
const JUMP_INTERVAL: u32 = 150;

struct Scene {
    space: Space,
    platform: BodyHandle,
    player: BodyHandle,
    crate_box: BodyHandle,
}

fn build_scene() -> Result<Scene> {
    let config = SpaceConfig::default()
        .with_gravity(-0.25)
        .with_collision_coefficient(0.5)
        .with_axis_speed_limit(40.0);
    let mut space = Space::with_config(config);

    space.add(presets::platform(0.0, 0.0, 800.0, 50.0)?);
    let platform = space.add(presets::moving_platform(
        300.0,
        100.0,
        100.0,
        100.0,
        PATROL_SPEED,
    )?);
    let player = space.add_entity(presets::player(320.0, 200.0)?)?;
    let crate_box = space.add_entity(
        BodyBuilder::entity(2.0)
            .position(100.0, 50.0)
            .size(40.0, 40.0)
            .elasticity(0.8)
            .build()?,
    )?;

    Ok(Scene {
        space,
        platform,
        player,
        crate_box,
    })
}

/// Host-side control applied between ticks
fn drive(scene: &mut Scene, tick: u32) -> Result<()> {
    let platform = scene
        .space
        .get_mut(scene.platform)
        .context("platform missing from space")?;
    let x = platform.position().x;
    if x > PATROL_MAX_X {
        platform.set_vel_x(-PATROL_SPEED);
    } else if x < PATROL_MIN_X {
        platform.set_vel_x(PATROL_SPEED);
    }

    if tick % JUMP_INTERVAL == 0 && scene.space.is_grounded(scene.player) {
        scene
            .space
            .apply_force(scene.player, Vec2::new(0.0, JUMP_FORCE))?;
        info!("Player jumps at tick {}", tick);
    }

    // Nudge the crate toward the player
    let player_x = scene.space.get(scene.player).map(|b| b.position().x);
    let crate_x = scene.space.get(scene.crate_box).map(|b| b.position().x);
    if let (Some(player_x), Some(crate_x)) = (player_x, crate_x) {
        let push = (player_x - crate_x).signum() * 0.1;
        scene.space.apply_force(scene.crate_box, Vec2::new(push, 0.0))?;
    }

    Ok(())
}

fn log_scene(scene: &Scene, tick: u32) {
    for (handle, body) in scene.space.entities() {
        info!(
            "tick {:>4} {}: pos {:?} vel {:?} grounded {}",
            tick,
            handle,
            body.position(),
            body.velocity(),
            scene.space.is_grounded(handle)
        );
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let ticks = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u32>())
        .transpose()
        .context("tick count must be a non-negative integer")?
        .unwrap_or(DEFAULT_TICKS);

    info!("Simulating {} ticks...", ticks);

    let mut scene = build_scene()?;
    for tick in 1..=ticks {
        drive(&mut scene, tick)?;
        scene.space.update();

        if tick % LOG_INTERVAL == 0 {
            log_scene(&scene, tick);
        }
    }

    let instances = scene.space.instances();
    info!(
        "Final frame: {} bodies, {} bytes of instance data",
        instances.len(),
        instance_bytes(&instances).len()
    );

    Ok(())
}
