//! Scene setup and frame schedule.
//!
//! [`build_world`] inserts every resource and observer the game needs and
//! runs [`setup`] once to populate the scene. [`build_schedule`] returns the
//! per-frame schedule in its fixed order, and [`step`] advances the world by
//! one frame.

use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use log::{error, info};

use crate::components::layer::LayerRequest;
use crate::components::miscspawner::MiscSpawner;
use crate::components::parallax::{DEFAULT_LAYER_LENGTH, ParallaxLayer};
use crate::components::scroller::BackgroundScroller;
use crate::components::stickerboard::StickerBoard;
use crate::resources::buttonsource::ButtonInput;
use crate::resources::camera2d::SceneCamera;
use crate::resources::collector::StickerCollector;
use crate::resources::display::Display;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::ButtonPad;
use crate::resources::prefabs::PrefabStore;
use crate::resources::spawner::{ObjectSpawner, SpawnRng};
use crate::resources::worldtime::WorldTime;
use crate::systems::input::button_input_system;
use crate::systems::layers::apply_layer_requests;
use crate::systems::miscspawner::misc_spawner_system;
use crate::systems::parallax::{init_parallax_layers, parallax_system};
use crate::systems::passingobject::passing_object_system;
use crate::systems::propagate_transforms::propagate_transforms;
use crate::systems::render::render_system;
use crate::systems::scroller::scroller_system;
use crate::systems::spawner::{object_growth_system, on_button_event};
use crate::systems::sticker::sticker_drift_system;
use crate::systems::stickerboard::snap_stickers_to_board;
use crate::systems::time::update_world_time;
use crate::systems::ttl::ttl_system;

/// Marks the entity driving the scroll (the ground layer).
#[derive(Component, Debug, Clone, Copy)]
pub struct MainBackground;

/// Spawn a wrapping background layer from a prefab.
fn spawn_layer(
    commands: &mut Commands,
    prefabs: &PrefabStore,
    key: &str,
    position: Vec2,
    parallax_effect: f32,
    speed: f32,
    layer: &str,
) -> Option<Entity> {
    let entity = prefabs.instantiate(commands, key, position)?;
    commands.entity(entity).insert((
        ParallaxLayer::new(position.x, DEFAULT_LAYER_LENGTH, parallax_effect, speed),
        LayerRequest::new(layer),
    ));
    Some(entity)
}

/// Populate the scene: camera, background layers, scroller, board and the
/// misc prop spawner.
pub fn setup(mut commands: Commands, config: Res<GameConfig>, prefabs: Res<PrefabStore>) {
    commands.insert_resource(SceneCamera::new(
        config.camera_position,
        config.camera_half_width,
        config.camera_half_height,
    ));

    spawn_layer(
        &mut commands,
        &prefabs,
        "sky",
        Vec2::new(0.0, 5.0),
        config.sky_parallax,
        config.sky_speed,
        "Sky",
    );
    spawn_layer(
        &mut commands,
        &prefabs,
        "hills",
        Vec2::new(0.0, -2.0),
        config.hills_parallax,
        config.hills_speed,
        "Background",
    );

    match spawn_layer(
        &mut commands,
        &prefabs,
        "ground",
        Vec2::new(0.0, -10.0),
        0.0,
        config.scroll_speed,
        "Background",
    ) {
        Some(ground) => {
            commands.entity(ground).insert((
                MainBackground,
                BackgroundScroller::new(config.scroll_speed, config.passing_interval)
                    .with_easing(config.easing, config.ease_duration)
                    .with_passing(
                        config.passing_prefab.clone(),
                        config.passing_speed,
                        config.passing_offset,
                    )
                    .with_passing_timing(config.passing_pause, config.passing_lifetime),
            ));
        }
        None => error!("No ground prefab; the scene will not scroll or stop at stations"),
    }

    match prefabs.instantiate(&mut commands, "board", config.board_position) {
        Some(board) => {
            commands.entity(board).insert((
                StickerBoard::new(config.board_min_cell)
                    .with_factors(config.board_width_factor, config.board_height_factor),
                LayerRequest::new("Board"),
            ));
        }
        None => error!("No board prefab; collected stickers will never be shown"),
    }

    commands.spawn(MiscSpawner::new(
        config.misc_entries.clone(),
        config.misc_interval,
    ));

    info!("Scene ready");
}

/// Build a world with all resources and observers and run [`setup`].
///
/// `input` may be `None` for a scene without buttons.
pub fn build_world(
    config: GameConfig,
    prefabs: PrefabStore,
    input: Option<ButtonInput>,
    display: Display,
    rng: SpawnRng,
) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        time_scale: config.time_scale,
        ..Default::default()
    });
    world.insert_resource(ButtonPad::default());
    world.insert_resource(ObjectSpawner::from_config(&config));
    world.insert_resource(StickerCollector::default());
    world.insert_resource(SceneCamera::default());
    world.insert_resource(rng);
    world.insert_resource(prefabs);
    world.insert_resource(display);
    world.insert_resource(config);
    if let Some(input) = input {
        info!("Button source: {}", input.describe());
        world.insert_resource(input);
    }

    world.add_observer(on_button_event);
    world.add_observer(snap_stickers_to_board);

    let setup_id = world.register_system(setup);
    if let Err(e) = world.run_system(setup_id) {
        error!("Scene setup failed: {}", e);
    }
    world.flush();
    world
}

/// The per-frame schedule.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            button_input_system,
            object_growth_system,
            scroller_system,
            init_parallax_layers,
            parallax_system,
            passing_object_system,
            sticker_drift_system,
            misc_spawner_system,
            ttl_system,
            apply_layer_requests,
            propagate_transforms,
            render_system,
        )
            .chain(),
    );
    update
}

/// Advance the world by one frame of `dt` seconds.
pub fn step(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}
